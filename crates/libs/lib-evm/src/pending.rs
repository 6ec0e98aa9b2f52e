//! # Pending Transactions
//!
//! Polls `eth_getTransactionReceipt` until the transaction is mined. A mined receipt
//! with `status == 0` is a confirmation failure, distinct from the submission errors
//! raised before a hash exists.

use crate::provider::Provider;
use crate::types::TransactionReceipt;
use alloy_primitives::B256;
use lib_core::{AppError, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Consecutive receipt lookups that may fail before giving up.
const MAX_CONSECUTIVE_ERRORS: u32 = 5;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(10_000);

/// A submitted transaction awaiting inclusion.
pub struct PendingTransaction {
    provider: Arc<dyn Provider>,
    hash: B256,
    poll_interval: Duration,
    timeout: Option<Duration>,
}

impl PendingTransaction {
    pub fn new(provider: Arc<dyn Provider>, hash: B256) -> Self {
        Self {
            provider,
            hash,
            poll_interval: DEFAULT_POLL_INTERVAL,
            timeout: None,
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Stop waiting after `timeout`. `None` waits indefinitely.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn hash(&self) -> B256 {
        self.hash
    }

    /// Wait until mined. Reverted receipts and timeouts are `TransactionConfirmation`.
    #[tracing::instrument(skip(self), fields(tx_hash = %self.hash))]
    pub async fn wait(self) -> Result<TransactionReceipt> {
        let started = Instant::now();
        let deadline = self.timeout.map(|t| started + t);
        let mut errors = 0u32;

        loop {
            match self.provider.transaction_receipt(self.hash).await {
                Ok(Some(receipt)) if receipt.is_mined() => {
                    let elapsed_ms = started.elapsed().as_millis() as u64;
                    if receipt.succeeded() {
                        tracing::info!(duration_ms = elapsed_ms, "Transaction confirmed");
                        return Ok(receipt);
                    }
                    tracing::warn!(duration_ms = elapsed_ms, "Transaction reverted");
                    return Err(AppError::TransactionConfirmation(format!(
                        "transaction {} reverted",
                        self.hash
                    )));
                }
                Ok(_) => {
                    errors = 0;
                    tracing::debug!("Receipt not available yet");
                }
                Err(e) => {
                    errors += 1;
                    tracing::warn!(error = %e, attempt = errors, "Receipt lookup failed");
                    if errors >= MAX_CONSECUTIVE_ERRORS {
                        return Err(AppError::TransactionConfirmation(format!(
                            "could not fetch receipt for {}: {}",
                            self.hash, e
                        )));
                    }
                }
            }

            if let Some(deadline) = deadline {
                if Instant::now() + self.poll_interval > deadline {
                    return Err(AppError::TransactionConfirmation(format!(
                        "transaction {} not confirmed within {} s",
                        self.hash,
                        self.timeout.map(|t| t.as_secs()).unwrap_or_default()
                    )));
                }
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockProvider;

    #[tokio::test]
    async fn test_waits_for_receipt() {
        let mock = MockProvider::default();
        *mock.receipt_after.lock() = 2;
        let mock = Arc::new(mock);

        let receipt = PendingTransaction::new(mock, B256::repeat_byte(1))
            .with_poll_interval(Duration::from_millis(5))
            .wait()
            .await
            .unwrap();
        assert!(receipt.succeeded());
    }

    #[tokio::test]
    async fn test_reverted_receipt_is_confirmation_error() {
        let mock = MockProvider::default();
        *mock.revert.lock() = true;

        let err = PendingTransaction::new(Arc::new(mock), B256::repeat_byte(2))
            .with_poll_interval(Duration::from_millis(5))
            .wait()
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::TransactionConfirmation(_)));
    }

    #[tokio::test]
    async fn test_timeout() {
        let mock = MockProvider::default();
        *mock.receipt_after.lock() = u32::MAX;

        let err = PendingTransaction::new(Arc::new(mock), B256::repeat_byte(3))
            .with_poll_interval(Duration::from_millis(5))
            .with_timeout(Some(Duration::from_millis(30)))
            .wait()
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::TransactionConfirmation(_)));
    }
}
