//! # Signer Resolution
//!
//! Contract calls that change state need an account to send from. The connected
//! library is wrapped as:
//!
//! - [`ProviderOrSigner::Signer`]: an account is connected; transactions are sent from it.
//! - [`ProviderOrSigner::Provider`]: read-only; sending is refused.
//!
//! The signer is "unchecked": it returns the hash from `eth_sendTransaction` and does
//! not fetch the transaction back before handing it to the caller.

use crate::provider::Provider;
use crate::types::TransactionRequest;
use alloy_primitives::{Address, Bytes, B256};
use lib_core::{AppError, Result};
use std::sync::Arc;

/// Sends transactions from one account through the wallet.
#[derive(Clone)]
pub struct UncheckedSigner {
    provider: Arc<dyn Provider>,
    account: Address,
}

impl UncheckedSigner {
    pub fn new(provider: Arc<dyn Provider>, account: Address) -> Self {
        Self { provider, account }
    }

    pub fn address(&self) -> Address {
        self.account
    }

    pub fn provider(&self) -> &Arc<dyn Provider> {
        &self.provider
    }

    #[tracing::instrument(skip(self, data), fields(from = %self.account))]
    pub async fn send_transaction(&self, to: Address, data: Bytes) -> Result<B256> {
        let tx = TransactionRequest::call(self.account, to, data);
        let hash = self.provider.send_transaction(&tx).await?;
        tracing::info!(tx_hash = %hash, "Transaction submitted");
        Ok(hash)
    }
}

impl std::fmt::Debug for UncheckedSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UncheckedSigner").field("account", &self.account).finish()
    }
}

/// A library handle that may or may not be able to send.
#[derive(Clone)]
pub enum ProviderOrSigner {
    Signer(UncheckedSigner),
    Provider(Arc<dyn Provider>),
}

impl ProviderOrSigner {
    pub fn provider(&self) -> &Arc<dyn Provider> {
        match self {
            ProviderOrSigner::Signer(signer) => signer.provider(),
            ProviderOrSigner::Provider(provider) => provider,
        }
    }

    pub fn is_signer(&self) -> bool {
        matches!(self, ProviderOrSigner::Signer(_))
    }

    /// Send a contract call. Fails with a submission error on a read-only handle.
    pub async fn send_transaction(&self, to: Address, data: Bytes) -> Result<B256> {
        match self {
            ProviderOrSigner::Signer(signer) => signer.send_transaction(to, data).await,
            ProviderOrSigner::Provider(_) => Err(AppError::TransactionSubmission(
                "no signer: connect a wallet account first".to_string(),
            )),
        }
    }
}

impl std::fmt::Debug for ProviderOrSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderOrSigner::Signer(signer) => f.debug_tuple("Signer").field(signer).finish(),
            ProviderOrSigner::Provider(_) => f.write_str("Provider"),
        }
    }
}

/// Signer when `account` is present, read-only provider otherwise.
pub fn provider_or_signer(library: Arc<dyn Provider>, account: Option<Address>) -> ProviderOrSigner {
    match account {
        Some(account) => ProviderOrSigner::Signer(UncheckedSigner::new(library, account)),
        None => ProviderOrSigner::Provider(library),
    }
}
