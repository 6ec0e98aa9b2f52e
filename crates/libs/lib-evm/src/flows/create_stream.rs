//! # Create-Stream Saga
//!
//! Creating a stream takes two transactions that must happen in order:
//!
//! ```text
//! Idle -> Approving -> Approved -> Creating -> Confirmed
//!            |                        |
//!            +------> Failed <--------+
//! ```
//!
//! 1. `token.approve(sablier, amount)` so the contract may pull the deposit.
//! 2. `sablier.createStream(recipient, amount, token, start, stop)`.
//!
//! There is no compensation step: if step 2 fails the allowance from step 1 stays.

use crate::contracts::{ContractCaller, Erc20, Sablier};
use crate::types::TransactionReceipt;
use alloy_primitives::{Address, B256, U256};
use async_trait::async_trait;
use lib_core::{AppError, Result, StreamTerms};
use std::sync::Arc;

/// Contract operations the terminal performs. Mocked in tests.
#[async_trait]
pub trait StreamContracts: Send + Sync {
    /// Approve the streaming contract to pull `amount` of `token`.
    async fn approve(&self, token: Address, amount: U256) -> Result<TransactionReceipt>;

    async fn create_stream(&self, terms: &StreamTerms) -> Result<TransactionReceipt>;

    async fn cancel(&self, stream_id: U256) -> Result<TransactionReceipt>;

    async fn withdraw(&self, stream_id: U256) -> Result<TransactionReceipt>;
}

/// Live contracts reached through the connected wallet.
#[derive(Clone, Debug)]
pub struct SablierClient {
    sablier: Sablier,
    caller: ContractCaller,
}

impl SablierClient {
    pub fn new(sablier_address: Address, caller: ContractCaller) -> Self {
        Self {
            sablier: Sablier::new(sablier_address, caller.clone()),
            caller,
        }
    }

    pub fn sablier_address(&self) -> Address {
        self.sablier.address()
    }
}

#[async_trait]
impl StreamContracts for SablierClient {
    async fn approve(&self, token: Address, amount: U256) -> Result<TransactionReceipt> {
        Erc20::new(token, self.caller.clone())
            .approve(self.sablier.address(), amount)
            .await
    }

    async fn create_stream(&self, terms: &StreamTerms) -> Result<TransactionReceipt> {
        self.sablier.create_stream(terms).await
    }

    async fn cancel(&self, stream_id: U256) -> Result<TransactionReceipt> {
        self.sablier.cancel(stream_id).await
    }

    async fn withdraw(&self, stream_id: U256) -> Result<TransactionReceipt> {
        self.sablier.withdraw(stream_id).await
    }
}

/// Which transaction of the flow a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateStreamStep {
    Approve,
    Create,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CreateStreamStage {
    #[default]
    Idle,
    Approving,
    Approved { approve_tx: B256 },
    Creating,
    Confirmed { approve_tx: B256, create_tx: B256 },
    Failed { step: CreateStreamStep, message: String },
}

impl CreateStreamStage {
    /// A flow is between `Idle` and a terminal stage.
    pub fn is_running(&self) -> bool {
        matches!(
            self,
            CreateStreamStage::Approving | CreateStreamStage::Approved { .. } | CreateStreamStage::Creating
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            CreateStreamStage::Idle => "Idle",
            CreateStreamStage::Approving => "Approving token...",
            CreateStreamStage::Approved { .. } => "Token approved",
            CreateStreamStage::Creating => "Creating stream...",
            CreateStreamStage::Confirmed { .. } => "Stream created",
            CreateStreamStage::Failed { .. } => "Failed",
        }
    }
}

/// Receipts of a completed flow.
#[derive(Debug, Clone)]
pub struct CreateStreamOutcome {
    pub approve: TransactionReceipt,
    pub create: TransactionReceipt,
}

/// Runs approve then createStream, reporting every stage transition.
pub struct CreateStreamSaga<C: StreamContracts + ?Sized> {
    contracts: Arc<C>,
    stage: CreateStreamStage,
}

impl<C: StreamContracts + ?Sized> CreateStreamSaga<C> {
    pub fn new(contracts: Arc<C>) -> Self {
        Self {
            contracts,
            stage: CreateStreamStage::Idle,
        }
    }

    pub fn stage(&self) -> &CreateStreamStage {
        &self.stage
    }

    fn transition<F>(&mut self, stage: CreateStreamStage, on_transition: &mut F)
    where
        F: FnMut(&CreateStreamStage),
    {
        tracing::debug!(from = ?self.stage, to = ?stage, "Create-stream stage transition");
        self.stage = stage;
        on_transition(&self.stage);
    }

    fn fail<F>(&mut self, step: CreateStreamStep, error: AppError, on_transition: &mut F) -> AppError
    where
        F: FnMut(&CreateStreamStage),
    {
        tracing::error!(?step, error = %error, "Create-stream flow failed");
        self.transition(
            CreateStreamStage::Failed {
                step,
                message: error.user_message(),
            },
            on_transition,
        );
        error
    }

    /// Drive the flow to `Confirmed` or `Failed`.
    #[tracing::instrument(skip_all, fields(recipient = %terms.recipient, deposit = %terms.deposit))]
    pub async fn run<F>(&mut self, terms: &StreamTerms, mut on_transition: F) -> Result<CreateStreamOutcome>
    where
        F: FnMut(&CreateStreamStage) + Send,
    {
        if self.stage.is_running() {
            return Err(AppError::Internal("create-stream flow already running".to_string()));
        }

        self.transition(CreateStreamStage::Approving, &mut on_transition);
        let approve = match self.contracts.approve(terms.token, terms.deposit).await {
            Ok(receipt) => receipt,
            Err(e) => return Err(self.fail(CreateStreamStep::Approve, e, &mut on_transition)),
        };
        let approve_tx = approve.transaction_hash;
        self.transition(CreateStreamStage::Approved { approve_tx }, &mut on_transition);

        self.transition(CreateStreamStage::Creating, &mut on_transition);
        let create = match self.contracts.create_stream(terms).await {
            Ok(receipt) => receipt,
            Err(e) => return Err(self.fail(CreateStreamStep::Create, e, &mut on_transition)),
        };
        self.transition(
            CreateStreamStage::Confirmed {
                approve_tx,
                create_tx: create.transaction_hash,
            },
            &mut on_transition,
        );

        tracing::info!(
            approve_tx = %approve_tx,
            create_tx = %create.transaction_hash,
            "Stream created"
        );
        Ok(CreateStreamOutcome { approve, create })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::abi::{IERC20, ISablier};
    use crate::signer::provider_or_signer;
    use crate::test_support::MockProvider;
    use alloy_primitives::{address, U64};
    use alloy_sol_types::SolCall;
    use parking_lot::Mutex;
    use std::time::Duration;

    const TOKEN: Address = address!("0x7070707070707070707070707070707070707070");
    const RECIPIENT: Address = address!("0xb0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0");

    #[derive(Default)]
    struct MockContracts {
        calls: Mutex<Vec<String>>,
        fail_create: bool,
        fail_approve: bool,
    }

    fn receipt(byte: u8) -> TransactionReceipt {
        TransactionReceipt {
            transaction_hash: B256::repeat_byte(byte),
            block_number: Some(U64::from(1)),
            status: Some(U64::from(1)),
        }
    }

    #[async_trait]
    impl StreamContracts for MockContracts {
        async fn approve(&self, token: Address, amount: U256) -> Result<TransactionReceipt> {
            self.calls.lock().push(format!("approve {} {}", token, amount));
            if self.fail_approve {
                return Err(AppError::TransactionSubmission("rejected in wallet".into()));
            }
            Ok(receipt(1))
        }

        async fn create_stream(&self, terms: &StreamTerms) -> Result<TransactionReceipt> {
            self.calls.lock().push(format!("create {}", terms.deposit));
            if self.fail_create {
                return Err(AppError::TransactionConfirmation("reverted".into()));
            }
            Ok(receipt(2))
        }

        async fn cancel(&self, _stream_id: U256) -> Result<TransactionReceipt> {
            Ok(receipt(3))
        }

        async fn withdraw(&self, _stream_id: U256) -> Result<TransactionReceipt> {
            Ok(receipt(4))
        }
    }

    fn terms(duration: i64) -> StreamTerms {
        StreamTerms::prepare("100", &RECIPIENT.to_string(), TOKEN, 1_600_000_000, 1_600_000_000 + duration)
            .unwrap()
    }

    #[tokio::test]
    async fn test_success_visits_every_stage() {
        let contracts = Arc::new(MockContracts::default());
        let mut saga = CreateStreamSaga::new(contracts.clone());
        let mut stages = Vec::new();

        saga.run(&terms(100), |s| stages.push(s.clone())).await.unwrap();

        assert_eq!(
            stages,
            vec![
                CreateStreamStage::Approving,
                CreateStreamStage::Approved { approve_tx: B256::repeat_byte(1) },
                CreateStreamStage::Creating,
                CreateStreamStage::Confirmed {
                    approve_tx: B256::repeat_byte(1),
                    create_tx: B256::repeat_byte(2),
                },
            ]
        );
        let deposit = U256::from(100u64) * U256::from(10u64).pow(U256::from(18u64));
        assert_eq!(
            *contracts.calls.lock(),
            vec![format!("approve {} {}", TOKEN, deposit), format!("create {}", deposit)]
        );
    }

    #[tokio::test]
    async fn test_failed_create_keeps_approval() {
        let contracts = Arc::new(MockContracts {
            fail_create: true,
            ..Default::default()
        });
        let mut saga = CreateStreamSaga::new(contracts.clone());

        let err = saga.run(&terms(97), |_| {}).await.unwrap_err();

        assert!(matches!(err, AppError::TransactionConfirmation(_)));
        assert!(matches!(
            saga.stage(),
            CreateStreamStage::Failed { step: CreateStreamStep::Create, .. }
        ));
        let calls = contracts.calls.lock();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].starts_with("approve"));
    }

    #[tokio::test]
    async fn test_failed_approve_skips_create() {
        let contracts = Arc::new(MockContracts {
            fail_approve: true,
            ..Default::default()
        });
        let mut saga = CreateStreamSaga::new(contracts.clone());

        let err = saga.run(&terms(100), |_| {}).await.unwrap_err();
        assert!(matches!(err, AppError::TransactionSubmission(_)));
        assert!(matches!(
            saga.stage(),
            CreateStreamStage::Failed { step: CreateStreamStep::Approve, .. }
        ));
        assert_eq!(contracts.calls.lock().len(), 1);
    }

    #[tokio::test]
    async fn test_sablier_client_sends_approve_then_create() {
        let account = Address::repeat_byte(0xa1);
        let mock = Arc::new(MockProvider::with_account(account, 4));
        let caller = ContractCaller::new(provider_or_signer(mock.clone(), Some(account)))
            .with_confirmation(Duration::from_millis(1), None);
        let sablier = Address::repeat_byte(0x5a);
        let client = Arc::new(SablierClient::new(sablier, caller));

        let terms = terms(97);
        CreateStreamSaga::new(client).run(&terms, |_| {}).await.unwrap();

        let sent = mock.sent();
        assert_eq!(sent.len(), 2);

        assert_eq!(sent[0].to, TOKEN);
        let approve = IERC20::approveCall::abi_decode(&sent[0].data).unwrap();
        assert_eq!(approve.spender, sablier);
        assert_eq!(approve.amount, terms.deposit);

        assert_eq!(sent[1].to, sablier);
        let create = ISablier::createStreamCall::abi_decode(&sent[1].data).unwrap();
        assert_eq!(create.recipient, RECIPIENT);
        assert_eq!(create.deposit, terms.deposit);
        assert_eq!(create.token_address, TOKEN);
        assert_eq!(create.start_time, U256::from(1_600_000_000u64));
        assert_eq!(create.stop_time, U256::from(1_600_000_097u64));
        assert!((create.deposit % U256::from(97u64)).is_zero());
    }
}
