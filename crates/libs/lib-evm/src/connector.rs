//! # Wallet Connector
//!
//! Owns the connection to the wallet provider and the [`ConnectionState`] the view
//! renders from.
//!
//! ## Lifecycle
//!
//! 1. On startup [`WalletConnector::try_eager`] reconnects silently when the wallet
//!    already authorizes an account (`eth_accounts` non-empty). It never prompts.
//! 2. "Connect Wallet" calls [`WalletConnector::activate`] (`eth_requestAccounts`).
//! 3. HTTP has no push channel, so [`WalletConnector::spawn_watcher`] polls the
//!    provider and turns differences into [`ProviderEvent`]s. Events are ignored until
//!    the eager attempt has finished and while a manual activation is in flight.
//! 4. "Disconnect" calls [`WalletConnector::deactivate`].

use crate::provider::{HttpProvider, Provider};
use crate::signer::{provider_or_signer, ProviderOrSigner};
use alloy_primitives::Address;
use lib_core::{AppError, Config, ConnectionError, Result};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// What the view knows about the wallet.
#[derive(Clone, Default)]
pub struct ConnectionState {
    pub active: bool,
    pub account: Option<Address>,
    pub chain_id: Option<u64>,
    pub library: Option<Arc<dyn Provider>>,
}

impl ConnectionState {
    /// Library wrapped for contract calls; `None` while inactive.
    pub fn signer(&self) -> Option<ProviderOrSigner> {
        self.library
            .clone()
            .map(|library| provider_or_signer(library, self.account))
    }
}

impl std::fmt::Debug for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionState")
            .field("active", &self.active)
            .field("account", &self.account)
            .field("chain_id", &self.chain_id)
            .field("library", &self.library.is_some())
            .finish()
    }
}

/// Account or chain change reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderEvent {
    AccountsChanged(Vec<Address>),
    ChainChanged(u64),
}

/// Connector for the configured wallet endpoint.
pub struct InjectedConnector {
    provider: Option<Arc<dyn Provider>>,
    supported_chain_ids: Vec<u64>,
}

impl InjectedConnector {
    pub fn new(provider: Option<Arc<dyn Provider>>, supported_chain_ids: Vec<u64>) -> Self {
        Self {
            provider,
            supported_chain_ids,
        }
    }

    /// Connector for `config.wallet_rpc_url`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let provider = HttpProvider::new(config.wallet_rpc_url.clone(), config.http_timeout)?
            .with_prompt_timeout(config.wallet_prompt_timeout);
        Ok(Self::new(
            Some(Arc::new(provider)),
            config.supported_chain_ids.clone(),
        ))
    }

    pub fn provider(&self) -> Result<Arc<dyn Provider>> {
        self.provider
            .clone()
            .ok_or_else(|| ConnectionError::NoProvider.into())
    }

    pub fn supports(&self, chain_id: u64) -> bool {
        self.supported_chain_ids.contains(&chain_id)
    }

    async fn connect_with(&self, provider: Arc<dyn Provider>, accounts: Vec<Address>) -> Result<ConnectionState> {
        let account = accounts.first().copied().ok_or(ConnectionError::Rejected)?;
        let chain_id = provider.chain_id().await?;
        if !self.supports(chain_id) {
            return Err(ConnectionError::UnsupportedChain(chain_id).into());
        }
        Ok(ConnectionState {
            active: true,
            account: Some(account),
            chain_id: Some(chain_id),
            library: Some(provider),
        })
    }

    /// Ask the wallet for account access.
    pub async fn activate(&self) -> Result<ConnectionState> {
        let provider = self.provider()?;
        let accounts = provider.request_accounts().await?;
        self.connect_with(provider, accounts).await
    }

    /// Connection for an already-authorized account, `None` if there is none.
    pub async fn authorized(&self) -> Result<Option<ConnectionState>> {
        let provider = self.provider()?;
        let accounts = provider.accounts().await?;
        if accounts.is_empty() {
            return Ok(None);
        }
        self.connect_with(provider, accounts).await.map(Some)
    }
}

/// Connection manager shared by the UI thread and background tasks.
pub struct WalletConnector {
    connector: InjectedConnector,
    state: RwLock<ConnectionState>,
    tried_eager: AtomicBool,
    activating: AtomicBool,
}

impl WalletConnector {
    pub fn new(connector: InjectedConnector) -> Self {
        Self {
            connector,
            state: RwLock::new(ConnectionState::default()),
            tried_eager: AtomicBool::new(false),
            activating: AtomicBool::new(false),
        }
    }

    /// Snapshot of the current connection.
    pub fn state(&self) -> ConnectionState {
        self.state.read().clone()
    }

    pub fn tried_eager(&self) -> bool {
        self.tried_eager.load(Ordering::SeqCst)
    }

    /// Provider events are acted on only after the eager attempt and outside a manual activation.
    pub fn is_listening(&self) -> bool {
        self.tried_eager() && !self.activating.load(Ordering::SeqCst)
    }

    /// Activate with a prompt. On failure the state is left inactive.
    #[tracing::instrument(skip(self))]
    pub async fn activate(&self) -> Result<ConnectionState> {
        self.activating.store(true, Ordering::SeqCst);
        let result = self.connector.activate().await;
        self.activating.store(false, Ordering::SeqCst);

        match result {
            Ok(state) => {
                tracing::info!(account = ?state.account, chain_id = ?state.chain_id, "Wallet connected");
                *self.state.write() = state.clone();
                Ok(state)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Wallet activation failed");
                Err(e)
            }
        }
    }

    /// Silent reconnect. Returns `true` when an account was restored.
    #[tracing::instrument(skip(self))]
    pub async fn try_eager(&self) -> bool {
        let restored = match self.connector.authorized().await {
            Ok(Some(state)) => {
                tracing::info!(account = ?state.account, "Restored authorized wallet session");
                *self.state.write() = state;
                true
            }
            Ok(None) => false,
            Err(e) => {
                tracing::debug!(error = %e, "Eager connection not possible");
                false
            }
        };
        self.tried_eager.store(true, Ordering::SeqCst);
        restored
    }

    pub fn deactivate(&self) {
        *self.state.write() = ConnectionState::default();
        tracing::info!("Wallet disconnected");
    }

    /// Apply a provider event to the connection.
    pub async fn handle_provider_event(&self, event: ProviderEvent) -> Result<ConnectionState> {
        if !self.is_listening() {
            tracing::debug!(?event, "Ignoring provider event");
            return Ok(self.state());
        }

        let active = self.state.read().active;
        if !active {
            return match event {
                ProviderEvent::AccountsChanged(accounts) if accounts.is_empty() => Ok(self.state()),
                _ => self.activate().await,
            };
        }

        match event {
            ProviderEvent::AccountsChanged(accounts) => match accounts.first() {
                Some(account) => {
                    tracing::info!(account = %account, "Wallet account changed");
                    self.state.write().account = Some(*account);
                }
                None => self.deactivate(),
            },
            ProviderEvent::ChainChanged(chain_id) => {
                if !self.connector.supports(chain_id) {
                    self.deactivate();
                    return Err(AppError::Connection(ConnectionError::UnsupportedChain(chain_id)));
                }
                tracing::info!(chain_id, "Wallet chain changed");
                self.state.write().chain_id = Some(chain_id);
            }
        }
        Ok(self.state())
    }

    /// Poll the provider every `interval`; `on_change` receives the state after each
    /// handled event (or the error it produced).
    pub fn spawn_watcher<F>(self: &Arc<Self>, interval: Duration, on_change: F) -> JoinHandle<()>
    where
        F: Fn(Result<ConnectionState>) + Send + Sync + 'static,
    {
        let this = Arc::clone(self);
        tokio::spawn(async move {
            let provider = match this.connector.provider() {
                Ok(provider) => provider,
                Err(_) => {
                    tracing::debug!("No wallet provider, watcher not started");
                    return;
                }
            };

            let mut last: Option<(Vec<Address>, u64)> = None;
            loop {
                tokio::time::sleep(interval).await;

                let snapshot = match (provider.accounts().await, provider.chain_id().await) {
                    (Ok(accounts), Ok(chain_id)) => (accounts, chain_id),
                    (Err(e), _) | (_, Err(e)) => {
                        tracing::debug!(error = %e, "Wallet poll failed");
                        continue;
                    }
                };

                let events = match &last {
                    None => Vec::new(),
                    Some((accounts, chain_id)) => {
                        let mut events = Vec::new();
                        if *accounts != snapshot.0 {
                            events.push(ProviderEvent::AccountsChanged(snapshot.0.clone()));
                        }
                        if *chain_id != snapshot.1 {
                            events.push(ProviderEvent::ChainChanged(snapshot.1));
                        }
                        events
                    }
                };
                last = Some(snapshot);

                for event in events {
                    if !this.is_listening() {
                        continue;
                    }
                    on_change(this.handle_provider_event(event).await);
                }
            }
        })
    }
}
