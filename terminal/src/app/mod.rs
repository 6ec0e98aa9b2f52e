//! # Application Orchestrator
//!
//! The main [`App`] struct coordinates the UI rendering layer, async tasks and
//! application state.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Main Thread (egui)                       │
//! │  App                                                        │
//! │  - on_tick()      drains AppEvents, schedules stream polls  │
//! │  - handle_*()     user actions, delegate to handlers/tasks  │
//! │  State: Arc<RwLock<AppState>> (locks held briefly)          │
//! └───────────────────────┬─────────────────────────────────────┘
//!                         │ async_channel (unbounded)
//! ┌───────────────────────▼─────────────────────────────────────┐
//! │              Async Tasks (Tokio)                            │
//! │  - wallet:        eager reconnect, provider watcher         │
//! │  - streams:       indexer query                             │
//! │  - create_stream: approve + createStream saga               │
//! │  - stream_action: cancel / withdraw                         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Tasks never touch widgets. They send an [`AppEvent`]; `on_tick` applies it to the
//! state on the UI thread and the next frame renders the result.

mod event_handler;
mod events;
mod handlers;
mod state;
mod tasks;

pub use events::AppEvent;
pub use state::*;

use crate::core::service::Services;
use crate::core::Result;
use crate::services::{IndexerClient, SablierContractsFactory};
use alloy_primitives::U256;
use async_channel::{unbounded, Receiver, Sender};
use lib_core::Config;
use lib_evm::{InjectedConnector, WalletConnector};
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Main application orchestrator.
///
/// Must be created inside a Tokio runtime context: construction spawns the eager
/// wallet reconnect and the provider watcher.
pub struct App {
    /// Thread-safe shared application state.
    ///
    /// Hold locks for minimal duration and never across `.await`.
    pub state: Arc<RwLock<AppState>>,

    /// Channel receiver for async task results, polled in `on_tick()`.
    pub event_rx: Receiver<AppEvent>,

    /// Cloned into every task.
    event_tx: Sender<AppEvent>,

    wallet_watcher: Option<JoinHandle<()>>,
}

impl App {
    /// Build the live services from `config` and start the app.
    pub fn new(config: &Config) -> Result<Self> {
        let connector = WalletConnector::new(InjectedConnector::from_config(config)?);
        let indexer = IndexerClient::new(config.indexer_url.clone(), config.http_timeout)?;
        let contracts = SablierContractsFactory::new(
            config.address_book.clone(),
            config.tx_poll_interval,
            config.confirmation_timeout,
        );

        let services = Services {
            connector: Arc::new(connector),
            indexer: Arc::new(indexer),
            contracts: Arc::new(contracts),
        };

        tracing::info!(
            wallet_rpc = %config.wallet_rpc_url,
            indexer = %config.indexer_url,
            token = %config.token_address,
            "Services initialized"
        );
        Ok(Self::with_services(services, AppSettings::from_config(config)))
    }

    /// Start the app on the given services.
    pub fn with_services(services: Services, settings: AppSettings) -> Self {
        let (event_tx, event_rx) = unbounded();
        let state = Arc::new(RwLock::new(AppState::new(services, settings)));

        tasks::wallet::connect_eagerly(state.clone(), event_tx.clone());
        let wallet_watcher = tasks::wallet::start_wallet_watcher(state.clone(), event_tx.clone());

        tracing::info!("App state initialized - event channel created, eager connect started");
        Self {
            state,
            event_rx,
            event_tx,
            wallet_watcher: Some(wallet_watcher),
        }
    }

    /// Called every frame: applies pending events and schedules the periodic stream refresh.
    pub fn on_tick(&mut self) {
        let started = std::time::Instant::now();
        let mut events_processed = 0u32;
        while let Ok(event) = self.event_rx.try_recv() {
            events_processed += 1;
            self.handle_event(event);
        }
        if events_processed > 0 {
            tracing::debug!(
                events_processed,
                processing_time_us = started.elapsed().as_micros() as u64,
                "on_tick: processed events"
            );
        }

        let refresh_due = {
            let state = self.state.read();
            match (state.account(), state.settings.streams_poll_interval) {
                (Some(account), poll_interval) if !state.streams.loading => {
                    let stale_account = state.streams.account != Some(account);
                    let poll_due = match (poll_interval, state.last_streams_fetch) {
                        (Some(interval), Some(last)) => last.elapsed() >= interval,
                        (_, None) => true,
                        (None, Some(_)) => false,
                    };
                    stale_account || poll_due
                }
                _ => false,
            }
        };
        if refresh_due {
            tasks::streams::fetch_streams(self.state.clone(), self.event_tx.clone());
        }
    }

    /// Apply one async result to the state.
    fn handle_event(&mut self, event: AppEvent) {
        use event_handler::AppEventHandler;
        self.handle_event_impl(event);
    }

    /// Notifications queued since the last call.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.state.write().pending_notifications)
    }

    // ========== GUI Action Methods - Delegating to Handlers ==========

    /// Handle wallet connect button click
    pub fn handle_wallet_connect_click(&mut self) {
        handlers::wallet::handle_wallet_connect_click(self.state.clone(), self.event_tx.clone());
    }

    /// Handle wallet disconnect button click
    pub fn handle_wallet_disconnect_click(&mut self) {
        handlers::wallet::handle_wallet_disconnect_click(self.state.clone());
    }

    pub fn handle_deposit_change(&mut self, value: String) {
        handlers::form::handle_deposit_change(self.state.clone(), value);
    }

    pub fn handle_recipient_change(&mut self, value: String) {
        handlers::form::handle_recipient_change(self.state.clone(), value);
    }

    pub fn handle_start_time_change(&mut self, value: DateTimeInput) {
        handlers::form::handle_start_time_change(self.state.clone(), value);
    }

    pub fn handle_stop_time_change(&mut self, value: DateTimeInput) {
        handlers::form::handle_stop_time_change(self.state.clone(), value);
    }

    /// Handle "Create Stream" button click
    pub fn handle_create_stream_click(&mut self) {
        tasks::create_stream::create_stream(self.state.clone(), self.event_tx.clone());
    }

    /// Handle "Cancel Stream" on a row of "Streams I created"
    pub fn handle_cancel_stream_click(&mut self, stream_id: U256) {
        tasks::stream_action::run_stream_action(
            self.state.clone(),
            self.event_tx.clone(),
            stream_id,
            StreamAction::Cancel,
        );
    }

    /// Handle "Withdraw from Stream" on a row of "Streams to Me"
    pub fn handle_withdraw_click(&mut self, stream_id: U256) {
        tasks::stream_action::run_stream_action(
            self.state.clone(),
            self.event_tx.clone(),
            stream_id,
            StreamAction::Withdraw,
        );
    }

    /// Re-query the indexer now
    pub fn refresh_streams(&mut self) {
        tasks::streams::fetch_streams(self.state.clone(), self.event_tx.clone());
    }

    /// Get the event sender (for tasks started outside the app).
    pub fn event_tx(&self) -> Sender<AppEvent> {
        self.event_tx.clone()
    }
}

impl Drop for App {
    fn drop(&mut self) {
        if let Some(watcher) = self.wallet_watcher.take() {
            watcher.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AppError;
    use crate::test_support::*;
    use lib_core::StreamRole;
    use lib_evm::{CreateStreamStage, CreateStreamStep};
    use std::time::Duration;

    struct Harness {
        app: App,
        indexer: Arc<MockIndexer>,
        contracts: Arc<MockContracts>,
    }

    fn harness_with(wallet: MockWallet, contracts: MockContracts) -> Harness {
        let wallet = Arc::new(wallet);
        let indexer = Arc::new(MockIndexer::new(Ok(sample_streams())));
        let contracts = Arc::new(contracts);
        let app = App::with_services(
            services(Some(wallet.clone()), indexer.clone(), contracts.clone()),
            test_settings(),
        );
        Harness {
            app,
            indexer,
            contracts,
        }
    }

    fn harness() -> Harness {
        harness_with(MockWallet::new(vec![ACCOUNT], 4), MockContracts::default())
    }

    /// Apply events until the channel stays quiet.
    async fn settle(app: &mut App) {
        while let Ok(Ok(event)) = tokio::time::timeout(Duration::from_millis(200), app.event_rx.recv()).await {
            app.handle_event(event);
        }
    }

    async fn connected() -> Harness {
        let mut h = harness();
        settle(&mut h.app).await;
        h.app.handle_wallet_connect_click();
        settle(&mut h.app).await;
        h.app.take_notifications();
        h
    }

    fn fill_form(app: &mut App, deposit: &str, duration_minutes: i64) {
        let start = DateTimeInput::now_plus(chrono::Duration::minutes(10));
        let stop_time = start.to_local().unwrap() + chrono::Duration::minutes(duration_minutes);
        app.handle_deposit_change(deposit.to_string());
        app.handle_recipient_change(RECIPIENT.to_string());
        app.handle_start_time_change(start);
        app.handle_stop_time_change(DateTimeInput::from_local(stop_time));
    }

    // ========== Wallet Tests ==========

    #[tokio::test]
    async fn test_initial_state_is_disconnected() {
        let mut h = harness();
        settle(&mut h.app).await;

        let state = h.app.state.read();
        assert!(!state.connection.active);
        assert_eq!(state.account(), None);
        assert_eq!(state.create_stage, CreateStreamStage::Idle);
        assert!(state.streams.data.is_none());
        assert!(state.form.deposit.is_empty());
        drop(state);
        assert_eq!(h.indexer.calls(), 0);
    }

    #[tokio::test]
    async fn test_eager_connect_restores_authorized_session() {
        let mut h = harness_with(MockWallet::new(vec![ACCOUNT], 4).authorized(), MockContracts::default());
        settle(&mut h.app).await;

        let state = h.app.state.read();
        assert!(state.connection.active);
        assert_eq!(state.account(), Some(ACCOUNT));
        assert_eq!(state.connection.chain_id, Some(4));
        assert!(state.streams.data.is_some());
        drop(state);
        assert_eq!(h.indexer.calls(), 1);
    }

    #[tokio::test]
    async fn test_connect_click_loads_streams() {
        let mut h = harness();
        settle(&mut h.app).await;

        h.app.handle_wallet_connect_click();
        assert!(h.app.state.read().connecting);
        settle(&mut h.app).await;

        let state = h.app.state.read();
        assert!(!state.connecting);
        assert_eq!(state.account(), Some(ACCOUNT));
        let lists = state.streams.data.as_ref().unwrap();
        assert_eq!(lists.sent.len(), 1);
        assert_eq!(lists.received.len(), 1);
        assert_eq!(lists.sent[0].counterparty(StreamRole::Sender), RECIPIENT);
        assert_eq!(lists.received[0].counterparty(StreamRole::Recipient), RECIPIENT);
        assert!(state
            .pending_notifications
            .iter()
            .any(|n| n.level == NotificationLevel::Success));
    }

    #[tokio::test]
    async fn test_rejected_connect_stays_disconnected() {
        let mut h = harness_with(MockWallet::new(vec![ACCOUNT], 4).rejecting(), MockContracts::default());
        settle(&mut h.app).await;

        h.app.handle_wallet_connect_click();
        settle(&mut h.app).await;

        let state = h.app.state.read();
        assert!(!state.connecting);
        assert_eq!(state.account(), None);
        assert_eq!(state.pending_notifications.len(), 1);
        assert_eq!(state.pending_notifications[0].level, NotificationLevel::Warning);
    }

    #[tokio::test]
    async fn test_connect_without_provider_reports_no_provider() {
        let indexer = Arc::new(MockIndexer::new(Ok(sample_streams())));
        let mut app = App::with_services(
            services(None, indexer, Arc::new(MockContracts::default())),
            test_settings(),
        );
        settle(&mut app).await;

        app.handle_wallet_connect_click();
        settle(&mut app).await;

        let state = app.state.read();
        assert_eq!(state.account(), None);
        assert_eq!(state.pending_notifications.len(), 1);
        assert_eq!(state.pending_notifications[0].level, NotificationLevel::Error);
        assert!(state.pending_notifications[0].message.contains("No wallet provider"));
    }

    #[tokio::test]
    async fn test_unsupported_chain_is_refused() {
        let mut h = harness_with(MockWallet::new(vec![ACCOUNT], 56), MockContracts::default());
        settle(&mut h.app).await;

        h.app.handle_wallet_connect_click();
        settle(&mut h.app).await;

        let state = h.app.state.read();
        assert!(!state.connection.active);
        assert!(state.pending_notifications[0].message.contains("Unsupported chain id 56"));
    }

    #[tokio::test]
    async fn test_disconnect_clears_streams() {
        let mut h = connected().await;
        h.app.handle_wallet_disconnect_click();

        let state = h.app.state.read();
        assert!(!state.connection.active);
        assert!(state.streams.data.is_none());
        assert_eq!(
            state.pending_notifications.last().map(|n| n.level),
            Some(NotificationLevel::Info)
        );
        drop(state);
        assert!(!h.app.state.read().services.connector.state().active);
    }

    #[tokio::test]
    async fn test_account_switch_requeries_streams() {
        let mut h = connected().await;
        let calls_before = h.indexer.calls();

        let connection = lib_evm::ConnectionState {
            account: Some(RECIPIENT),
            ..h.app.state.read().connection.clone()
        };
        h.app.handle_event(AppEvent::WalletChanged(Ok(connection)));
        settle(&mut h.app).await;

        let state = h.app.state.read();
        assert_eq!(state.account(), Some(RECIPIENT));
        assert_eq!(state.streams.account, Some(RECIPIENT));
        drop(state);
        assert_eq!(h.indexer.calls(), calls_before + 1);
    }

    // ========== Stream Query Tests ==========

    #[tokio::test]
    async fn test_stale_query_result_is_dropped() {
        let mut h = connected().await;
        h.app.handle_event(AppEvent::StreamsLoaded {
            account: RECIPIENT,
            result: Ok(StreamLists::default()),
        });

        let state = h.app.state.read();
        assert_eq!(state.streams.data.as_ref().map(|l| l.sent.len()), Some(1));
    }

    #[tokio::test]
    async fn test_repeated_query_error_notifies_once() {
        let mut h = connected().await;
        for _ in 0..2 {
            h.app.handle_event(AppEvent::StreamsLoaded {
                account: ACCOUNT,
                result: Err(AppError::Query("indexer down".to_string())),
            });
        }

        let state = h.app.state.read();
        assert_eq!(state.pending_notifications.len(), 1);
        assert!(state.streams.error.as_deref().unwrap().contains("indexer down"));
        // last good data stays on screen
        assert!(state.streams.data.is_some());
    }

    #[tokio::test]
    async fn test_poll_interval_triggers_refresh() {
        let mut h = connected().await;
        let calls_before = h.indexer.calls();
        {
            let mut state = h.app.state.write();
            state.settings.streams_poll_interval = Some(Duration::from_millis(1));
        }
        tokio::time::sleep(Duration::from_millis(5)).await;

        h.app.on_tick();
        settle(&mut h.app).await;
        assert_eq!(h.indexer.calls(), calls_before + 1);
    }

    // ========== Form Tests ==========

    #[tokio::test]
    async fn test_deposit_input_is_sanitized() {
        let mut h = harness();
        h.app.handle_deposit_change("-1a2.3.4".to_string());
        assert_eq!(h.app.state.read().form.deposit, "12.34");
    }

    // ========== Create Stream Tests ==========

    #[tokio::test]
    async fn test_create_stream_approves_then_creates() {
        let mut h = connected().await;
        let calls_before = h.indexer.calls();
        fill_form(&mut h.app, "100", 2);

        h.app.handle_create_stream_click();
        assert!(h.app.state.read().create_stage.is_running());
        settle(&mut h.app).await;

        let deposit = U256::from(100u64) * U256::from(10u64).pow(U256::from(18u64));
        let expected = deposit - deposit % U256::from(120u64);
        assert_eq!(
            h.contracts.calls(),
            vec![
                format!("approve {} {}", TOKEN, expected),
                format!("create {} {}", RECIPIENT, expected),
            ]
        );

        let state = h.app.state.read();
        assert!(matches!(state.create_stage, CreateStreamStage::Confirmed { .. }));
        assert!(state.form.deposit.is_empty());
        assert!(state
            .pending_notifications
            .iter()
            .any(|n| n.level == NotificationLevel::Success && n.message.starts_with("Stream created")));
        drop(state);
        assert_eq!(h.indexer.calls(), calls_before + 1);
    }

    #[tokio::test]
    async fn test_failed_create_keeps_approval() {
        let mut h = harness_with(
            MockWallet::new(vec![ACCOUNT], 4).authorized(),
            MockContracts {
                fail_create: true,
                ..Default::default()
            },
        );
        settle(&mut h.app).await;
        fill_form(&mut h.app, "1", 60);

        h.app.handle_create_stream_click();
        settle(&mut h.app).await;

        let calls = h.contracts.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].starts_with("approve"));

        let state = h.app.state.read();
        match &state.create_stage {
            CreateStreamStage::Failed { step, .. } => assert_eq!(*step, CreateStreamStep::Create),
            other => panic!("expected Failed, got {:?}", other),
        }
        // form is kept so the user can retry
        assert_eq!(state.form.deposit, "1");
        assert!(state
            .pending_notifications
            .iter()
            .any(|n| n.level == NotificationLevel::Error));
    }

    #[tokio::test]
    async fn test_invalid_recipient_sends_nothing() {
        let mut h = connected().await;
        fill_form(&mut h.app, "100", 2);
        h.app.handle_recipient_change("0x1234".to_string());

        h.app.handle_create_stream_click();
        settle(&mut h.app).await;

        assert!(h.contracts.calls().is_empty());
        let state = h.app.state.read();
        assert_eq!(state.create_stage, CreateStreamStage::Idle);
        assert_eq!(
            state.form.error.as_deref(),
            Some("Recipient must be a 0x-prefixed 20-byte address")
        );
    }

    #[tokio::test]
    async fn test_stop_before_start_is_rejected() {
        let mut h = connected().await;
        fill_form(&mut h.app, "100", -5);

        h.app.handle_create_stream_click();
        settle(&mut h.app).await;

        assert!(h.contracts.calls().is_empty());
        let state = h.app.state.read();
        assert_eq!(state.form.error.as_deref(), Some("Stop time must be after start time"));
    }

    #[tokio::test]
    async fn test_zero_deposit_reports_form_error() {
        let mut h = connected().await;
        fill_form(&mut h.app, "0", 2);

        h.app.handle_create_stream_click();
        settle(&mut h.app).await;

        assert!(h.contracts.calls().is_empty());
        let state = h.app.state.read();
        assert_eq!(state.create_stage, CreateStreamStage::Idle);
        assert_eq!(state.form.error.as_deref(), Some("Deposit must be greater than 0"));
    }

    #[tokio::test]
    async fn test_form_is_editable_before_connecting() {
        let mut h = harness();
        settle(&mut h.app).await;
        fill_form(&mut h.app, "100", 2);

        {
            let state = h.app.state.read();
            assert_eq!(state.form.deposit, "100");
            assert_eq!(state.form.recipient, RECIPIENT.to_string());
            assert!(!state.can_create_stream());
        }

        h.app.handle_wallet_connect_click();
        settle(&mut h.app).await;

        let state = h.app.state.read();
        assert!(state.account().is_some());
        assert_eq!(state.form.deposit, "100");
        assert!(state.can_create_stream());
    }

    #[tokio::test]
    async fn test_create_without_wallet_is_refused() {
        let mut h = harness();
        settle(&mut h.app).await;
        fill_form(&mut h.app, "100", 2);

        h.app.handle_create_stream_click();
        settle(&mut h.app).await;

        assert!(h.contracts.calls().is_empty());
        let state = h.app.state.read();
        assert_eq!(state.create_stage, CreateStreamStage::Idle);
        assert_eq!(state.pending_notifications.len(), 1);
    }

    // ========== Stream Action Tests ==========

    #[tokio::test]
    async fn test_cancel_confirms_and_refreshes() {
        let mut h = connected().await;
        let calls_before = h.indexer.calls();
        let id = U256::from(7u64);

        h.app.handle_cancel_stream_click(id);
        assert!(h.app.state.read().is_action_pending(id, StreamAction::Cancel));
        // a second click while pending is ignored
        h.app.handle_cancel_stream_click(id);
        settle(&mut h.app).await;

        assert_eq!(h.contracts.calls(), vec!["cancel 7".to_string()]);
        let state = h.app.state.read();
        assert!(state.pending_actions.is_empty());
        assert!(state
            .pending_notifications
            .iter()
            .any(|n| n.message == "Stream #7 cancelled"));
        drop(state);
        assert_eq!(h.indexer.calls(), calls_before + 1);
    }

    #[tokio::test]
    async fn test_failed_withdraw_notifies_without_refresh() {
        let mut h = harness_with(
            MockWallet::new(vec![ACCOUNT], 4).authorized(),
            MockContracts {
                fail_actions: true,
                ..Default::default()
            },
        );
        settle(&mut h.app).await;
        let calls_before = h.indexer.calls();

        h.app.handle_withdraw_click(U256::from(9u64));
        settle(&mut h.app).await;

        assert_eq!(h.contracts.calls(), vec!["withdraw 9".to_string()]);
        let state = h.app.state.read();
        assert!(state.pending_actions.is_empty());
        assert!(state
            .pending_notifications
            .iter()
            .any(|n| n.level == NotificationLevel::Error && n.message.starts_with("Withdraw from Stream #9")));
        drop(state);
        assert_eq!(h.indexer.calls(), calls_before);
    }

    #[tokio::test]
    async fn test_take_notifications_drains_queue() {
        let mut h = harness();
        h.app.state.write().notify(Notification::info("hello"));
        assert_eq!(h.app.take_notifications().len(), 1);
        assert!(h.app.take_notifications().is_empty());
    }
}
