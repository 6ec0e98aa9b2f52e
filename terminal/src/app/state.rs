//! # Application State Types
//!
//! Everything the render layer reads: the wallet connection, the create-stream form,
//! the stream query, the create-stream saga stage and the per-row actions in flight.

use crate::core::service::Services;
use alloy_primitives::{Address, U256};
use chrono::{DateTime, Duration as ChronoDuration, Local, NaiveDate, TimeZone, Timelike};
use lib_core::Stream;
use lib_evm::{ConnectionState, CreateStreamStage};
use std::collections::HashSet;
use std::time::{Duration, Instant};

/// Runtime settings taken from `lib_core::Config` at startup
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// ERC20 streamed by "Create Stream"
    pub token_address: Address,
    /// Stream list refresh cadence; `None` refreshes only on demand
    pub streams_poll_interval: Option<Duration>,
    /// Wallet account/chain polling cadence
    pub wallet_watch_interval: Duration,
}

impl AppSettings {
    pub fn from_config(config: &lib_core::Config) -> Self {
        Self {
            token_address: config.token_address,
            streams_poll_interval: config.streams_poll_interval,
            wallet_watch_interval: config.wallet_watch_interval,
        }
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self::from_config(&lib_core::Config::default())
    }
}

/// A local date plus hour and minute, as edited by the date/time pickers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTimeInput {
    pub date: NaiveDate,
    pub hour: u32,
    pub minute: u32,
}

impl DateTimeInput {
    /// Current local time truncated to the minute, shifted by `offset`
    pub fn now_plus(offset: ChronoDuration) -> Self {
        Self::from_local(Local::now() + offset)
    }

    pub fn from_local(time: DateTime<Local>) -> Self {
        Self {
            date: time.date_naive(),
            hour: time.hour(),
            minute: time.minute(),
        }
    }

    /// Resolve in the local timezone. Ambiguous times take the earlier instant;
    /// times skipped by a DST change are `None`.
    pub fn to_local(&self) -> Option<DateTime<Local>> {
        let naive = self.date.and_hms_opt(self.hour, self.minute, 0)?;
        Local.from_local_datetime(&naive).earliest()
    }

    /// Unix seconds, rounded from milliseconds
    pub fn to_unix_secs(&self) -> Option<i64> {
        self.to_local().map(|time| lib_utils::time::to_unix_secs(&time))
    }
}

/// Create-stream form fields
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    /// Decimal token amount as typed; only digits and one `.` survive sanitizing
    pub deposit: String,
    pub recipient: String,
    pub start: DateTimeInput,
    pub stop: DateTimeInput,
    /// Inline validation message shown under the form
    pub error: Option<String>,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            deposit: String::new(),
            recipient: String::new(),
            start: DateTimeInput::now_plus(ChronoDuration::minutes(5)),
            stop: DateTimeInput::now_plus(ChronoDuration::hours(1)),
            error: None,
        }
    }
}

/// Streams split by the connected account's role
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamLists {
    /// "Streams I created"
    pub sent: Vec<Stream>,
    /// "Streams to Me"
    pub received: Vec<Stream>,
}

/// Indexer query tri-state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamQuery {
    pub loading: bool,
    pub error: Option<String>,
    pub data: Option<StreamLists>,
    /// Account the data (or the in-flight request) belongs to
    pub account: Option<Address>,
}

/// Row actions on an existing stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamAction {
    Cancel,
    Withdraw,
}

impl StreamAction {
    pub fn label(&self) -> &'static str {
        match self {
            StreamAction::Cancel => "Cancel Stream",
            StreamAction::Withdraw => "Withdraw from Stream",
        }
    }

    pub fn past_tense(&self) -> &'static str {
        match self {
            StreamAction::Cancel => "cancelled",
            StreamAction::Withdraw => "withdrawn from",
        }
    }
}

/// Toast severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A toast waiting to be shown by the UI thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NotificationLevel::Info, message: message.into() }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NotificationLevel::Success, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: NotificationLevel::Warning, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NotificationLevel::Error, message: message.into() }
    }
}

/// Global application state
#[derive(Clone)]
pub struct AppState {
    /// Snapshot of the wallet connector
    pub connection: ConnectionState,
    /// A "Connect Wallet" request is in flight
    pub connecting: bool,
    pub form: FormState,
    pub streams: StreamQuery,
    /// Stage of the most recent create-stream flow
    pub create_stage: CreateStreamStage,
    /// (stream id, action) pairs awaiting confirmation
    pub pending_actions: HashSet<(U256, StreamAction)>,
    /// Pending notifications to display
    pub pending_notifications: Vec<Notification>,
    /// When the stream list was last requested
    pub last_streams_fetch: Option<Instant>,
    pub settings: AppSettings,
    /// Wallet, indexer and contract services
    pub services: Services,
}

impl AppState {
    pub fn new(services: Services, settings: AppSettings) -> Self {
        Self {
            connection: ConnectionState::default(),
            connecting: false,
            form: FormState::default(),
            streams: StreamQuery::default(),
            create_stage: CreateStreamStage::Idle,
            pending_actions: HashSet::new(),
            pending_notifications: Vec::new(),
            last_streams_fetch: None,
            settings,
            services,
        }
    }

    /// Connected account, if the wallet is active
    pub fn account(&self) -> Option<Address> {
        self.connection.account.filter(|_| self.connection.active)
    }

    /// The create button needs a connected wallet and no flow in progress.
    pub fn can_create_stream(&self) -> bool {
        self.account().is_some() && !self.create_stage.is_running()
    }

    pub fn is_action_pending(&self, stream_id: U256, action: StreamAction) -> bool {
        self.pending_actions.contains(&(stream_id, action))
    }

    pub fn notify(&mut self, notification: Notification) {
        self.pending_notifications.push(notification);
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("connection", &self.connection)
            .field("connecting", &self.connecting)
            .field("form", &self.form)
            .field("streams", &self.streams)
            .field("create_stage", &self.create_stage)
            .field("pending_actions", &self.pending_actions)
            .finish_non_exhaustive()
    }
}
