//! # Application Configuration
//!
//! This module manages application configuration loaded from environment variables
//! (optionally seeded from a `.env` file via `dotenvy`). All configuration is
//! validated on startup to fail fast if misconfigured.
//!
//! ## Environment Variables
//!
//! | Variable | Default |
//! |---|---|
//! | `WALLET_RPC_URL` | `http://127.0.0.1:1248` |
//! | `INDEXER_URL` | Sablier rinkeby subgraph |
//! | `TOKEN_ADDRESS` | `0xc3dbf84abb494ce5199d5d4d815b10ec29529ff8` |
//! | `ADDRESS_BOOK_PATH` | `config/addresses.json` (built-in table if missing) |
//! | `SUPPORTED_CHAIN_IDS` | `1,3,4,5,42` |
//! | `TX_POLL_INTERVAL_MS` | `10000` |
//! | `CONFIRMATION_TIMEOUT_SECS` | unset (wait forever) |
//! | `STREAMS_POLL_INTERVAL_SECS` | `30` (`0` disables) |
//! | `WALLET_WATCH_INTERVAL_MS` | `2000` |
//! | `HTTP_TIMEOUT_SECS` | `30` (not applied to wallet prompts) |
//! | `WALLET_PROMPT_TIMEOUT_SECS` | unset (wait for the user forever) |
//!
//! ## Global Config Access
//!
//! Use [`core_config()`] to access the global configuration instance:
//!
//! ```rust,no_run
//! use lib_core::config::core_config;
//!
//! let config = core_config();
//! let indexer = &config.indexer_url;
//! ```
//!
//! The config must be initialized once at application startup using [`init_config()`].

use crate::error::{AppError, Result};
use crate::model::address_book::AddressBook;
use alloy_primitives::Address;
use lib_utils::envs::{get_env_or, get_env_parse, get_env_parse_or};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::OnceLock;
use std::time::Duration;

pub const DEFAULT_WALLET_RPC_URL: &str = "http://127.0.0.1:1248";
pub const DEFAULT_INDEXER_URL: &str = "https://api.thegraph.com/subgraphs/name/sablierhq/sablier-rinkeby";
pub const DEFAULT_TOKEN_ADDRESS: &str = "0xc3dbf84abb494ce5199d5d4d815b10ec29529ff8";
pub const DEFAULT_ADDRESS_BOOK_PATH: &str = "config/addresses.json";
pub const DEFAULT_SUPPORTED_CHAIN_IDS: &[u64] = &[1, 3, 4, 5, 42];

/// Application configuration loaded from environment variables.
#[derive(Clone, Debug)]
pub struct Config {
    /// JSON-RPC endpoint of the wallet provider (Frame, an unlocked node, ...).
    pub wallet_rpc_url: String,

    /// GraphQL endpoint of the stream indexer.
    pub indexer_url: String,

    /// ERC20 token streamed by "Create Stream".
    pub token_address: Address,

    /// Sablier deployments by chain id.
    pub address_book: AddressBook,

    /// Chains the injected connector accepts.
    pub supported_chain_ids: Vec<u64>,

    /// How often a pending transaction's receipt is polled.
    pub tx_poll_interval: Duration,

    /// Give up waiting for a receipt after this long. `None` waits indefinitely.
    pub confirmation_timeout: Option<Duration>,

    /// Stream list refresh cadence. `None` refreshes only on demand.
    pub streams_poll_interval: Option<Duration>,

    /// How often the wallet provider is polled for account/chain changes.
    pub wallet_watch_interval: Duration,

    /// Timeout for indexer requests and non-interactive RPC calls.
    pub http_timeout: Duration,

    /// Limit on calls that wait for the user in the wallet (`eth_requestAccounts`,
    /// `eth_sendTransaction`). `None` waits indefinitely.
    pub wallet_prompt_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wallet_rpc_url: DEFAULT_WALLET_RPC_URL.to_string(),
            indexer_url: DEFAULT_INDEXER_URL.to_string(),
            token_address: Address::from_str(DEFAULT_TOKEN_ADDRESS).unwrap_or(Address::ZERO),
            address_book: AddressBook::builtin(),
            supported_chain_ids: DEFAULT_SUPPORTED_CHAIN_IDS.to_vec(),
            tx_poll_interval: Duration::from_millis(10_000),
            confirmation_timeout: None,
            streams_poll_interval: Some(Duration::from_secs(30)),
            wallet_watch_interval: Duration::from_millis(2_000),
            http_timeout: Duration::from_secs(30),
            wallet_prompt_timeout: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Reads `.env` first if present; real environment variables win.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();

        let wallet_rpc_url = get_env_or("WALLET_RPC_URL", DEFAULT_WALLET_RPC_URL);
        let indexer_url = get_env_or("INDEXER_URL", DEFAULT_INDEXER_URL);

        let token_raw = get_env_or("TOKEN_ADDRESS", DEFAULT_TOKEN_ADDRESS);
        let token_address = Address::from_str(token_raw.trim())
            .map_err(|e| AppError::Config(format!("TOKEN_ADDRESS is not an address: {}", e)))?;

        let book_path = PathBuf::from(get_env_or("ADDRESS_BOOK_PATH", DEFAULT_ADDRESS_BOOK_PATH));
        let address_book = if book_path.exists() {
            AddressBook::load(&book_path)?
        } else {
            tracing::info!(path = %book_path.display(), "Address book file not found, using built-in table");
            AddressBook::builtin()
        };

        let supported_chain_ids = match std::env::var("SUPPORTED_CHAIN_IDS") {
            Ok(raw) if !raw.trim().is_empty() => parse_chain_ids(&raw)?,
            _ => DEFAULT_SUPPORTED_CHAIN_IDS.to_vec(),
        };

        let tx_poll_interval = Duration::from_millis(get_env_parse_or("TX_POLL_INTERVAL_MS", 10_000u64)?);

        let confirmation_timeout = optional_secs("CONFIRMATION_TIMEOUT_SECS")?;

        let streams_poll_interval = match get_env_parse_or("STREAMS_POLL_INTERVAL_SECS", 30u64)? {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };

        let wallet_watch_interval =
            Duration::from_millis(get_env_parse_or("WALLET_WATCH_INTERVAL_MS", 2_000u64)?);
        let http_timeout = Duration::from_secs(get_env_parse_or("HTTP_TIMEOUT_SECS", 30u64)?);
        let wallet_prompt_timeout = optional_secs("WALLET_PROMPT_TIMEOUT_SECS")?;

        Ok(Self {
            wallet_rpc_url,
            indexer_url,
            token_address,
            address_book,
            supported_chain_ids,
            tx_poll_interval,
            confirmation_timeout,
            streams_poll_interval,
            wallet_watch_interval,
            http_timeout,
            wallet_prompt_timeout,
        })
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        for (name, url) in [("WALLET_RPC_URL", &self.wallet_rpc_url), ("INDEXER_URL", &self.indexer_url)] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(AppError::Config(format!("{} must be an http(s) URL, got {}", name, url)));
            }
        }

        if self.token_address == Address::ZERO {
            return Err(AppError::Config("TOKEN_ADDRESS must not be the zero address".to_string()));
        }

        if self.supported_chain_ids.is_empty() {
            return Err(AppError::Config("SUPPORTED_CHAIN_IDS must list at least one chain".to_string()));
        }

        if self.tx_poll_interval.is_zero() || self.wallet_watch_interval.is_zero() {
            return Err(AppError::Config("Polling intervals must be greater than zero".to_string()));
        }

        Ok(())
    }
}

/// Seconds from `name`; unset or `0` means no limit.
fn optional_secs(name: &'static str) -> Result<Option<Duration>> {
    match get_env_parse::<u64>(name) {
        Ok(0) => Ok(None),
        Ok(secs) => Ok(Some(Duration::from_secs(secs))),
        Err(lib_utils::envs::Error::MissingEnv(_)) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn parse_chain_ids(raw: &str) -> Result<Vec<u64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u64>()
                .map_err(|_| AppError::Config(format!("SUPPORTED_CHAIN_IDS entry '{}' is not a chain id", s)))
        })
        .collect()
}

/// Global configuration instance (initialized once at startup).
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Initialize the global configuration.
///
/// This should be called once at application startup, before any services that need
/// configuration are created.
///
/// # Errors
///
/// Returns an error if:
/// - Environment variables are invalid
/// - Configuration validation fails
/// - Config has already been initialized
pub fn init_config() -> Result<&'static Config> {
    let config = Config::from_env()?;
    config.validate()?;

    CONFIG
        .set(config)
        .map_err(|_| AppError::Config("Config has already been initialized".to_string()))?;
    Ok(core_config())
}

/// Get a reference to the global configuration.
///
/// Falls back to [`Config::default`] if [`init_config()`] was never called, which
/// keeps tests and tooling usable without an environment.
pub fn core_config() -> &'static Config {
    CONFIG.get_or_init(Config::default)
}
