//! # Utilities Library
//!
//! Shared utility functions for environment variables, time conversion, and input validation.

pub mod envs;
pub mod time;
pub mod validation;

// Re-export commonly used functions
pub use envs::{get_env, get_env_or, get_env_parse, get_env_parse_or};
pub use time::{now_utc, to_unix_secs, from_unix_secs, format_unix_local};
pub use validation::{validate_not_empty, validate_decimal, sanitize_decimal_input};
