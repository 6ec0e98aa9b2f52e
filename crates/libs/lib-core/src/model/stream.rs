//! # Streams
//!
//! Two halves:
//!
//! - [`Stream`]: an existing stream as mirrored by the indexer. Read-only here; the
//!   contract owns all accounting.
//! - [`StreamTerms`]: the arguments of a `createStream` call, derived from the form.
//!
//! ## Deposit Adjustment
//!
//! The streaming contract pays out `deposit / duration` per second and requires the
//! deposit to divide evenly by the duration. The client therefore rounds the deposit
//! *down* to the nearest multiple:
//!
//! ```text
//! deposit        = 100 tokens = 100 * 10^18 base units
//! duration       = 97 s
//! remainder      = deposit mod 97
//! amount         = deposit - remainder        (amount mod 97 == 0)
//! ```

use crate::error::{AppError, Result};
use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use shared::dto::streams::{RecipientStream, SenderStream};
use std::str::FromStr;

/// Decimals of the streamed token. The token is assumed to be an 18-decimal ERC20.
pub const TOKEN_DECIMALS: u32 = 18;

/// `10^decimals` as a `U256`.
fn unit(decimals: u32) -> U256 {
    U256::from(10u64).pow(U256::from(decimals))
}

/// Parse a non-negative decimal string into base units, truncating any digits beyond
/// `decimals`.
///
/// `"1.5"` with 18 decimals is `1_500_000_000_000_000_000`.
pub fn parse_token_amount(input: &str, decimals: u32) -> Result<U256> {
    lib_utils::validation::validate_decimal(input, "Deposit").map_err(AppError::InvalidInput)?;

    let input = input.trim();
    let (int_part, frac_part) = match input.split_once('.') {
        Some((i, f)) => (i, f),
        None => (input, ""),
    };

    let parse = |digits: &str| -> Result<U256> {
        if digits.is_empty() {
            return Ok(U256::ZERO);
        }
        U256::from_str_radix(digits, 10)
            .map_err(|_| AppError::InvalidInput("Deposit is too large".to_string()))
    };

    let whole = parse(int_part)?
        .checked_mul(unit(decimals))
        .ok_or_else(|| AppError::InvalidInput("Deposit is too large".to_string()))?;

    let mut frac_digits: String = frac_part.chars().take(decimals as usize).collect();
    while frac_digits.len() < decimals as usize {
        frac_digits.push('0');
    }
    let frac = parse(&frac_digits)?;

    whole
        .checked_add(frac)
        .ok_or_else(|| AppError::InvalidInput("Deposit is too large".to_string()))
}

/// Parse the deposit field into base units; it must be strictly positive.
pub fn parse_deposit(input: &str) -> Result<U256> {
    let amount = parse_token_amount(input, TOKEN_DECIMALS)?;
    if amount.is_zero() {
        return Err(AppError::InvalidInput("Deposit must be greater than 0".to_string()));
    }
    Ok(amount)
}

/// Render base units as a decimal string without trailing zeros (`"100"`, `"0.25"`).
pub fn format_token_amount(amount: U256, decimals: u32) -> String {
    let unit = unit(decimals);
    let whole = amount / unit;
    let frac = amount % unit;
    if frac.is_zero() {
        return whole.to_string();
    }
    let frac = format!("{:0>width$}", frac.to_string(), width = decimals as usize);
    format!("{}.{}", whole, frac.trim_end_matches('0'))
}

/// Stream duration in seconds. A stop time at or before the start is rejected.
pub fn stream_duration(start_time: i64, stop_time: i64) -> Result<u64> {
    if stop_time <= start_time {
        return Err(AppError::InvalidInput(
            "Stop time must be after start time".to_string(),
        ));
    }
    Ok((stop_time - start_time) as u64)
}

/// Round `deposit` down to a multiple of `duration`.
///
/// `duration` must be non-zero; [`stream_duration`] guarantees that.
pub fn amount_to_deposit(deposit: U256, duration: u64) -> U256 {
    let remainder = deposit % U256::from(duration);
    deposit - remainder
}

/// Arguments of `createStream`, ready for encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamTerms {
    pub recipient: Address,
    /// Deposit after rounding down to a multiple of the duration.
    pub deposit: U256,
    /// What the rounding removed from the requested deposit.
    pub remainder: U256,
    pub token: Address,
    pub start_time: u64,
    pub stop_time: u64,
}

impl StreamTerms {
    /// Validate the form values and derive the `createStream` arguments.
    ///
    /// Fails with `InvalidInput` when the deposit is not a positive number, the
    /// recipient is not a 20-byte hex address, the stop time is not after the start
    /// time, a time is negative, or the deposit rounds down to zero.
    pub fn prepare(
        deposit: &str,
        recipient: &str,
        token: Address,
        start_time: i64,
        stop_time: i64,
    ) -> Result<Self> {
        let requested = parse_deposit(deposit)?;
        let recipient = parse_recipient(recipient)?;

        if start_time < 0 {
            return Err(AppError::InvalidInput("Start time must be after 1970".to_string()));
        }
        let duration = stream_duration(start_time, stop_time)?;

        let amount = amount_to_deposit(requested, duration);
        if amount.is_zero() {
            return Err(AppError::InvalidInput(format!(
                "Deposit is smaller than the stream duration ({} s) in base units",
                duration
            )));
        }

        Ok(Self {
            recipient,
            deposit: amount,
            remainder: requested - amount,
            token,
            start_time: start_time as u64,
            stop_time: stop_time as u64,
        })
    }

    pub fn duration(&self) -> u64 {
        self.stop_time - self.start_time
    }
}

/// Which side of a stream the connected account is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StreamRole {
    Sender,
    Recipient,
}

/// Where a stream is in its lifetime relative to a clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamStatus {
    Scheduled,
    Streaming,
    Ended,
}

/// A stream as mirrored by the indexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stream {
    /// Contract stream id.
    pub id: U256,
    pub sender: Address,
    pub recipient: Address,
    /// Deposit in base units.
    pub deposit: U256,
    /// Unix seconds.
    pub start_time: u64,
    /// Unix seconds.
    pub stop_time: u64,
}

impl Stream {
    /// Build from a `senderStreams` row; the queried account is the sender.
    pub fn from_sender_row(account: Address, row: &SenderStream) -> Result<Self> {
        Ok(Self {
            id: parse_u256(&row.id, "id")?,
            sender: account,
            recipient: parse_address(&row.recipient, "recipient")?,
            deposit: parse_u256(&row.deposit, "deposit")?,
            start_time: parse_u64(&row.start_time, "startTime")?,
            stop_time: parse_u64(&row.stop_time, "stopTime")?,
        })
    }

    /// Build from a `recipientStreams` row; the queried account is the recipient.
    pub fn from_recipient_row(account: Address, row: &RecipientStream) -> Result<Self> {
        Ok(Self {
            id: parse_u256(&row.id, "id")?,
            sender: parse_address(&row.sender, "sender")?,
            recipient: account,
            deposit: parse_u256(&row.deposit, "deposit")?,
            start_time: parse_u64(&row.start_time, "startTime")?,
            stop_time: parse_u64(&row.stop_time, "stopTime")?,
        })
    }

    /// The other party from `role`'s point of view.
    pub fn counterparty(&self, role: StreamRole) -> Address {
        match role {
            StreamRole::Sender => self.recipient,
            StreamRole::Recipient => self.sender,
        }
    }

    pub fn status_at(&self, now: u64) -> StreamStatus {
        if now < self.start_time {
            StreamStatus::Scheduled
        } else if now < self.stop_time {
            StreamStatus::Streaming
        } else {
            StreamStatus::Ended
        }
    }

    pub fn deposit_display(&self) -> String {
        format_token_amount(self.deposit, TOKEN_DECIMALS)
    }
}

/// A `0x`-prefixed 20-byte hex address. Mixed case is accepted without a checksum check.
fn parse_recipient(raw: &str) -> Result<Address> {
    let raw = raw.trim();
    lib_utils::validation::validate_not_empty(raw, "Recipient").map_err(AppError::InvalidInput)?;
    if !raw.starts_with("0x") || raw.len() != 42 {
        return Err(AppError::InvalidInput(
            "Recipient must be a 0x-prefixed 20-byte address".to_string(),
        ));
    }
    Address::from_str(raw)
        .map_err(|_| AppError::InvalidInput(format!("'{}' is not a valid hex address", raw)))
}

fn parse_u256(raw: &str, field: &str) -> Result<U256> {
    U256::from_str_radix(raw.trim(), 10)
        .map_err(|_| AppError::Decoding(format!("stream field '{}' is not an integer: {}", field, raw)))
}

fn parse_u64(raw: &str, field: &str) -> Result<u64> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| AppError::Decoding(format!("stream field '{}' is not a timestamp: {}", field, raw)))
}

fn parse_address(raw: &str, field: &str) -> Result<Address> {
    Address::from_str(raw.trim())
        .map_err(|_| AppError::Decoding(format!("stream field '{}' is not an address: {}", field, raw)))
}
