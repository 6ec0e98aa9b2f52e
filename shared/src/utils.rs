//! # Shared Utility Functions
//!
//! Common utility functions used across the workspace.
//!
//! ## Address Formatting
//!
//! Functions for formatting wallet addresses for display:
//! - [`format_address`] - Format address with ellipsis (first N and last M characters)
//! - [`truncate_address`] - `format_address` with the usual `0x1234...abcd` shape
//!
//! ## Usage
//!
//! ```rust
//! use shared::utils::format_address;
//!
//! let address = "0x9f8f72aa9304c8b593d555f12ef6589cc3a579a2";
//! let formatted = format_address(address, 6, 4);
//! assert_eq!(formatted, "0x9f8f...79a2");
//! ```

/// Format a wallet address by showing the first `prefix_len` and last `suffix_len` characters.
///
/// If the address is shorter than `prefix_len + suffix_len`, it is returned as-is.
///
/// # Examples
///
/// ```rust
/// use shared::utils::format_address;
///
/// let addr = "0x9f8f72aa9304c8b593d555f12ef6589cc3a579a2";
/// assert_eq!(format_address(addr, 6, 4), "0x9f8f...79a2");
/// assert_eq!(format_address("short", 4, 4), "short");
/// ```
pub fn format_address(address: &str, prefix_len: usize, suffix_len: usize) -> String {
    let address_len = address.len();

    // Guard against individual lengths exceeding address length to prevent panics
    if address_len <= prefix_len + suffix_len
        || prefix_len >= address_len
        || suffix_len >= address_len
        || !address.is_ascii()
    {
        return address.to_string();
    }

    let prefix = &address[..prefix_len];
    let suffix = &address[address_len - suffix_len..];

    format!("{}...{}", prefix, suffix)
}

/// Format a hex address as `0x` plus four characters, an ellipsis, and the last four.
///
/// # Examples
///
/// ```rust
/// use shared::utils::truncate_address;
///
/// let addr = "0x9f8f72aa9304c8b593d555f12ef6589cc3a579a2";
/// assert_eq!(truncate_address(addr), "0x9f8f...79a2");
/// ```
pub fn truncate_address(address: &str) -> String {
    format_address(address, 6, 4)
}
