//! # Domain Model
//!
//! - [`address_book`]: contract deployments by chain id
//! - [`stream`]: streams as shown to the user, and the terms of a stream being created

pub mod address_book;
pub mod stream;
