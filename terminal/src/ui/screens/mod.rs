//! # Screen Modules
//!
//! - **[`streams`]**: create-stream form and the sent/received stream lists

pub mod streams;
