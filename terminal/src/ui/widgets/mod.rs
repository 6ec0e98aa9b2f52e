//! # Reusable UI Widgets
//!
//! Common widgets used by the streams screen.

pub mod datetime_picker;
pub mod forms;
pub mod header;
pub mod notifications;
pub mod stream_list;
