//! # Form Handlers
//!
//! Edits to the create-stream form. Any edit clears the inline validation message.

use crate::app::state::{AppState, DateTimeInput};
use lib_utils::validation::sanitize_decimal_input;
use parking_lot::RwLock;
use std::sync::Arc;

/// Store the deposit, keeping only digits and the first `.`
pub(crate) fn handle_deposit_change(state: Arc<RwLock<AppState>>, value: String) {
    let mut state = state.write();
    state.form.deposit = sanitize_decimal_input(&value);
    state.form.error = None;
}

pub(crate) fn handle_recipient_change(state: Arc<RwLock<AppState>>, value: String) {
    let mut state = state.write();
    state.form.recipient = value.trim().to_string();
    state.form.error = None;
}

pub(crate) fn handle_start_time_change(state: Arc<RwLock<AppState>>, value: DateTimeInput) {
    let mut state = state.write();
    state.form.start = value;
    state.form.error = None;
}

pub(crate) fn handle_stop_time_change(state: Arc<RwLock<AppState>>, value: DateTimeInput) {
    let mut state = state.write();
    state.form.stop = value;
    state.form.error = None;
}
