//! User action handlers: wallet buttons and form edits.

pub(crate) mod form;
pub(crate) mod wallet;
