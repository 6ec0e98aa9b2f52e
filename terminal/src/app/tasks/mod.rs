//! Async background tasks: wallet, stream query, create-stream saga, row actions.

pub(crate) mod create_stream;
pub(crate) mod stream_action;
pub(crate) mod streams;
pub(crate) mod wallet;
