//! Multi-transaction flows.

pub mod create_stream;

pub use create_stream::{
    CreateStreamOutcome, CreateStreamSaga, CreateStreamStage, CreateStreamStep, SablierClient,
    StreamContracts,
};
