use super::model::MAX_TEXT_CHARS;
use crate::infrastructure::translate::{DecodeError, EnvelopeError};

/// Failure of one synthesis operation, in the order the steps can fail:
/// local validation, request encoding, the network exchange, response
/// decoding. No step retries and no failure carries a partial result.
#[derive(Debug, thiserror::Error)]
pub enum SynthesizeError {
    #[error("text is {len} characters, limit is {}", MAX_TEXT_CHARS)]
    TextTooLong { len: usize },
    #[error(transparent)]
    Encode(#[from] EnvelopeError),
    #[error("translate request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}
