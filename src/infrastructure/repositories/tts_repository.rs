use crate::domain::synthesis::{Opt, SynthesizeError};
use async_trait::async_trait;

/// Repository for speech synthesis operations.
/// Abstracts the synthesis provider behind a single call.
///
/// Implementations are responsible for:
/// - Enforcing provider-specific text limits before any I/O happens
/// - Provider-specific request framing and response decoding
///
/// The trait object is shared across concurrent batch workers, so
/// implementations must be safe to call from many tasks at once.
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Synthesize one record into a complete audio payload (MP3 bytes).
    ///
    /// # Errors
    /// Returns a [`SynthesizeError`] naming the failed step; never a
    /// partial payload.
    async fn synthesize(&self, opt: &Opt) -> Result<Vec<u8>, SynthesizeError>;
}
