use crate::domain::synthesis::SynthesizeError;

/// Failure of a whole batch run. The first error a worker produces becomes
/// the batch's error; errors from siblings cancelled afterwards are
/// discarded rather than collected.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("synthesis failed for {text:?}: {source}")]
    Synthesize {
        text: String,
        #[source]
        source: SynthesizeError,
    },
    #[error("saving audio for {name:?} failed: {source}")]
    Save {
        name: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("batch cancelled before completion")]
    Cancelled,
    #[error("batch worker panicked: {0}")]
    Worker(String),
}
