pub mod error;
pub mod model;
pub mod service;

pub use error::SynthesizeError;
pub use model::{Opt, Speed, Voice, MAX_TEXT_CHARS};
pub use service::SynthesisService;
