//! Wire protocol of the translate web app's speech endpoint.
//!
//! The endpoint is the app's generic batch-RPC surface: requests wrap their
//! arguments in a double-encoded nested-array envelope, and responses come
//! back as a newline-framed stream mixing chunk lengths with JSON records.

pub mod request;
pub mod response;

pub use request::{form_body, EnvelopeError};
pub use response::{extract_audio, DecodeError};

/// Origin of the translate web app; doubles as the `Origin`/`Referer` value
/// its CSRF-style checks expect.
pub const BASE_URL: &str = "https://translate.google.com";

/// Path of the batch-RPC endpoint the speech call goes through.
pub const RPC_PATH: &str = "/_/TranslateWebserverUi/data/batchexecute";
