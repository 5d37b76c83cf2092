//! Batch client for the translate web app's speech endpoint: option files
//! in, MP3 files out, bounded concurrency with fail-fast semantics in
//! between.

pub mod domain;
pub mod infrastructure;
