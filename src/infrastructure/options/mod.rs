//! Option-file parsing: the YAML and CSV record formats that feed a batch.
//!
//! Both formats produce the same records; folding into domain types happens
//! in one place so the speed and voice rules cannot drift between them.

use crate::domain::synthesis::{Opt, Speed, Voice};
use serde::Deserialize;
use std::path::Path;

/// Column set a row-oriented option file must declare, in order.
const CSV_HEADER: [&str; 3] = ["speed", "voice", "text"];

#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    #[error("option file is empty")]
    EmptyInput,
    #[error("header {found:?} does not match the expected header {expected:?}")]
    HeaderMismatch {
        found: Vec<String>,
        expected: &'static [&'static str],
    },
    #[error("invalid yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("unsupported option file extension {0:?}, expected yaml, yml or csv")]
    UnsupportedFormat(String),
    #[error("failed to read option file: {0}")]
    Io(#[from] std::io::Error),
}

/// One record as written in an option file.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(default)]
    speed: String,
    #[serde(default)]
    voice: String,
    #[serde(default)]
    text: String,
}

impl From<RawRecord> for Opt {
    fn from(record: RawRecord) -> Self {
        Opt::new(
            record.text,
            Voice::normalized(&record.voice),
            Speed::parse(&record.speed),
        )
    }
}

/// Reads an option file, picking the parser from the file extension.
pub async fn load(path: &Path) -> Result<Vec<Opt>, OptionsError> {
    let raw = tokio::fs::read(path).await?;
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .as_deref()
    {
        Some("yaml" | "yml") => parse_yaml(&raw),
        Some("csv") => parse_csv(&raw),
        other => Err(OptionsError::UnsupportedFormat(
            other.unwrap_or_default().to_string(),
        )),
    }
}

/// Parses a YAML sequence of `{speed, voice, text}` mappings. Missing keys
/// default to the empty string and fold like any other value.
pub fn parse_yaml(raw: &[u8]) -> Result<Vec<Opt>, OptionsError> {
    if raw.is_empty() {
        return Err(OptionsError::EmptyInput);
    }
    let records: Vec<RawRecord> = serde_yaml::from_slice(raw)?;
    Ok(records.into_iter().map(Opt::from).collect())
}

/// Parses the row-oriented format: a literal `speed,voice,text` header
/// followed by one record per row. A diverging header, or a row whose field
/// count differs from the header's, is a hard error.
pub fn parse_csv(raw: &[u8]) -> Result<Vec<Opt>, OptionsError> {
    if raw.is_empty() {
        return Err(OptionsError::EmptyInput);
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(raw);

    let found = reader.headers()?.clone();
    if found.iter().ne(CSV_HEADER) {
        return Err(OptionsError::HeaderMismatch {
            found: found.iter().map(str::to_string).collect(),
            expected: &CSV_HEADER,
        });
    }

    let mut opts = Vec::new();
    for record in reader.records() {
        let record = record?;
        opts.push(Opt::from(RawRecord {
            speed: record[0].to_string(),
            voice: record[1].to_string(),
            text: record[2].to_string(),
        }));
    }
    Ok(opts)
}
