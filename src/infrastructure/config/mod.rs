use clap::{Parser, ValueEnum};
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// Batch text-to-speech synthesis through the Google Translate voice
/// endpoint.
#[derive(Debug, Parser)]
#[command(name = "voicebatch", version, about)]
pub struct Cli {
    /// YAML or CSV option file, one record per synthesis (speed, voice, text)
    pub options_file: PathBuf,

    /// Maximum number of concurrent synthesis calls [default: available parallelism]
    #[arg(long, short = 'w')]
    pub workers: Option<NonZeroUsize>,

    /// Number output files sequentially from this offset instead of naming
    /// them after the record text
    #[arg(long)]
    pub offset: Option<u32>,

    /// Directory audio files are written to
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Reuse audio for records that repeat within the batch
    #[arg(long)]
    pub cache: bool,

    /// Abort the whole batch after this many seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Cli {
    /// Worker cap: the explicit flag, or however many threads the host
    /// offers.
    pub fn max_workers(&self) -> usize {
        self.workers.map(NonZeroUsize::get).unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worker_flag_wins_over_the_default() {
        let cli = Cli::parse_from(["voicebatch", "opts.yaml", "--workers", "3"]);
        assert_eq!(cli.max_workers(), 3);
    }

    #[test]
    fn workers_default_to_available_parallelism() {
        let cli = Cli::parse_from(["voicebatch", "opts.yaml"]);
        assert!(cli.max_workers() >= 1);
    }

    #[test]
    fn zero_workers_is_rejected_at_parse_time() {
        assert!(Cli::try_parse_from(["voicebatch", "opts.yaml", "--workers", "0"]).is_err());
    }
}
