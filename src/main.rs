use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use voicebatch::domain::batch::BatchRunner;
use voicebatch::domain::synthesis::SynthesisService;
use voicebatch::infrastructure::config::{Cli, LogFormat};
use voicebatch::infrastructure::options;
use voicebatch::infrastructure::repositories::{
    AudioRepository, FsAudioRepository, SequentialAudioRepository, TranslateTtsRepository,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let opts = options::load(&cli.options_file)
        .await
        .with_context(|| format!("loading {}", cli.options_file.display()))?;
    tracing::info!(
        records = opts.len(),
        file = %cli.options_file.display(),
        "options loaded"
    );

    let tts_repo = Arc::new(TranslateTtsRepository::new(reqwest::Client::new()));
    let audio_repo: Arc<dyn AudioRepository> = match cli.offset {
        Some(offset) => Arc::new(SequentialAudioRepository::new(&cli.out_dir, offset)),
        None => Arc::new(FsAudioRepository::new(&cli.out_dir)),
    };
    let service = Arc::new(SynthesisService::new(tts_repo, cli.cache));

    // Ctrl-C flips the shutdown signal; workers unwind instead of the
    // process dying mid-write.
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received, cancelling batch");
            let _ = shutdown_tx.send(true);
        }
    });

    let runner = BatchRunner::new(service, audio_repo)
        .with_max_workers(cli.max_workers())
        .with_shutdown(shutdown_rx);

    let run = runner.run(opts);
    match cli.timeout {
        Some(secs) => tokio::time::timeout(Duration::from_secs(secs), run)
            .await
            .context("batch timed out")??,
        None => run.await?,
    }

    tracing::info!("all records synthesized and saved");
    Ok(())
}

fn init_logging(cli: &Cli) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "voicebatch=info".into());

    if cli.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
