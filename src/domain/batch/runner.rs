use super::error::BatchError;
use crate::domain::synthesis::{Opt, SynthesisService};
use crate::infrastructure::repositories::AudioRepository;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::sync::{watch, Semaphore};
use tokio::task::JoinSet;

/// Concurrently synthesizes a sequence of records and hands each result to
/// the configured audio repository.
///
/// The batch is all-or-none: the first failing operation cancels everything
/// still outstanding and becomes the error of the whole run. Completion and
/// save order across records is unspecified. The runner keeps no state
/// across runs.
pub struct BatchRunner {
    service: Arc<SynthesisService>,
    audio_repo: Arc<dyn AudioRepository>,
    max_workers: usize,
    shutdown: Option<watch::Receiver<bool>>,
}

impl BatchRunner {
    pub fn new(service: Arc<SynthesisService>, audio_repo: Arc<dyn AudioRepository>) -> Self {
        Self {
            service,
            audio_repo,
            max_workers: default_workers(),
            shutdown: None,
        }
    }

    /// Caps the number of concurrently executing synthesis operations.
    /// Values below 1 are raised to 1.
    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers.max(1);
        self
    }

    /// Installs a cooperative shutdown signal: once the sender publishes
    /// `true`, no new operation starts and running workers unwind at their
    /// next suspension point.
    pub fn with_shutdown(mut self, shutdown: watch::Receiver<bool>) -> Self {
        self.shutdown = Some(shutdown);
        self
    }

    pub async fn run(&self, opts: Vec<Opt>) -> Result<(), BatchError> {
        if let Some(shutdown) = &self.shutdown {
            if *shutdown.borrow() {
                return Err(BatchError::Cancelled);
            }
        }

        tracing::info!(
            records = opts.len(),
            max_workers = self.max_workers,
            "starting batch"
        );

        let semaphore = Arc::new(Semaphore::new(self.max_workers));
        let mut workers: JoinSet<Result<(), BatchError>> = JoinSet::new();

        for opt in opts {
            let semaphore = semaphore.clone();
            let service = self.service.clone();
            let audio_repo = self.audio_repo.clone();
            let shutdown = self.shutdown.clone();

            workers.spawn(async move {
                let work = async {
                    // A closed semaphore only means the batch is tearing down.
                    let _permit = semaphore
                        .acquire()
                        .await
                        .map_err(|_| BatchError::Cancelled)?;

                    let audio =
                        service
                            .synthesize(&opt)
                            .await
                            .map_err(|source| BatchError::Synthesize {
                                text: opt.text.clone(),
                                source,
                            })?;

                    audio_repo
                        .save(&opt.text, &audio)
                        .await
                        .map_err(|source| BatchError::Save {
                            name: opt.text.clone(),
                            source,
                        })
                };

                match shutdown {
                    Some(mut shutdown) => tokio::select! {
                        biased;
                        _ = wait_for_shutdown(&mut shutdown) => Err(BatchError::Cancelled),
                        result = work => result,
                    },
                    None => work.await,
                }
            });
        }

        let mut first_error: Option<BatchError> = None;
        while let Some(joined) = workers.join_next().await {
            let result = match joined {
                Ok(result) => result,
                // Aborted siblings are expected during teardown.
                Err(join_error) if join_error.is_cancelled() => continue,
                Err(join_error) => Err(BatchError::Worker(join_error.to_string())),
            };

            if let Err(error) = result {
                if first_error.is_none() {
                    tracing::error!(error = %error, "batch failed, cancelling outstanding work");
                    workers.abort_all();
                    first_error = Some(error);
                }
            }
        }

        match first_error {
            Some(error) => Err(error),
            None => {
                tracing::info!("batch finished");
                Ok(())
            }
        }
    }
}

/// Resolves once the shutdown sender publishes `true`; pends forever if the
/// sender goes away without doing so.
async fn wait_for_shutdown(shutdown: &mut watch::Receiver<bool>) {
    loop {
        if *shutdown.borrow() {
            return;
        }
        if shutdown.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}
