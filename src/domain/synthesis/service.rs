use super::error::SynthesizeError;
use super::model::Opt;
use crate::infrastructure::repositories::TtsRepository;
use moka::future::Cache;
use std::sync::Arc;
use std::time::{Duration, Instant};

const CACHE_CAPACITY: u64 = 100;
const CACHE_IDLE: Duration = Duration::from_secs(30 * 60);

/// Domain service in front of the synthesis provider.
///
/// Adds per-operation logging and, when enabled, a cache keyed by the full
/// request so records that repeat within a batch synthesize once.
pub struct SynthesisService {
    tts_repo: Arc<dyn TtsRepository>,
    cache: Option<Cache<String, Vec<u8>>>,
}

impl SynthesisService {
    pub fn new(tts_repo: Arc<dyn TtsRepository>, cache_enabled: bool) -> Self {
        let cache = if cache_enabled {
            Some(
                Cache::builder()
                    .max_capacity(CACHE_CAPACITY)
                    .time_to_idle(CACHE_IDLE)
                    .build(),
            )
        } else {
            None
        };

        Self { tts_repo, cache }
    }

    pub async fn synthesize(&self, opt: &Opt) -> Result<Vec<u8>, SynthesizeError> {
        let key = cache_key(opt);
        if let Some(cache) = &self.cache {
            if let Some(audio) = cache.get(&key).await {
                tracing::info!(
                    voice = %opt.voice,
                    speed = %opt.speed,
                    audio_size = audio.len(),
                    "synthesis cache hit"
                );
                return Ok(audio);
            }
        }

        let start = Instant::now();
        let audio = self.tts_repo.synthesize(opt).await?;
        tracing::info!(
            voice = %opt.voice,
            speed = %opt.speed,
            text_length = opt.text_chars(),
            audio_size = audio.len(),
            latency_ms = start.elapsed().as_millis() as u64,
            "synthesis completed"
        );

        if let Some(cache) = &self.cache {
            cache.insert(key, audio.clone()).await;
        }
        Ok(audio)
    }
}

fn cache_key(opt: &Opt) -> String {
    format!("{}|{}|{}", opt.voice, opt.speed, opt.text)
}
