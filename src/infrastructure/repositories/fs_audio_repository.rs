use super::audio_repository::AudioRepository;
use anyhow::Context;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};

/// Writes each payload to `<dir>/<name>.mp3`.
///
/// Naming files after the record text is convenient for curated option files
/// but unsafe for arbitrary text (collisions, characters that are invalid in
/// file names); use [`SequentialAudioRepository`] when names must be
/// predictable.
pub struct FsAudioRepository {
    dir: PathBuf,
}

impl FsAudioRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl AudioRepository for FsAudioRepository {
    async fn save(&self, name: &str, audio: &[u8]) -> anyhow::Result<()> {
        let path = self.dir.join(format!("{name}.mp3"));
        tokio::fs::write(&path, audio)
            .await
            .with_context(|| format!("writing {}", path.display()))?;
        tracing::debug!(path = %path.display(), bytes = audio.len(), "audio saved");
        Ok(())
    }
}

/// Writes payloads to `<dir>/<offset>.mp3`, `<dir>/<offset + 1>.mp3`, … in
/// save order, ignoring the suggested name.
///
/// Numbering is dense but follows whatever order workers finish in, not the
/// order records appear in the option file.
pub struct SequentialAudioRepository {
    dir: PathBuf,
    next: AtomicU32,
}

impl SequentialAudioRepository {
    pub fn new(dir: impl Into<PathBuf>, offset: u32) -> Self {
        Self {
            dir: dir.into(),
            next: AtomicU32::new(offset),
        }
    }
}

#[async_trait]
impl AudioRepository for SequentialAudioRepository {
    async fn save(&self, _name: &str, audio: &[u8]) -> anyhow::Result<()> {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        let path = self.dir.join(format!("{n}.mp3"));
        tokio::fs::write(&path, audio)
            .await
            .with_context(|| format!("writing {}", path.display()))?;
        tracing::debug!(path = %path.display(), bytes = audio.len(), "audio saved");
        Ok(())
    }
}
