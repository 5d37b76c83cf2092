use async_trait::async_trait;

/// Persistence seam for synthesized audio.
///
/// `name` is a suggestion taken from the record's text; implementations may
/// honor or replace it. Multiple batch workers call `save` concurrently and
/// the runner puts no locking around it, so guarding any shared state is the
/// implementation's job.
#[async_trait]
pub trait AudioRepository: Send + Sync {
    async fn save(&self, name: &str, audio: &[u8]) -> anyhow::Result<()>;
}
