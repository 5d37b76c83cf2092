use super::tts_repository::TtsRepository;
use crate::domain::synthesis::{Opt, SynthesizeError, MAX_TEXT_CHARS};
use crate::infrastructure::translate::{self, BASE_URL, RPC_PATH};
use async_trait::async_trait;

/// Speech synthesis through the translate web app's batch-RPC endpoint.
///
/// One POST per record, no retries; retry policy, if any, belongs to the
/// caller. The `reqwest::Client` is shared and safe for concurrent use.
pub struct TranslateTtsRepository {
    client: reqwest::Client,
    base_url: String,
}

impl TranslateTtsRepository {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Points the repository at a different origin. Test seam.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl TtsRepository for TranslateTtsRepository {
    async fn synthesize(&self, opt: &Opt) -> Result<Vec<u8>, SynthesizeError> {
        let len = opt.text_chars();
        if len > MAX_TEXT_CHARS {
            return Err(SynthesizeError::TextTooLong { len });
        }

        let body = translate::form_body(opt)?;

        tracing::debug!(
            voice = %opt.voice,
            speed = %opt.speed,
            text_length = len,
            "requesting synthesis"
        );

        // Origin and Referer must name the app's own origin or the endpoint
        // turns the call away.
        let response = self
            .client
            .post(format!("{}{}", self.base_url, RPC_PATH))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .header("Accept", "*/*")
            .header("Origin", &self.base_url)
            .header("Referer", &self.base_url)
            .body(body)
            .send()
            .await?
            .error_for_status()?;

        let raw = response.bytes().await?;
        tracing::debug!(response_size = raw.len(), "synthesis response received");

        Ok(translate::extract_audio(&raw)?)
    }
}
