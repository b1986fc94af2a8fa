use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use super::{GatewayError, LlmGateway};
use crate::media::ImageBlob;

/// Bounds every call of the wrapped gateway. Pipelines see an ordinary
/// `GatewayError::Timeout` and degrade like any other gateway failure.
pub struct TimeoutGateway<G> {
    inner: G,
    limit: Duration,
}

impl<G> TimeoutGateway<G> {
    pub fn new(inner: G, limit: Duration) -> Self {
        Self { inner, limit }
    }
}

#[async_trait]
impl<G: LlmGateway> LlmGateway for TimeoutGateway<G> {
    async fn generate_text(&self, prompt: &str) -> Result<String, GatewayError> {
        match tokio::time::timeout(self.limit, self.inner.generate_text(prompt)).await {
            Ok(result) => result,
            Err(_) => {
                warn!("Text generation exceeded {:?}", self.limit);
                Err(GatewayError::Timeout(self.limit))
            }
        }
    }

    async fn generate_text_with_image(
        &self,
        prompt: &str,
        image: &ImageBlob,
    ) -> Result<String, GatewayError> {
        match tokio::time::timeout(
            self.limit,
            self.inner.generate_text_with_image(prompt, image),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => {
                warn!("Image generation exceeded {:?}", self.limit);
                Err(GatewayError::Timeout(self.limit))
            }
        }
    }
}
