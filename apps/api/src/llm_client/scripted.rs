//! In-memory gateway for tests: replies are picked by the first rule whose
//! needle occurs in the prompt.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use super::{GatewayError, LlmGateway};
use crate::media::ImageBlob;

enum Outcome {
    Reply(String),
    Fail(u16),
}

pub struct ScriptedGateway {
    rules: Vec<(String, Outcome)>,
    latency: Duration,
    calls: AtomicUsize,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            latency: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn reply(mut self, needle: &str, text: &str) -> Self {
        self.rules
            .push((needle.to_string(), Outcome::Reply(text.to_string())));
        self
    }

    pub fn fail(mut self, needle: &str, status: u16) -> Self {
        self.rules.push((needle.to_string(), Outcome::Fail(status)));
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn respond(&self, prompt: &str) -> Result<String, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let outcome = self
            .rules
            .iter()
            .find(|(needle, _)| prompt.contains(needle.as_str()))
            .map(|(_, outcome)| outcome);

        match outcome {
            Some(Outcome::Reply(text)) => Ok(text.clone()),
            Some(Outcome::Fail(status)) => Err(GatewayError::Api {
                status: *status,
                message: "scripted failure".to_string(),
            }),
            None => Err(GatewayError::EmptyContent),
        }
    }
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    async fn generate_text(&self, prompt: &str) -> Result<String, GatewayError> {
        self.respond(prompt).await
    }

    async fn generate_text_with_image(
        &self,
        prompt: &str,
        _image: &ImageBlob,
    ) -> Result<String, GatewayError> {
        self.respond(prompt).await
    }
}
