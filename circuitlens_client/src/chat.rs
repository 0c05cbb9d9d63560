//! Managed chat-completion backend.
//!
//! The provider only supplies response text; tokenization, the neuron
//! universe, and token associations are synthesized locally through the
//! core crate.

use std::sync::Mutex;

use async_trait::async_trait;
use circuitlens::graph::GraphConfig;
use circuitlens::history::{sample_history, ActivationRecord};
use circuitlens::payload::{payload_for_response, PromptPayload};
use circuitlens::rng::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::backend::{entropy_seed, Backend, REQUEST_TIMEOUT};
use crate::error::ClientError;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4";

/// Fixed system framing sent with every prompt.
const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Response-length cap requested from the provider.
const MAX_RESPONSE_TOKENS: u32 = 150;

#[derive(Debug, Clone)]
pub struct ChatApiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,

    /// Shape of the synthesized neuron universe.
    pub graph: GraphConfig,

    /// Fixed seed for reproducible synthesis; fresh entropy when `None`.
    pub seed: Option<u64>,
}

impl ChatApiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_owned(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            graph: GraphConfig::default(),
            seed: None,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

pub struct ChatApiBackend {
    http: reqwest::Client,
    cfg: ChatApiConfig,
    rng: Mutex<Rng>,
}

impl ChatApiBackend {
    pub fn new(cfg: ChatApiConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;
        let rng = Mutex::new(Rng::new(cfg.seed.unwrap_or_else(entropy_seed)));
        Ok(Self { http, cfg, rng })
    }

    async fn complete(&self, prompt: &str) -> Result<String, ClientError> {
        let url = format!(
            "{}/chat/completions",
            self.cfg.base_url.trim_end_matches('/')
        );
        let body = ChatRequest {
            model: &self.cfg.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: MAX_RESPONSE_TOKENS,
        };

        let res = self
            .http
            .post(url)
            .bearer_auth(&self.cfg.api_key)
            .json(&body)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let detail = res.text().await.unwrap_or_default();
            return Err(ClientError::Provider(format!(
                "chat completion failed with status {status}: {detail}"
            )));
        }

        let parsed: ChatResponse = res.json().await?;
        Ok(parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default())
    }
}

#[async_trait]
impl Backend for ChatApiBackend {
    async fn process_prompt(&self, prompt: &str) -> Result<PromptPayload, ClientError> {
        let response = self.complete(prompt).await?;
        debug!(chars = response.len(), "chat completion received");

        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        Ok(payload_for_response(&response, &self.cfg.graph, &mut rng))
    }

    // The managed API exposes no activation store; histories are
    // synthesized locally, same as the rest of the payload.
    async fn neuron_history(
        &self,
        neuron_id: &str,
    ) -> Result<Vec<ActivationRecord>, ClientError> {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        Ok(sample_history(neuron_id, &mut rng))
    }
}
