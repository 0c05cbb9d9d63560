//! The backend capability contract and its configuration sum type.

use std::time::Duration;

use async_trait::async_trait;
use circuitlens::history::ActivationRecord;
use circuitlens::payload::PromptPayload;

use crate::chat::{ChatApiBackend, ChatApiConfig};
use crate::error::ClientError;
use crate::inspect::{InspectionBackend, InspectionConfig};
use crate::offline::{OfflineBackend, OfflineConfig};

/// Per-request timeout applied to every provider call.
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Capability contract every provider backend implements.
///
/// Requests are idempotent queries; implementations hold no per-request
/// state beyond their own randomness source.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Send `prompt` to the provider and return the derived activation
    /// payload.
    async fn process_prompt(&self, prompt: &str) -> Result<PromptPayload, ClientError>;

    /// Look up the activation history for one neuron id. Any string is a
    /// valid key.
    async fn neuron_history(&self, neuron_id: &str)
        -> Result<Vec<ActivationRecord>, ClientError>;
}

/// Backend selection, made once at configuration time.
#[derive(Debug, Clone)]
pub enum BackendConfig {
    /// Managed chat-completion API (bearer auth over HTTPS).
    ChatApi(ChatApiConfig),
    /// Self-hosted inspection service.
    Inspection(InspectionConfig),
    /// No provider at all; canned demo data, selected explicitly.
    Offline(OfflineConfig),
}

impl BackendConfig {
    pub fn build(self) -> Result<Box<dyn Backend>, ClientError> {
        match self {
            BackendConfig::ChatApi(cfg) => Ok(Box::new(ChatApiBackend::new(cfg)?)),
            BackendConfig::Inspection(cfg) => Ok(Box::new(InspectionBackend::new(cfg)?)),
            BackendConfig::Offline(cfg) => Ok(Box::new(OfflineBackend::new(cfg))),
        }
    }
}

/// Seed for backends constructed without an explicit one.
pub(crate) fn entropy_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_nanos() as u64,
        Err(_) => 0x9E37_79B9_7F4A_7C15,
    }
}
