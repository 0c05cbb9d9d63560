//! Offline demo backend.
//!
//! Serves a canned response through the same synthesis path as the real
//! backends, with no network at all. This is a deliberate configuration
//! choice for running without a provider; a failed provider call is never
//! redirected here.

use std::sync::Mutex;

use async_trait::async_trait;
use circuitlens::graph::GraphConfig;
use circuitlens::history::{sample_history, ActivationRecord};
use circuitlens::payload::{payload_for_response, PromptPayload};
use circuitlens::rng::Rng;

use crate::backend::{entropy_seed, Backend};
use crate::error::ClientError;

/// Response text served in place of a real completion.
pub const DEMO_RESPONSE: &str = "The large language model processed the input \
     and generated a response based on its training data and parameters";

#[derive(Debug, Clone, Default)]
pub struct OfflineConfig {
    pub graph: GraphConfig,
    pub seed: Option<u64>,
}

pub struct OfflineBackend {
    graph: GraphConfig,
    rng: Mutex<Rng>,
}

impl OfflineBackend {
    pub fn new(cfg: OfflineConfig) -> Self {
        Self {
            graph: cfg.graph,
            rng: Mutex::new(Rng::new(cfg.seed.unwrap_or_else(entropy_seed))),
        }
    }
}

#[async_trait]
impl Backend for OfflineBackend {
    async fn process_prompt(&self, _prompt: &str) -> Result<PromptPayload, ClientError> {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        Ok(payload_for_response(DEMO_RESPONSE, &self.graph, &mut rng))
    }

    async fn neuron_history(
        &self,
        neuron_id: &str,
    ) -> Result<Vec<ActivationRecord>, ClientError> {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        Ok(sample_history(neuron_id, &mut rng))
    }
}
