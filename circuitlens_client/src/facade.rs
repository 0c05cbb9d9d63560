//! Prompt-processing facade over the active provider backend.

use std::sync::{Arc, RwLock};

use circuitlens::history::ActivationRecord;
use circuitlens::payload::PromptPayload;
use tracing::{debug, warn};

use crate::backend::{Backend, BackendConfig};
use crate::error::ClientError;

/// Entry point a UI shell talks to.
///
/// Holds the one piece of shared state in the client layer: the active
/// backend reference. Reconfiguring swaps the reference non-atomically;
/// requests already in flight complete against the backend they started
/// with, which is fine because every request is an idempotent query.
pub struct Inspector {
    backend: RwLock<Option<Arc<dyn Backend>>>,
}

impl Inspector {
    /// An inspector with no backend. Every prompt fails with
    /// [`ClientError::Uninitialized`] until one is configured.
    pub fn unconfigured() -> Self {
        Self {
            backend: RwLock::new(None),
        }
    }

    pub fn new(config: BackendConfig) -> Result<Self, ClientError> {
        let inspector = Self::unconfigured();
        inspector.configure(config)?;
        Ok(inspector)
    }

    /// Wrap an already-built backend; used to bring a custom
    /// implementation of the capability contract.
    pub fn with_backend(backend: Box<dyn Backend>) -> Self {
        let inspector = Self::unconfigured();
        inspector.replace_backend(Arc::from(backend));
        inspector
    }

    /// Build and install the backend `config` selects, replacing any
    /// previous one.
    pub fn configure(&self, config: BackendConfig) -> Result<(), ClientError> {
        self.replace_backend(Arc::from(config.build()?));
        Ok(())
    }

    fn replace_backend(&self, backend: Arc<dyn Backend>) {
        let mut slot = self.backend.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(backend);
    }

    fn active(&self) -> Result<Arc<dyn Backend>, ClientError> {
        self.backend
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
            .ok_or(ClientError::Uninitialized)
    }

    /// Process a prompt through the active backend.
    ///
    /// Provider failures surface to the caller unchanged; there is no
    /// retry and no synthetic fallback.
    pub async fn process_prompt(&self, prompt: &str) -> Result<PromptPayload, ClientError> {
        let backend = self.active()?;
        let payload = backend.process_prompt(prompt).await?;
        debug!(
            tokens = payload.tokens.len(),
            neurons = payload.neurons.len(),
            connections = payload.connections.len(),
            "prompt processed"
        );
        Ok(payload)
    }

    /// Activation history for one neuron id.
    ///
    /// History is supplementary detail, so every failure degrades to an
    /// empty list instead of propagating.
    pub async fn neuron_history(&self, neuron_id: &str) -> Vec<ActivationRecord> {
        let backend = match self.active() {
            Ok(backend) => backend,
            Err(_) => {
                warn!(neuron_id, "history requested with no backend configured");
                return Vec::new();
            }
        };

        match backend.neuron_history(neuron_id).await {
            Ok(records) => {
                debug!(neuron_id, records = records.len(), "history fetched");
                records
            }
            Err(err) => {
                warn!(neuron_id, error = %err, "neuron history lookup failed");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offline::OfflineConfig;

    #[tokio::test]
    async fn unconfigured_prompt_fails_fast() {
        let inspector = Inspector::unconfigured();
        let err = inspector.process_prompt("hello").await.unwrap_err();
        assert!(matches!(err, ClientError::Uninitialized));
    }

    #[tokio::test]
    async fn unconfigured_history_degrades_to_empty() {
        let inspector = Inspector::unconfigured();
        assert!(inspector.neuron_history("n-3-5").await.is_empty());
    }

    #[tokio::test]
    async fn configure_installs_a_backend() {
        let inspector = Inspector::unconfigured();
        inspector
            .configure(BackendConfig::Offline(OfflineConfig {
                seed: Some(1),
                ..OfflineConfig::default()
            }))
            .unwrap();

        let payload = inspector.process_prompt("anything").await.unwrap();
        assert!(!payload.tokens.is_empty());
    }
}
