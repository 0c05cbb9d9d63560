//! Self-hosted inspection-service backend.
//!
//! Unlike the managed chat API, this service computes the activation
//! payload itself: POST `/generate` returns the full payload, and GET
//! `/neuron/{id}/history` returns a ranked record list. Bearer auth is
//! optional.

use async_trait::async_trait;
use circuitlens::history::ActivationRecord;
use circuitlens::payload::PromptPayload;
use reqwest::Url;
use serde::Serialize;
use tracing::debug;

use crate::backend::{Backend, REQUEST_TIMEOUT};
use crate::error::ClientError;

#[derive(Debug, Clone)]
pub struct InspectionConfig {
    pub base_url: String,
    pub api_key: Option<String>,
}

impl InspectionConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
}

#[derive(Debug)]
pub struct InspectionBackend {
    http: reqwest::Client,
    base: Url,
    api_key: Option<String>,
}

impl InspectionBackend {
    pub fn new(cfg: InspectionConfig) -> Result<Self, ClientError> {
        let base = Url::parse(cfg.base_url.trim_end_matches('/'))
            .map_err(|e| ClientError::Config(format!("invalid base url: {e}")))?;
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;
        Ok(Self {
            http,
            base,
            api_key: cfg.api_key,
        })
    }

    /// Append path segments to the base URL; segments are percent-encoded,
    /// so arbitrary neuron ids are safe in the path.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::Config("base url cannot be a base".into()))?
            .extend(segments);
        Ok(url)
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => req.bearer_auth(key),
            None => req,
        }
    }
}

#[async_trait]
impl Backend for InspectionBackend {
    async fn process_prompt(&self, prompt: &str) -> Result<PromptPayload, ClientError> {
        let url = self.endpoint(&["generate"])?;
        let res = self
            .authorize(self.http.post(url))
            .json(&GenerateRequest { prompt })
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(ClientError::Provider(format!(
                "inspection service error: {}",
                res.status()
            )));
        }

        let payload: PromptPayload = res.json().await?;
        debug!(
            tokens = payload.tokens.len(),
            neurons = payload.neurons.len(),
            "inspection payload received"
        );
        Ok(payload)
    }

    async fn neuron_history(
        &self,
        neuron_id: &str,
    ) -> Result<Vec<ActivationRecord>, ClientError> {
        let url = self.endpoint(&["neuron", neuron_id, "history"])?;
        let res = self.authorize(self.http.get(url)).send().await?;

        if !res.status().is_success() {
            return Err(ClientError::Provider(format!(
                "inspection service error: {}",
                res.status()
            )));
        }

        Ok(res.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_path_encodes_neuron_id() {
        let backend =
            InspectionBackend::new(InspectionConfig::new("http://localhost:8000")).unwrap();
        let url = backend.endpoint(&["neuron", "n 3/5", "history"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/neuron/n%203%2F5/history"
        );
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let backend =
            InspectionBackend::new(InspectionConfig::new("http://localhost:8000/api/")).unwrap();
        let url = backend.endpoint(&["generate"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/generate");
    }

    #[test]
    fn malformed_base_url_is_rejected() {
        let err = InspectionBackend::new(InspectionConfig::new("not a url")).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }
}
