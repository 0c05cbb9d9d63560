//! Prompt-response payload composition.
//!
//! The one composition step every backend shares: tokenize the provider's
//! response, synthesize the neuron/connection universe, and associate
//! tokens with neurons.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::associate::{associate, tokenize, Token};
use crate::graph::{ActivationGraph, Connection, GraphConfig, Neuron};
use crate::rng::Rng;

/// Everything derived from one prompt submission.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PromptPayload {
    pub response: String,
    pub tokens: Vec<Token>,
    pub neurons: Vec<Neuron>,
    pub connections: Vec<Connection>,
}

/// Derive the full activation payload for a provider response.
pub fn payload_for_response(response: &str, cfg: &GraphConfig, rng: &mut Rng) -> PromptPayload {
    let words = tokenize(response);
    let graph = ActivationGraph::synthesize(cfg, rng);
    let tokens = associate(&words, &graph.neurons, rng);
    PromptPayload {
        response: response.to_owned(),
        tokens,
        neurons: graph.neurons,
        connections: graph.connections,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composes_tokens_in_sequence_order() {
        let mut rng = Rng::new(1);
        let payload = payload_for_response("hi there", &GraphConfig::default(), &mut rng);

        assert_eq!(payload.response, "hi there");
        assert_eq!(payload.tokens.len(), 2);
        assert_eq!(payload.tokens[0].text, "hi");
        assert_eq!(payload.tokens[0].position, 0);
        assert_eq!(payload.tokens[1].text, "there");
        assert_eq!(payload.tokens[1].position, 1);
        assert_eq!(payload.neurons.len(), 12 * 24);
        assert!(!payload.connections.is_empty());
    }

    #[test]
    fn empty_response_still_yields_a_universe() {
        let mut rng = Rng::new(2);
        let payload = payload_for_response("", &GraphConfig::default(), &mut rng);
        assert!(payload.tokens.is_empty());
        assert_eq!(payload.neurons.len(), 12 * 24);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn payload_round_trips_through_wire_json() {
        let mut rng = Rng::new(3);
        let cfg = GraphConfig {
            layer_count: 3,
            width_per_layer: 4,
            density: 0.5,
        };
        let payload = payload_for_response("hello circuits", &cfg, &mut rng);

        let json = serde_json::to_string(&payload).unwrap();
        let parsed: PromptPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, payload);
    }
}
