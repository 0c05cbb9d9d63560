//! Tokenization and token-neuron association.
//!
//! A response is split on whitespace, and each token is linked to a small
//! random subset of the graph's neurons with an elevated activation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::graph::Neuron;
use crate::rng::Rng;

/// Fewest neurons associated with one token.
pub const MIN_ASSOCIATED: usize = 5;

/// Most neurons associated with one token.
pub const MAX_ASSOCIATED: usize = 9;

/// Association implies an elevated activation; sampled neurons are
/// re-drawn into this range.
const ASSOCIATED_ACTIVATION_FLOOR: f32 = 0.5;

/// One token of the provider response, in sequence order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Token {
    #[cfg_attr(feature = "serde", serde(rename = "token"))]
    pub text: String,
    pub position: u32,
    #[cfg_attr(feature = "serde", serde(rename = "associatedNeurons"))]
    pub neurons: Vec<Neuron>,
}

/// Split on whitespace, dropping empty fragments and preserving order.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_owned).collect()
}

/// Assign each token a ranked subset of `neurons`.
///
/// Sampling is with replacement (repeats are allowed and kept). The
/// sampled copies get fresh activations in [0.5, 1.0); the base set is
/// left untouched.
pub fn associate(tokens: &[String], neurons: &[Neuron], rng: &mut Rng) -> Vec<Token> {
    tokens
        .iter()
        .enumerate()
        .map(|(position, text)| Token {
            text: text.clone(),
            position: position as u32,
            neurons: sample_associated(neurons, rng),
        })
        .collect()
}

fn sample_associated(neurons: &[Neuron], rng: &mut Rng) -> Vec<Neuron> {
    if neurons.is_empty() {
        return Vec::new();
    }

    let count = rng.gen_range_usize(MIN_ASSOCIATED, MAX_ASSOCIATED + 1);
    let mut sampled = Vec::with_capacity(count);
    for _ in 0..count {
        let mut neuron = neurons[rng.gen_range_usize(0, neurons.len())].clone();
        neuron.activation = rng.gen_range_f32(ASSOCIATED_ACTIVATION_FLOOR, 1.0);
        sampled.push(neuron);
    }
    sampled
}
