//! # circuitlens
//!
//! Synthesis and query engine behind a 3D language-model activation
//! explorer.
//!
//! A provider's response text is mapped onto a synthetic layered neuron
//! graph: neurons with deterministic ids and layout coordinates,
//! weighted connections between adjacent layers, per-token neuron
//! associations, and per-neuron historical activation records. The
//! rendering shell consumes the flat arrays this crate produces; nothing
//! here depends on it.
//!
//! All randomness flows through an explicitly injected [`rng::Rng`], so
//! every derivation is reproducible from a seed.
//!
//! ## Quick Start
//!
//! ```
//! use circuitlens::prelude::*;
//!
//! let mut rng = Rng::new(42);
//! let graph = ActivationGraph::synthesize(&GraphConfig::default(), &mut rng);
//! assert_eq!(graph.neurons.len(), 12 * 24);
//!
//! let payload = payload_for_response("hi there", &GraphConfig::default(), &mut rng);
//! assert_eq!(payload.tokens.len(), 2);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialization/deserialization
//!
//! ## Modules
//!
//! - [`graph`]: Layered neuron graph synthesis
//! - [`associate`]: Tokenization and token-neuron association
//! - [`history`]: Per-neuron activation history sampling
//! - [`payload`]: Prompt-response payload composition

#[path = "core/rng.rs"]
pub mod rng;

#[path = "core/graph.rs"]
pub mod graph;

#[path = "core/associate.rs"]
pub mod associate;

#[path = "core/history.rs"]
pub mod history;

#[path = "core/payload.rs"]
pub mod payload;

/// Prelude module for convenient imports.
///
/// ```
/// use circuitlens::prelude::*;
/// ```
pub mod prelude {
    pub use crate::associate::{associate, tokenize, Token};
    pub use crate::graph::{ActivationGraph, Connection, GraphConfig, Neuron};
    pub use crate::history::{sample_history, ActivationRecord, VOCABULARY};
    pub use crate::payload::{payload_for_response, PromptPayload};
    pub use crate::rng::Rng;
}
