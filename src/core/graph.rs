//! Layered neuron graph synthesis.
//!
//! The graph is the "universe" a prompt response is mapped onto: a fixed
//! number of layers, a fixed number of neurons per layer, and weighted
//! connections between adjacent layers drawn at a configurable density.
//! Ids are deterministic (`n-{layer}-{index}`); activations and weights
//! come from the injected [`Rng`].

use hashbrown::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::rng::Rng;

/// Spacing between consecutive layers along the x axis.
const LAYER_SPACING: f32 = 5.0;

/// Radius of the ring each layer's neurons sit on.
const RING_RADIUS: f32 = 3.0;

/// Even layers are partitioned into this many attention-head groups.
const HEAD_GROUPS: f32 = 4.0;

/// One synthetic unit of the layered graph.
///
/// `position` exists only for the rendering consumer; the core never
/// interprets it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Neuron {
    #[cfg_attr(feature = "serde", serde(rename = "neuronId"))]
    pub id: String,
    pub layer: u32,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub head: Option<u32>,
    #[cfg_attr(feature = "serde", serde(rename = "activationValue"))]
    pub activation: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub position: [f32; 3],
}

impl Neuron {
    /// Derived id for a layer/index pair.
    pub fn id_for(layer: u32, index: u32) -> String {
        format!("n-{layer}-{index}")
    }
}

/// Directed weighted edge between neurons in adjacent layers.
///
/// Invariant: the source neuron's layer is exactly one below the target
/// neuron's layer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Connection {
    #[cfg_attr(feature = "serde", serde(rename = "sourceId"))]
    pub source: String,
    #[cfg_attr(feature = "serde", serde(rename = "targetId"))]
    pub target: String,
    pub weight: f32,
}

/// Graph synthesis parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphConfig {
    pub layer_count: u32,
    pub width_per_layer: u32,

    // Fraction of the next layer each neuron fans out to, in [0, 1].
    pub density: f32,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            layer_count: 12,
            width_per_layer: 24,
            density: 0.15,
        }
    }
}

/// The synthesized neuron/connection universe for one prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivationGraph {
    pub neurons: Vec<Neuron>,
    pub connections: Vec<Connection>,
}

impl ActivationGraph {
    /// Build the full graph for `cfg`.
    ///
    /// Pure apart from the injected `rng`: the same config and seed
    /// reproduce the same neuron and connection sets.
    pub fn synthesize(cfg: &GraphConfig, rng: &mut Rng) -> Self {
        let neurons = spawn_neurons(cfg, rng);
        let connections = wire_adjacent_layers(&neurons, cfg.density, rng);
        Self {
            neurons,
            connections,
        }
    }
}

fn spawn_neurons(cfg: &GraphConfig, rng: &mut Rng) -> Vec<Neuron> {
    let mut neurons = Vec::with_capacity((cfg.layer_count * cfg.width_per_layer) as usize);
    for layer in 1..=cfg.layer_count {
        for index in 0..cfg.width_per_layer {
            neurons.push(Neuron {
                id: Neuron::id_for(layer, index),
                layer,
                head: head_group(layer, index, cfg.width_per_layer),
                activation: rng.next_f32_01(),
                position: ring_position(layer, index, cfg),
            });
        }
    }
    neurons
}

/// Head grouping mimics attention-head partitioning: defined only on even
/// layers, and always lands in [0, HEAD_GROUPS).
fn head_group(layer: u32, index: u32, width: u32) -> Option<u32> {
    if layer % 2 != 0 {
        return None;
    }
    // Float division keeps the group bound even when the width does not
    // divide evenly by the group count.
    Some((index as f32 / (width as f32 / HEAD_GROUPS)).floor() as u32)
}

/// Layers are spaced along x and centered on the origin; each layer's
/// neurons sit on a ring in the y/z plane.
fn ring_position(layer: u32, index: u32, cfg: &GraphConfig) -> [f32; 3] {
    let angle = index as f32 / cfg.width_per_layer as f32 * core::f32::consts::TAU;
    let x = (layer as f32 - (cfg.layer_count as f32 + 1.0) / 2.0) * LAYER_SPACING;
    [x, angle.sin() * RING_RADIUS, angle.cos() * RING_RADIUS]
}

/// Wire every adjacent layer pair at the given density.
///
/// Each source neuron draws `floor(target_layer_width * density)` targets
/// from the next layer with replacement, so duplicate edges between the
/// same pair are possible and kept.
fn wire_adjacent_layers(neurons: &[Neuron], density: f32, rng: &mut Rng) -> Vec<Connection> {
    let mut by_layer: HashMap<u32, Vec<&Neuron>> = HashMap::new();
    for neuron in neurons {
        by_layer.entry(neuron.layer).or_default().push(neuron);
    }

    let mut layers: Vec<u32> = by_layer.keys().copied().collect();
    layers.sort_unstable();

    let mut connections = Vec::new();
    for pair in layers.windows(2) {
        let (lower, upper) = (pair[0], pair[1]);
        if upper != lower + 1 {
            // Edges never span a layer gap.
            continue;
        }

        let sources = &by_layer[&lower];
        let targets = &by_layer[&upper];
        let fan_out = (targets.len() as f32 * density).floor() as usize;

        for source in sources {
            for _ in 0..fan_out {
                let target = targets[rng.gen_range_usize(0, targets.len())];
                connections.push(Connection {
                    source: source.id.clone(),
                    target: target.id.clone(),
                    weight: rng.next_f32_01(),
                });
            }
        }
    }
    connections
}
