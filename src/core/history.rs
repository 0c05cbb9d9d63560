//! Per-neuron activation history.
//!
//! A history is a short, freshly sampled series of token-activation
//! records for one neuron id, ranked strongest-first. Any string is a
//! valid lookup key; ids are never validated against a graph, so a
//! lookup cannot fail.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::rng::Rng;

/// Fewest records in one history sample.
pub const MIN_RECORDS: usize = 5;

/// Most records in one history sample.
pub const MAX_RECORDS: usize = 9;

/// Closed vocabulary history tokens are drawn from: common English
/// function words plus domain terms.
pub const VOCABULARY: [&str; 31] = [
    "the",
    "of",
    "and",
    "to",
    "in",
    "is",
    "that",
    "for",
    "it",
    "with",
    "as",
    "was",
    "on",
    "be",
    "at",
    "by",
    "this",
    "have",
    "from",
    "or",
    "artificial",
    "intelligence",
    "neural",
    "network",
    "language",
    "model",
    "computer",
    "science",
    "data",
    "learning",
    "algorithm",
];

/// One past activation of a neuron on a token.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ActivationRecord {
    pub token: String,
    pub activation: f32,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub context: Option<String>,
}

/// Sample a fresh history for `neuron_id`, sorted descending by
/// activation.
pub fn sample_history(neuron_id: &str, rng: &mut Rng) -> Vec<ActivationRecord> {
    let count = rng.gen_range_usize(MIN_RECORDS, MAX_RECORDS + 1);
    let mut records = Vec::with_capacity(count);
    for _ in 0..count {
        let token = VOCABULARY[rng.gen_range_usize(0, VOCABULARY.len())];
        records.push(ActivationRecord {
            token: token.to_owned(),
            activation: rng.gen_range_f32(0.5, 1.0),
            context: Some(format!("Neuron {neuron_id} ...text containing {token}...")),
        });
    }
    records.sort_by(|a, b| b.activation.total_cmp(&a.activation));
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_is_sorted_descending() {
        let mut rng = Rng::new(1);
        for _ in 0..50 {
            let records = sample_history("n-3-5", &mut rng);
            for pair in records.windows(2) {
                assert!(pair[0].activation >= pair[1].activation);
            }
        }
    }

    #[test]
    fn history_length_and_ranges() {
        let mut rng = Rng::new(2);
        for _ in 0..50 {
            let records = sample_history("n-1-0", &mut rng);
            assert!((MIN_RECORDS..=MAX_RECORDS).contains(&records.len()));
            for r in &records {
                assert!((0.5..=1.0).contains(&r.activation));
            }
        }
    }

    #[test]
    fn tokens_come_from_the_vocabulary() {
        let mut rng = Rng::new(3);
        for _ in 0..50 {
            for r in sample_history("n-7-11", &mut rng) {
                assert!(VOCABULARY.contains(&r.token.as_str()), "{}", r.token);
            }
        }
    }

    #[test]
    fn context_embeds_id_and_token() {
        let mut rng = Rng::new(4);
        for r in sample_history("n-2-9", &mut rng) {
            let context = r.context.as_deref().expect("history context missing");
            assert!(context.contains("n-2-9"));
            assert!(context.contains(&r.token));
        }
    }

    #[test]
    fn any_string_is_a_valid_key() {
        let mut rng = Rng::new(5);
        for id in ["", "not-a-neuron", "n-999-999", "n 3/5", "🧠"] {
            let records = sample_history(id, &mut rng);
            assert!((MIN_RECORDS..=MAX_RECORDS).contains(&records.len()));
        }
    }

    #[test]
    fn repeated_lookups_sample_independently() {
        // Two calls against the same id are both structurally valid but
        // drawn fresh; nothing is cached between them.
        let mut rng = Rng::new(6);
        let first = sample_history("n-3-5", &mut rng);
        let second = sample_history("n-3-5", &mut rng);
        assert!((MIN_RECORDS..=MAX_RECORDS).contains(&first.len()));
        assert!((MIN_RECORDS..=MAX_RECORDS).contains(&second.len()));
        assert_ne!(first, second);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn record_wire_shape() {
        let r = ActivationRecord {
            token: "neural".into(),
            activation: 0.75,
            context: None,
        };
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["token"], "neural");
        assert!(v.get("context").is_none());

        let parsed: ActivationRecord = serde_json::from_value(serde_json::json!({
            "token": "data",
            "activation": 0.9,
            "context": "Neuron n-1-1 ...text containing data..."
        }))
        .unwrap();
        assert!(parsed.context.is_some());
    }
}
