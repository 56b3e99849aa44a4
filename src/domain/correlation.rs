use serde::{Deserialize, Serialize};

/// A single stored pairwise correlation between two (subject, stat) legs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairCorrelation {
    pub subject_a: String,
    pub stat_a: String,
    pub subject_b: String,
    pub stat_b: String,
    pub rho: f64,
}

/// Normalized, order-independent key used to look up a stored correlation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CorrelationKey(String, String, String, String);

impl CorrelationKey {
    pub fn new(subject_a: &str, stat_a: &str, subject_b: &str, stat_b: &str) -> Self {
        let a = (subject_a.to_string(), stat_a.to_string());
        let b = (subject_b.to_string(), stat_b.to_string());
        if a <= b {
            Self(a.0, a.1, b.0, b.1)
        } else {
            Self(b.0, b.1, a.0, a.1)
        }
    }
}

/// Read-only snapshot of pairwise correlations consumed for the lifetime of
/// a single request. Missing pairs default to 0 (not an error).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorrelationSnapshot {
    pairs: Vec<PairCorrelation>,
}

impl CorrelationSnapshot {
    pub fn new(pairs: Vec<PairCorrelation>) -> Self {
        Self { pairs }
    }

    /// Looks up rho for a pair. Returns `1.0` for identical (subject, stat),
    /// `None` when no stored pair matches (imputed to 0 by the caller).
    pub fn get(&self, subject_a: &str, stat_a: &str, subject_b: &str, stat_b: &str) -> Option<f64> {
        if subject_a == subject_b && stat_a == stat_b {
            return Some(1.0);
        }
        let key = CorrelationKey::new(subject_a, stat_a, subject_b, stat_b);
        self.pairs
            .iter()
            .find(|p| CorrelationKey::new(&p.subject_a, &p.stat_a, &p.subject_b, &p.stat_b) == key)
            .map(|p| p.rho)
    }
}
