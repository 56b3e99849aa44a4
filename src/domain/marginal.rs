use serde::{Deserialize, Serialize};

/// A per-subject/stat distributional projection, precomputed by an external
/// collaborator and treated as a read-only snapshot for the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Marginal {
    pub subject_id: String,
    pub stat_kind: String,
    pub dist_family: DistFamily,
    /// Distribution-family-specific parameters; opaque to the copula layer,
    /// which only consumes `mean`/`stddev`.
    #[serde(default)]
    pub params: Vec<f64>,
    pub mean: f64,
    pub stddev: f64,
    pub sample_size: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistFamily {
    Normal,
    Gamma,
    Beta,
    Weibull,
}

/// Coarse stat-category classification used by the feature quantizer to
/// decide which weather rules apply to a given marginal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatCategory {
    Passing,
    Receiving,
    Rushing,
    FieldGoal,
    Other,
}

impl Marginal {
    pub fn stat_category(&self) -> StatCategory {
        let s = self.stat_kind.to_ascii_lowercase();
        if s.contains("pass") {
            StatCategory::Passing
        } else if s.contains("rec") {
            StatCategory::Receiving
        } else if s.contains("rush") {
            StatCategory::Rushing
        } else if s.contains("field_goal") || s.contains("fg_") {
            StatCategory::FieldGoal
        } else {
            StatCategory::Other
        }
    }
}
