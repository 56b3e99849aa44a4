use serde::{Deserialize, Serialize};

/// Classifier-assigned label for expected game script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegimeLabel {
    Blowout,
    Shootout,
    Defensive,
    OvertimeRisk,
    Normal,
}

/// The regime classifier's full output: label plus the distributional
/// parameters it controls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegimeAssessment {
    pub label: RegimeLabel,
    pub nu: f64,
    pub corr_boost: f64,
    pub reasoning: String,
    pub confidence: f64,
}
