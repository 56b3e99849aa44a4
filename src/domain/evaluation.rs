use serde::{Deserialize, Serialize};

use super::regime::RegimeLabel;

/// Raw Monte Carlo output before EV/CI/XAI post-processing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    pub true_prob: f64,
    pub ci_low: f64,
    pub ci_high: f64,
    pub corr_multiplier: f64,
    /// `1 / nu` — higher means fatter tails, more joint-extreme behavior.
    pub tail_risk: f64,
    pub per_leg_hit_rate: Vec<f64>,
}

/// Final evaluator output: the stable result schema from the evaluate operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParlayEvaluation {
    pub recommended: bool,
    pub true_probability: f64,
    pub implied_probability: f64,
    pub confidence_interval: [f64; 2],
    pub fair_odds_american: i32,
    pub sportsbook_odds_american: i32,
    pub ev_pct: f64,
    pub correlation_multiplier: f64,
    pub tail_risk_factor: f64,
    pub kelly_fraction: f64,
    pub explanation: Explanation,
    pub simulation_meta: SimulationMeta,
    /// Populated only on a degraded (non-`Err`) response, e.g. `"DEADLINE_EXCEEDED"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explanation {
    pub regime: RegimeLabel,
    pub regime_reasoning: String,
    pub factors: Vec<Factor>,
    pub imputed_pairs: Vec<(String, String, String, String)>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Factor {
    pub name: String,
    pub impact: f64,
    pub direction: FactorDirection,
    pub detail: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FactorDirection {
    Positive,
    Negative,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationMeta {
    pub ms: u64,
    pub n_samples: usize,
    pub nu: f64,
    pub warmed_up: bool,
    pub seed: u64,
}
