use serde::{Deserialize, Serialize};

/// Game-level context used by the regime classifier and feature quantizer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameContext {
    #[serde(default)]
    pub spread: Option<f64>,
    #[serde(default)]
    pub total: Option<f64>,
    #[serde(default)]
    pub home_off_eff: Option<f64>,
    #[serde(default)]
    pub away_off_eff: Option<f64>,
    #[serde(default)]
    pub home_def_eff: Option<f64>,
    #[serde(default)]
    pub away_def_eff: Option<f64>,
    #[serde(default)]
    pub wind_mph: Option<f64>,
    #[serde(default)]
    pub temp_f: Option<f64>,
    #[serde(default)]
    pub precip_prob: Option<f64>,
    #[serde(default)]
    pub injuries: Vec<Injury>,
    #[serde(default)]
    pub sentiment: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Injury {
    pub player_id: String,
    pub status: InjuryStatus,
    pub impact: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InjuryStatus {
    Out,
    Doubtful,
    Questionable,
    Probable,
}

impl InjuryStatus {
    /// Severity multiplier applied in the feature quantizer's injury rule.
    pub fn severity(self) -> f64 {
        match self {
            InjuryStatus::Out => 1.0,
            InjuryStatus::Doubtful => 0.75,
            InjuryStatus::Questionable => 0.4,
            InjuryStatus::Probable => 0.1,
        }
    }
}

impl GameContext {
    pub fn avg_off_eff(&self) -> Option<f64> {
        match (self.home_off_eff, self.away_off_eff) {
            (Some(h), Some(a)) => Some((h + a) / 2.0),
            _ => None,
        }
    }

    pub fn avg_def_eff(&self) -> Option<f64> {
        match (self.home_def_eff, self.away_def_eff) {
            (Some(h), Some(a)) => Some((h + a) / 2.0),
            _ => None,
        }
    }
}
