use serde::{Deserialize, Serialize};

use crate::error::{EvalError, Result};

/// A single wager condition combined into a parlay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Leg {
    pub kind: LegKind,
    /// Required for `player_prop`; identifies the player/team the leg is about.
    #[serde(default)]
    pub subject_id: Option<String>,
    /// Required for `player_prop`; e.g. "receiving_yards", "passing_tds".
    #[serde(default)]
    pub stat_kind: Option<String>,
    pub line: f64,
    pub direction: Direction,
    pub odds_american: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegKind {
    Spread,
    Total,
    Moneyline,
    PlayerProp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Over,
    Under,
}

impl Direction {
    /// +1 for over, -1 for under — used both for z-score sign and for the
    /// correlation assembler's sign-flip.
    pub fn sign(self) -> f64 {
        match self {
            Direction::Over => 1.0,
            Direction::Under => -1.0,
        }
    }
}

impl Leg {
    /// Validates the invariants from the data model: `player_prop` legs need
    /// a subject and stat, and American odds must fall in the standard
    /// domain excluding the forbidden (-100, 100) open interval.
    pub fn validate(&self) -> Result<()> {
        if self.kind == LegKind::PlayerProp
            && (self.subject_id.is_none() || self.stat_kind.is_none())
        {
            return Err(EvalError::InvalidLeg(
                "player_prop leg requires subject_id and stat_kind".to_string(),
            ));
        }

        let odds = self.odds_american;
        if !(-10_000..=10_000).contains(&odds) {
            return Err(EvalError::InvalidLeg(format!(
                "odds_american {odds} out of range [-10000, 10000]"
            )));
        }
        if odds > -100 && odds < 100 {
            return Err(EvalError::InvalidLeg(format!(
                "odds_american {odds} falls in forbidden interval (-100, 100)"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prop_leg(odds: i32) -> Leg {
        Leg {
            kind: LegKind::PlayerProp,
            subject_id: Some("mahomes".into()),
            stat_kind: Some("passing_yards".into()),
            line: 265.5,
            direction: Direction::Over,
            odds_american: odds,
        }
    }

    #[test]
    fn rejects_missing_subject_on_player_prop() {
        let mut leg = prop_leg(-110);
        leg.subject_id = None;
        assert!(leg.validate().is_err());
    }

    #[test]
    fn rejects_forbidden_odds_interval() {
        assert!(prop_leg(50).validate().is_err());
        assert!(prop_leg(-50).validate().is_err());
    }

    #[test]
    fn accepts_boundary_odds() {
        assert!(prop_leg(100).validate().is_ok());
        assert!(prop_leg(-100).validate().is_ok());
        assert!(prop_leg(10_000).validate().is_ok());
        assert!(prop_leg(-10_000).validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_odds() {
        assert!(prop_leg(10_001).validate().is_err());
        assert!(prop_leg(-10_001).validate().is_err());
    }

    #[test]
    fn direction_sign_matches_convention() {
        assert_eq!(Direction::Over.sign(), 1.0);
        assert_eq!(Direction::Under.sign(), -1.0);
    }
}
