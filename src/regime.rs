//! Maps game-level context to a regime label, a Student-t degrees-of-freedom
//! `nu`, and a correlation boost factor. First matching rule in the ladder
//! wins (§4.2).

use statrs::distribution::{ContinuousCDF, Normal};

use crate::domain::game_context::GameContext;
use crate::domain::regime::{RegimeAssessment, RegimeLabel};

const BLOWOUT_SPREAD: f64 = 10.0;
const SHOOTOUT_TOTAL: f64 = 52.0;
const SHOOTOUT_OFF_EFF: f64 = 0.10;
const DEFENSIVE_TOTAL: f64 = 40.0;
const DEFENSIVE_DEF_EFF: f64 = -0.10;
const OVERTIME_SPREAD: f64 = 3.0;
const OVERTIME_TOTAL_LOW: f64 = 44.0;
const OVERTIME_TOTAL_HIGH: f64 = 49.0;

/// Classifies a `GameContext` into a `Regime` using the first matching rule.
pub fn classify(ctx: &GameContext) -> RegimeAssessment {
    if let Some(spread) = ctx.spread {
        if spread.abs() >= BLOWOUT_SPREAD {
            let confidence = confidence_for(spread.abs(), BLOWOUT_SPREAD);
            return RegimeAssessment {
                label: RegimeLabel::Blowout,
                nu: 3.0,
                corr_boost: 1.25,
                reasoning: format!("spread {spread:.1} has magnitude >= {BLOWOUT_SPREAD}"),
                confidence,
            };
        }
    }

    if let (Some(total), Some(avg_off)) = (ctx.total, ctx.avg_off_eff()) {
        if total >= SHOOTOUT_TOTAL && avg_off >= SHOOTOUT_OFF_EFF {
            let confidence = confidence_for(total, SHOOTOUT_TOTAL).max(confidence_for(avg_off, SHOOTOUT_OFF_EFF));
            return RegimeAssessment {
                label: RegimeLabel::Shootout,
                nu: 4.0,
                corr_boost: 1.15,
                reasoning: format!(
                    "total {total:.1} >= {SHOOTOUT_TOTAL} and avg offensive efficiency {avg_off:.2} >= {SHOOTOUT_OFF_EFF}"
                ),
                confidence,
            };
        }
    }

    if let (Some(total), Some(avg_def)) = (ctx.total, ctx.avg_def_eff()) {
        if total <= DEFENSIVE_TOTAL && avg_def <= DEFENSIVE_DEF_EFF {
            let confidence = confidence_for(DEFENSIVE_TOTAL, total.max(1.0))
                .max(confidence_for(avg_def.abs(), DEFENSIVE_DEF_EFF.abs()));
            return RegimeAssessment {
                label: RegimeLabel::Defensive,
                nu: 6.0,
                corr_boost: 1.05,
                reasoning: format!(
                    "total {total:.1} <= {DEFENSIVE_TOTAL} and avg defensive efficiency {avg_def:.2} <= {DEFENSIVE_DEF_EFF}"
                ),
                confidence,
            };
        }
    }

    if let (Some(spread), Some(total)) = (ctx.spread, ctx.total) {
        if spread.abs() <= OVERTIME_SPREAD && (OVERTIME_TOTAL_LOW..=OVERTIME_TOTAL_HIGH).contains(&total) {
            let confidence = confidence_for(OVERTIME_SPREAD, spread.abs().max(0.01));
            return RegimeAssessment {
                label: RegimeLabel::OvertimeRisk,
                nu: 3.5,
                corr_boost: 1.20,
                reasoning: format!(
                    "spread {spread:.1} within +/-{OVERTIME_SPREAD} and total {total:.1} in [{OVERTIME_TOTAL_LOW},{OVERTIME_TOTAL_HIGH}]"
                ),
                confidence,
            };
        }
    }

    RegimeAssessment {
        label: RegimeLabel::Normal,
        nu: 5.0,
        corr_boost: 1.00,
        reasoning: "no blowout/shootout/defensive/overtime signal triggered".to_string(),
        confidence: 0.6,
    }
}

/// Strength of the triggering signal normalized against its rule threshold,
/// squashed through a standard normal CDF so confidence approaches but never
/// reaches 0.95 as the signal overshoots the threshold, and sits at 0.5
/// exactly at the threshold.
fn confidence_for(value: f64, threshold: f64) -> f64 {
    if threshold == 0.0 {
        return 0.5;
    }
    let overshoot = ((value / threshold) - 1.0).max(0.0);
    let cdf = Normal::new(0.0, 1.0)
        .expect("standard normal parameters are always valid")
        .cdf(overshoot * 2.0);
    (0.5 + 0.9 * (cdf - 0.5)).clamp(0.5, 0.95)
}
