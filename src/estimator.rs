//! Derives independence baseline, correlation multiplier, confidence
//! interval, implied probability, EV%, fair odds, and Kelly fraction from a
//! raw copula output (§4.7).

use statrs::distribution::{ContinuousCDF, Normal};

use crate::copula::CopulaOutput;
use crate::domain::evaluation::SimulationResult;

const MIN_PROB: f64 = 0.01;
const MAX_PROB: f64 = 0.99;
const RECOMMEND_TOLERANCE: f64 = 0.02;

/// 97.5th percentile of the standard normal, i.e. the two-sided 95% Wilson
/// score z-value, computed rather than hand-copied so it can't drift from
/// whatever confidence level is actually wired in.
fn wilson_z() -> f64 {
    Normal::new(0.0, 1.0)
        .expect("standard normal parameters are always valid")
        .inverse_cdf(0.975)
}

/// American odds -> implied probability.
pub fn american_to_implied(odds: i32) -> f64 {
    if odds < 0 {
        let o = odds.unsigned_abs() as f64;
        o / (o + 100.0)
    } else {
        100.0 / (odds as f64 + 100.0)
    }
}

/// American odds -> decimal odds.
pub fn american_to_decimal(odds: i32) -> f64 {
    if odds < 0 {
        1.0 + 100.0 / odds.unsigned_abs() as f64
    } else {
        1.0 + odds as f64 / 100.0
    }
}

/// Decimal odds -> American odds.
pub fn decimal_to_american(decimal: f64) -> i32 {
    if decimal >= 2.0 {
        ((decimal - 1.0) * 100.0).round() as i32
    } else {
        (-100.0 / (decimal - 1.0)).round() as i32
    }
}

/// Wilson 95% confidence interval for a Bernoulli proportion.
pub fn wilson_ci(successes: u64, n: usize) -> (f64, f64) {
    let n = n as f64;
    let p_hat = successes as f64 / n;
    let z = wilson_z();
    let z2 = z * z;
    let denom = 1.0 + z2 / n;
    let center = p_hat + z2 / (2.0 * n);
    let margin = z * ((p_hat * (1.0 - p_hat) / n) + (z2 / (4.0 * n * n))).sqrt();
    ((center - margin) / denom, (center + margin) / denom)
}

/// Full EV/CI output for a parlay given its copula result and sportsbook odds.
#[derive(Debug, Clone)]
pub struct EstimatorOutput {
    pub simulation: SimulationResult,
    pub p: f64,
    pub implied_probability: f64,
    pub payout_multiple: f64,
    pub ev_pct: f64,
    pub fair_odds_american: i32,
    pub kelly_fraction: f64,
    pub sportsbook_odds_american: i32,
    pub recommended: bool,
}

/// Combines a copula output with per-leg American odds and a sentiment
/// shift to produce the full expected-value/confidence-interval picture.
pub fn estimate(
    copula: &CopulaOutput,
    leg_odds: &[i32],
    sentiment_shift: f64,
    nu: f64,
    kelly_cap: f64,
) -> EstimatorOutput {
    let independence_baseline: f64 = copula.per_leg_hit_rate.iter().product();
    let corr_multiplier = if independence_baseline > 0.0 {
        copula.true_prob / independence_baseline
    } else {
        0.0
    };

    let (ci_low, ci_high) = wilson_ci(copula.joint_hit_count, copula.n_samples);

    let p = (copula.true_prob + sentiment_shift).clamp(MIN_PROB, MAX_PROB);

    let implied_per_leg: Vec<f64> = leg_odds.iter().map(|&o| american_to_implied(o)).collect();
    let implied_probability: f64 = implied_per_leg.iter().product();

    let decimal_per_leg: Vec<f64> = leg_odds.iter().map(|&o| american_to_decimal(o)).collect();
    let payout_multiple: f64 = decimal_per_leg.iter().product();

    let ev_pct = (p * payout_multiple - 1.0) * 100.0;

    let fair_decimal = 1.0 / p;
    let fair_odds_american = decimal_to_american(fair_decimal);
    let sportsbook_odds_american = decimal_to_american(payout_multiple);

    let b = payout_multiple - 1.0;
    let kelly_fraction = if b > 0.0 {
        (((p * b) - (1.0 - p)) / b).clamp(0.0, kelly_cap)
    } else {
        0.0
    };

    let recommended = ev_pct > 0.0 && ci_low * payout_multiple > 1.0 - RECOMMEND_TOLERANCE;

    EstimatorOutput {
        simulation: SimulationResult {
            true_prob: copula.true_prob,
            ci_low,
            ci_high,
            corr_multiplier,
            tail_risk: 1.0 / nu,
            per_leg_hit_rate: copula.per_leg_hit_rate.clone(),
        },
        p,
        implied_probability,
        payout_multiple,
        ev_pct,
        fair_odds_american,
        kelly_fraction,
        sportsbook_odds_american,
        recommended,
    }
}
