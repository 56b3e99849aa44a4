//! Converts weather/injury/sentiment game context into numeric multipliers
//! and marginal adjustments, and records what it did so the XAI attributor
//! can explain it later without re-deriving the rules.

use crate::domain::correlation::CorrelationSnapshot;
use crate::domain::game_context::GameContext;
use crate::domain::marginal::{Marginal, StatCategory};

const WIND_THRESHOLD_LOW_MPH: f64 = 12.0;
const WIND_THRESHOLD_HIGH_MPH: f64 = 18.0;
const WIND_RATE_LOW: f64 = 0.02;
const WIND_BASE_HIGH: f64 = 0.12;
const WIND_RATE_HIGH: f64 = 0.03;
const WIND_PENALTY_CAP: f64 = 0.40;
const RUSHING_BOOST_FRACTION: f64 = 0.5;
const FIELD_GOAL_PENALTY_FRACTION: f64 = 0.8;
const COLD_THRESHOLD_F: f64 = 25.0;
const COLD_PENALTY_FRACTION: f64 = 0.03;
const PRECIP_PENALTY_RATE: f64 = 0.05;
const SENTIMENT_MAX_SHIFT: f64 = 0.10;

/// One named, signed adjustment applied during quantization — the raw
/// material the XAI attributor turns into ranked factors.
#[derive(Debug, Clone)]
pub struct NamedEffect {
    pub name: String,
    /// Additive change to a marginal's mean (negative = penalty).
    pub delta_mean: f64,
    /// Which subject/stat the effect landed on.
    pub subject_id: String,
    pub stat_kind: String,
    pub detail: String,
}

/// Side-channel state produced by quantization: every named effect applied,
/// plus the sentiment shift for the EV/CI stage.
#[derive(Debug, Clone, Default)]
pub struct QuantizerContext {
    pub effects: Vec<NamedEffect>,
    pub sentiment_shift: f64,
    pub wind_penalty: f64,
    pub field_goal_penalty_info: f64,
}

/// Computes the wind penalty on passing/receiving means for a given wind speed.
fn wind_penalty(wind_mph: f64) -> f64 {
    let penalty = if wind_mph < WIND_THRESHOLD_LOW_MPH {
        0.0
    } else if wind_mph <= WIND_THRESHOLD_HIGH_MPH {
        WIND_RATE_LOW * (wind_mph - WIND_THRESHOLD_LOW_MPH)
    } else {
        WIND_BASE_HIGH + WIND_RATE_HIGH * (wind_mph - WIND_THRESHOLD_HIGH_MPH)
    };
    penalty.min(WIND_PENALTY_CAP)
}

/// Applies the deterministic weather/injury rules (§4.1) to a snapshot of
/// marginals, returning the adjusted marginals and the context the XAI
/// attributor needs.
pub fn quantize(
    ctx: &GameContext,
    marginals: Vec<Marginal>,
    correlations: &CorrelationSnapshot,
) -> (Vec<Marginal>, QuantizerContext) {
    let mut out = marginals;
    let mut qctx = QuantizerContext::default();

    let wind = ctx.wind_mph.unwrap_or(0.0);
    let passing_wind_penalty = wind_penalty(wind);
    qctx.wind_penalty = passing_wind_penalty;
    qctx.field_goal_penalty_info = FIELD_GOAL_PENALTY_FRACTION * passing_wind_penalty;
    let rushing_boost = RUSHING_BOOST_FRACTION * passing_wind_penalty;

    let mut passing_penalty = passing_wind_penalty;
    if let Some(temp) = ctx.temp_f {
        if temp < COLD_THRESHOLD_F {
            passing_penalty += COLD_PENALTY_FRACTION * passing_wind_penalty;
        }
    }
    if let Some(precip) = ctx.precip_prob {
        passing_penalty += precip * PRECIP_PENALTY_RATE;
    }

    for m in out.iter_mut() {
        match m.stat_category() {
            StatCategory::Passing | StatCategory::Receiving if passing_penalty > 0.0 => {
                let delta = -m.mean * passing_penalty;
                qctx.effects.push(NamedEffect {
                    name: "weather_passing_penalty".to_string(),
                    delta_mean: delta,
                    subject_id: m.subject_id.clone(),
                    stat_kind: m.stat_kind.clone(),
                    detail: format!(
                        "wind {wind:.0}mph / temp / precip penalty {passing_penalty:.3}"
                    ),
                });
                m.mean += delta;
            }
            StatCategory::Rushing if rushing_boost > 0.0 => {
                let delta = m.mean * rushing_boost;
                qctx.effects.push(NamedEffect {
                    name: "weather_rushing_boost".to_string(),
                    delta_mean: delta,
                    subject_id: m.subject_id.clone(),
                    stat_kind: m.stat_kind.clone(),
                    detail: format!("wind-driven rushing boost {rushing_boost:.3}"),
                });
                m.mean += delta;
            }
            StatCategory::FieldGoal if qctx.field_goal_penalty_info > 0.0 => {
                let delta = -m.mean * qctx.field_goal_penalty_info;
                qctx.effects.push(NamedEffect {
                    name: "weather_field_goal_penalty".to_string(),
                    delta_mean: delta,
                    subject_id: m.subject_id.clone(),
                    stat_kind: m.stat_kind.clone(),
                    detail: format!("field goal penalty {:.3}", qctx.field_goal_penalty_info),
                });
                m.mean += delta;
            }
            _ => {}
        }
    }

    for injury in &ctx.injuries {
        let severity = injury.status.severity();
        for m in out.iter_mut() {
            let rho = correlations
                .get(&injury.player_id, "presence", &m.subject_id, &m.stat_kind)
                .unwrap_or(0.0);
            if rho == 0.0 {
                continue;
            }
            let delta = -severity * injury.impact * rho;
            let delta_mean = m.mean * delta;
            qctx.effects.push(NamedEffect {
                name: format!("injury:{}", injury.player_id),
                delta_mean,
                subject_id: m.subject_id.clone(),
                stat_kind: m.stat_kind.clone(),
                detail: format!(
                    "{} status={:?} impact={:.2} rho={:.2}",
                    injury.player_id, injury.status, injury.impact, rho
                ),
            });
            m.mean += delta_mean;
        }
    }

    if let Some(sentiment) = ctx.sentiment {
        qctx.sentiment_shift = ((sentiment - 0.5) * 2.0 * SENTIMENT_MAX_SHIFT).clamp(-SENTIMENT_MAX_SHIFT, SENTIMENT_MAX_SHIFT);
    }

    (out, qctx)
}
