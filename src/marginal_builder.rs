//! For each leg, produces a standardized threshold `z` and direction sign
//! from a player projection (or a synthetic game-level projection for
//! spread/total/moneyline legs) plus the line (§4.3).

use crate::domain::game_context::GameContext;
use crate::domain::leg::{Leg, LegKind};
use crate::domain::marginal::{DistFamily, Marginal};
use crate::error::{EvalError, Result};

/// NFL canonical spread/total standard deviations used to build a synthetic
/// marginal when a leg has no player projection backing it.
pub const SPREAD_STDDEV: f64 = 13.86;
pub const TOTAL_STDDEV: f64 = 10.66;

/// A leg reduced to the copula's standardized-threshold convention: the
/// sampler's "win" test becomes `standardized_sample > threshold`.
#[derive(Debug, Clone)]
pub struct StandardizedLeg {
    pub subject_id: String,
    pub stat_kind: String,
    pub threshold: f64,
    pub sign: f64,
    pub mean: f64,
    pub stddev: f64,
}

/// Builds a synthetic marginal for spread/total/moneyline legs from the
/// game-level projection, since these aren't backed by a player projection.
fn synthetic_marginal(leg: &Leg, ctx: &GameContext) -> Option<Marginal> {
    let subject_id = leg
        .subject_id
        .clone()
        .unwrap_or_else(|| "__game__".to_string());
    match leg.kind {
        LegKind::Spread => {
            let projected_margin = ctx.spread.unwrap_or(0.0);
            Some(Marginal {
                subject_id,
                stat_kind: "spread_margin".to_string(),
                dist_family: DistFamily::Normal,
                params: vec![],
                mean: projected_margin,
                stddev: SPREAD_STDDEV,
                sample_size: 0,
            })
        }
        LegKind::Total => {
            let projected_total = ctx.total.unwrap_or(0.0);
            Some(Marginal {
                subject_id,
                stat_kind: "game_total".to_string(),
                dist_family: DistFamily::Normal,
                params: vec![],
                mean: projected_total,
                stddev: TOTAL_STDDEV,
                sample_size: 0,
            })
        }
        LegKind::Moneyline => {
            let projected_margin = ctx.spread.unwrap_or(0.0);
            Some(Marginal {
                subject_id,
                stat_kind: "moneyline_margin".to_string(),
                dist_family: DistFamily::Normal,
                params: vec![],
                mean: projected_margin,
                stddev: SPREAD_STDDEV,
                sample_size: 0,
            })
        }
        LegKind::PlayerProp => None,
    }
}

/// Finds the matching marginal for a leg, synthesizing one for non-prop legs.
fn resolve_marginal(leg: &Leg, marginals: &[Marginal], ctx: &GameContext) -> Result<Marginal> {
    if leg.kind == LegKind::PlayerProp {
        let subject_id = leg.subject_id.clone().unwrap_or_default();
        let stat_kind = leg.stat_kind.clone().unwrap_or_default();
        return marginals
            .iter()
            .find(|m| m.subject_id == subject_id && m.stat_kind == stat_kind)
            .cloned()
            .ok_or(EvalError::MarginalMissing {
                subject_id,
                stat_kind,
            });
    }

    // Non-prop legs may still have an explicit marginal supplied (overriding
    // the synthetic one); prefer that if present.
    if let Some(subject_id) = &leg.subject_id {
        if let Some(found) = marginals
            .iter()
            .find(|m| &m.subject_id == subject_id && Some(&m.stat_kind) == leg.stat_kind.as_ref())
        {
            return Ok(found.clone());
        }
    }

    synthetic_marginal(leg, ctx).ok_or_else(|| EvalError::MarginalMissing {
        subject_id: leg.subject_id.clone().unwrap_or_default(),
        stat_kind: leg.stat_kind.clone().unwrap_or_default(),
    })
}

/// Builds the standardized threshold for every leg in the parlay.
pub fn build(legs: &[Leg], marginals: &[Marginal], ctx: &GameContext) -> Result<Vec<StandardizedLeg>> {
    legs.iter()
        .map(|leg| {
            let marginal = resolve_marginal(leg, marginals, ctx)?;
            let sign = leg.direction.sign();
            let threshold = sign * (marginal.mean - leg.line) / marginal.stddev;
            Ok(StandardizedLeg {
                subject_id: marginal.subject_id,
                stat_kind: marginal.stat_kind,
                threshold,
                sign,
                mean: marginal.mean,
                stddev: marginal.stddev,
            })
        })
        .collect()
}
