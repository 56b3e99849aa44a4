//! Turns the quantizer's named effects and the assembler's imputed pairs
//! into a ranked, human-readable list of factors (§4.8).
//!
//! There's no model to introspect here, so "explainability" means reporting
//! the deterministic adjustments that were actually applied rather than
//! approximating a black box: every [`Factor`] traces back to a concrete
//! [`NamedEffect`] or bookkeeping note from an earlier stage.

use crate::correlation_assembler::AssembledCorrelation;
use crate::domain::evaluation::{Factor, FactorDirection};
use crate::domain::regime::RegimeAssessment;
use crate::feature_quantizer::QuantizerContext;

const MAX_FACTORS: usize = 8;
/// Plausible largest single-effect delta-mean fraction, used to normalize
/// raw effect magnitudes into a [0, 1] confidence band.
const PLAUSIBLE_MAX_IMPACT: f64 = 0.40;

/// Builds the ranked factor list plus the normalized imputed-pair list for
/// the explanation block of a `ParlayEvaluation`.
pub fn attribute(
    quantizer_ctx: &QuantizerContext,
    regime: &RegimeAssessment,
    assembled: &AssembledCorrelation,
) -> (Vec<Factor>, Vec<(String, String, String, String)>) {
    let mut factors: Vec<Factor> = quantizer_ctx
        .effects
        .iter()
        .map(|effect| {
            let direction = if effect.delta_mean >= 0.0 {
                FactorDirection::Positive
            } else {
                FactorDirection::Negative
            };
            let confidence = (effect.delta_mean.abs() / PLAUSIBLE_MAX_IMPACT).clamp(0.0, 1.0);
            Factor {
                name: effect.name.clone(),
                impact: effect.delta_mean,
                direction,
                detail: format!("{} ({}/{})", effect.detail, effect.subject_id, effect.stat_kind),
                confidence,
            }
        })
        .collect();

    if quantizer_ctx.sentiment_shift.abs() > 0.0 {
        let direction = if quantizer_ctx.sentiment_shift >= 0.0 {
            FactorDirection::Positive
        } else {
            FactorDirection::Negative
        };
        factors.push(Factor {
            name: "market_sentiment".to_string(),
            impact: quantizer_ctx.sentiment_shift,
            direction,
            detail: format!(
                "sentiment shifted the posterior win probability by {:.3} without touching any marginal",
                quantizer_ctx.sentiment_shift
            ),
            confidence: (quantizer_ctx.sentiment_shift.abs() / 0.10).clamp(0.0, 1.0),
        });
    }

    if (regime.corr_boost - 1.0).abs() > 1e-9 {
        factors.push(Factor {
            name: format!("regime:{:?}", regime.label).to_lowercase(),
            impact: regime.corr_boost - 1.0,
            direction: FactorDirection::Positive,
            detail: regime.reasoning.clone(),
            confidence: regime.confidence,
        });
    }

    if !assembled.imputed_pairs.is_empty() {
        factors.push(Factor {
            name: "imputed_correlations".to_string(),
            impact: 0.0,
            direction: FactorDirection::Negative,
            detail: format!(
                "{} leg pair(s) had no stored correlation and were imputed to 0",
                assembled.imputed_pairs.len()
            ),
            confidence: 0.5,
        });
    }

    factors.sort_by(|a, b| b.impact.abs().partial_cmp(&a.impact.abs()).unwrap());
    factors.truncate(MAX_FACTORS);

    (factors, assembled.imputed_pairs.clone())
}
