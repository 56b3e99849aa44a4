//! Composes every stage into the single synchronous `evaluate` operation
//! (§4.9): quantize features, classify the regime, build standardized
//! thresholds, assemble and PSD-repair the correlation matrix, run the
//! copula Monte Carlo, estimate EV/CI, and attribute factors.
//!
//! The 500 ms deadline is checked between stages, never inside the sampler
//! (§5) — once the kernel launches it runs to completion. Exceeding the
//! deadline yields a degraded `Ok` response with `recommended=false`, not an
//! `Err`; only hard input/numerical failures propagate as `Err(EvalError)`.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::config::AppConfig;
use crate::correlation_assembler;
use crate::domain::correlation::CorrelationSnapshot;
use crate::domain::evaluation::{Explanation, ParlayEvaluation, SimulationMeta};
use crate::domain::game_context::GameContext;
use crate::domain::leg::Leg;
use crate::domain::marginal::Marginal;
use crate::error::{EvalError, Result};
use crate::estimator;
use crate::feature_quantizer;
use crate::marginal_builder;
use crate::psd;
use crate::regime;
use crate::xai;

/// Request payload for a single `evaluate` call (§6).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateRequest {
    pub game_context: GameContext,
    pub legs: Vec<Leg>,
    #[serde(default)]
    pub marginals: Vec<Marginal>,
    #[serde(default)]
    pub correlations: CorrelationSnapshot,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub sample_count: Option<usize>,
}

/// Deterministic fallback seed used when a request doesn't supply one.
/// Determinism still holds per-request; it's the cross-request default
/// that's fixed rather than time-derived, keeping `evaluate` a pure
/// function of its inputs.
const DEFAULT_SEED: u64 = 0x5EED_0000_0000_0000;

/// Holds the immutable, process-wide configuration and any startup-warmed
/// state. One `Orchestrator` is built per process and reused across requests.
pub struct Orchestrator {
    config: AppConfig,
}

impl Orchestrator {
    /// Builds the orchestrator and runs the startup warmup pass so the
    /// first real request doesn't pay rayon pool / allocator first-call cost.
    pub fn new(config: AppConfig) -> Self {
        crate::copula::warmup(config.simulation.warmup_sample_count);
        info!(warmup_samples = config.simulation.warmup_sample_count, "orchestrator warmed up");
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Runs the full pipeline for one parlay evaluation request.
    #[instrument(skip(self, request), fields(n_legs = request.legs.len()))]
    pub fn evaluate(&self, request: EvaluateRequest) -> Result<ParlayEvaluation> {
        let start = Instant::now();
        let deadline = Duration::from_millis(self.config.simulation.deadline_ms);
        let seed = request.seed.unwrap_or(DEFAULT_SEED);
        let n_samples = request
            .sample_count
            .unwrap_or(self.config.simulation.default_sample_count);

        for leg in &request.legs {
            leg.validate()?;
        }
        if request.legs.len() > self.config.simulation.max_legs {
            return Err(EvalError::TooManyLegs {
                max: self.config.simulation.max_legs,
                got: request.legs.len(),
            });
        }

        if let Some(degraded) = self.check_deadline(start, deadline, "feature_quantizer", seed) {
            return Ok(degraded);
        }
        let (adjusted_marginals, quantizer_ctx) =
            feature_quantizer::quantize(&request.game_context, request.marginals.clone(), &request.correlations);

        if let Some(degraded) = self.check_deadline(start, deadline, "regime", seed) {
            return Ok(degraded);
        }
        let mut assessment = regime::classify(&request.game_context);
        assessment.nu = assessment
            .nu
            .clamp(self.config.nu_bounds.min, self.config.nu_bounds.max);

        if let Some(degraded) = self.check_deadline(start, deadline, "marginal_builder", seed) {
            return Ok(degraded);
        }
        let standardized =
            marginal_builder::build(&request.legs, &adjusted_marginals, &request.game_context)?;

        if let Some(degraded) = self.check_deadline(start, deadline, "correlation_assembler", seed) {
            return Ok(degraded);
        }
        let assembled = correlation_assembler::assemble(
            &request.legs,
            &standardized,
            &request.correlations,
            assessment.corr_boost,
            self.config.simulation.max_legs,
        )?;

        if let Some(degraded) = self.check_deadline(start, deadline, "psd_repair", seed) {
            return Ok(degraded);
        }
        let l = psd::repair_and_factor(&assembled.matrix, &self.config.psd_repair)?;

        if let Some(degraded) = self.check_deadline(start, deadline, "copula_sampler", seed) {
            return Ok(degraded);
        }
        let thresholds: Vec<f64> = standardized.iter().map(|s| s.threshold).collect();
        let copula = crate::copula::sample(&l, &thresholds, assessment.nu, n_samples, seed)?;

        if let Some(degraded) = self.check_deadline(start, deadline, "estimator", seed) {
            return Ok(degraded);
        }
        let leg_odds: Vec<i32> = request.legs.iter().map(|leg| leg.odds_american).collect();
        let est = estimator::estimate(
            &copula,
            &leg_odds,
            quantizer_ctx.sentiment_shift,
            assessment.nu,
            self.config.kelly_cap,
        );

        let (factors, imputed_pairs) = xai::attribute(&quantizer_ctx, &assessment, &assembled);

        let elapsed_ms = start.elapsed().as_millis() as u64;
        Ok(ParlayEvaluation {
            recommended: est.recommended,
            true_probability: est.p,
            implied_probability: est.implied_probability,
            confidence_interval: [est.simulation.ci_low, est.simulation.ci_high],
            fair_odds_american: est.fair_odds_american,
            sportsbook_odds_american: est.sportsbook_odds_american,
            ev_pct: est.ev_pct,
            correlation_multiplier: est.simulation.corr_multiplier,
            tail_risk_factor: est.simulation.tail_risk,
            kelly_fraction: est.kelly_fraction,
            explanation: Explanation {
                regime: assessment.label,
                regime_reasoning: assessment.reasoning.clone(),
                factors,
                imputed_pairs,
            },
            simulation_meta: SimulationMeta {
                ms: elapsed_ms,
                n_samples,
                nu: assessment.nu,
                warmed_up: true,
                seed,
            },
            error_code: None,
        })
    }

    /// Returns a degraded response if the deadline has already elapsed
    /// before starting `stage`, else `None` to proceed.
    fn check_deadline(
        &self,
        start: Instant,
        deadline: Duration,
        stage: &str,
        seed: u64,
    ) -> Option<ParlayEvaluation> {
        let elapsed = start.elapsed();
        if elapsed <= deadline {
            return None;
        }
        warn!(stage, elapsed_ms = elapsed.as_millis() as u64, "deadline exceeded, returning degraded response");
        Some(ParlayEvaluation {
            recommended: false,
            true_probability: 0.0,
            implied_probability: 0.0,
            confidence_interval: [0.0, 0.0],
            fair_odds_american: 0,
            sportsbook_odds_american: 0,
            ev_pct: 0.0,
            correlation_multiplier: 0.0,
            tail_risk_factor: 0.0,
            kelly_fraction: 0.0,
            explanation: Explanation {
                regime: crate::domain::regime::RegimeLabel::Normal,
                regime_reasoning: "timeout".to_string(),
                factors: vec![],
                imputed_pairs: vec![],
            },
            simulation_meta: SimulationMeta {
                ms: elapsed.as_millis() as u64,
                n_samples: 0,
                nu: 0.0,
                warmed_up: true,
                seed,
            },
            error_code: Some("DEADLINE_EXCEEDED"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::leg::{Direction, LegKind};
    use crate::domain::marginal::DistFamily;

    fn prop_leg(subject: &str, stat: &str, line: f64, direction: Direction) -> Leg {
        Leg {
            kind: LegKind::PlayerProp,
            subject_id: Some(subject.to_string()),
            stat_kind: Some(stat.to_string()),
            line,
            direction,
            odds_american: -110,
        }
    }

    fn marginal(subject: &str, stat: &str, mean: f64, stddev: f64) -> Marginal {
        Marginal {
            subject_id: subject.to_string(),
            stat_kind: stat.to_string(),
            dist_family: DistFamily::Normal,
            params: vec![],
            mean,
            stddev,
            sample_size: 50,
        }
    }

    #[test]
    fn independent_two_leg_scenario_a_is_recommended() {
        let orch = Orchestrator::new(AppConfig::default_config());
        let request = EvaluateRequest {
            game_context: GameContext::default(),
            legs: vec![
                prop_leg("mahomes", "passing_yards", 265.5, Direction::Over),
                prop_leg("pacheco", "rushing_yards", 70.5, Direction::Over),
            ],
            marginals: vec![
                marginal("mahomes", "passing_yards", 265.0, 45.0),
                marginal("pacheco", "rushing_yards", 75.0, 22.0),
            ],
            correlations: CorrelationSnapshot::default(),
            seed: Some(42),
            sample_count: Some(10_000),
        };
        let result = orch.evaluate(request).unwrap();
        assert!(result.error_code.is_none());
        assert_eq!(result.simulation_meta.seed, 42);
        assert!(result.true_probability > 0.0 && result.true_probability < 1.0);
    }

    #[test]
    fn too_many_legs_rejected_before_any_stage_runs() {
        let orch = Orchestrator::new(AppConfig::default_config());
        let legs: Vec<Leg> = (0..7)
            .map(|i| prop_leg(&format!("p{i}"), "passing_yards", 10.0, Direction::Over))
            .collect();
        let marginals: Vec<Marginal> = (0..7)
            .map(|i| marginal(&format!("p{i}"), "passing_yards", 10.0, 1.0))
            .collect();
        let request = EvaluateRequest {
            game_context: GameContext::default(),
            legs,
            marginals,
            correlations: CorrelationSnapshot::default(),
            seed: Some(1),
            sample_count: Some(1_000),
        };
        let err = orch.evaluate(request).unwrap_err();
        assert!(matches!(err, EvalError::TooManyLegs { .. }));
    }

    #[test]
    fn missing_marginal_is_rejected() {
        let orch = Orchestrator::new(AppConfig::default_config());
        let request = EvaluateRequest {
            game_context: GameContext::default(),
            legs: vec![prop_leg("unknown", "passing_yards", 10.0, Direction::Over)],
            marginals: vec![],
            correlations: CorrelationSnapshot::default(),
            seed: Some(1),
            sample_count: Some(1_000),
        };
        let err = orch.evaluate(request).unwrap_err();
        assert!(matches!(err, EvalError::MarginalMissing { .. }));
    }

    #[test]
    fn exceeded_deadline_yields_degraded_not_err() {
        let orch = Orchestrator::new(AppConfig::default_config());
        let request = EvaluateRequest {
            game_context: GameContext::default(),
            legs: vec![prop_leg("mahomes", "passing_yards", 265.5, Direction::Over)],
            marginals: vec![marginal("mahomes", "passing_yards", 265.0, 45.0)],
            correlations: CorrelationSnapshot::default(),
            seed: Some(1),
            sample_count: Some(1_000),
        };
        // Simulate an already-elapsed deadline directly against the helper
        // rather than sleeping in a unit test.
        let degraded = orch
            .check_deadline(Instant::now() - Duration::from_secs(10), Duration::from_millis(500), "psd_repair", 1)
            .expect("deadline should be exceeded");
        assert!(!degraded.recommended);
        assert_eq!(degraded.error_code, Some("DEADLINE_EXCEEDED"));
        assert!(degraded.explanation.factors.is_empty());

        // The real pipeline still succeeds under a normal deadline.
        let result = orch.evaluate(request).unwrap();
        assert!(result.error_code.is_none());
    }
}
