//! End-to-end scenarios, one per literal worked example.

use parlay_eval::config::AppConfig;
use parlay_eval::domain::correlation::{CorrelationSnapshot, PairCorrelation};
use parlay_eval::domain::game_context::GameContext;
use parlay_eval::domain::leg::{Direction, Leg, LegKind};
use parlay_eval::domain::marginal::{DistFamily, Marginal};
use parlay_eval::estimator;
use parlay_eval::orchestrator::{EvaluateRequest, Orchestrator};

fn prop_leg(subject: &str, stat: &str, line: f64, direction: Direction, odds: i32) -> Leg {
    Leg {
        kind: LegKind::PlayerProp,
        subject_id: Some(subject.to_string()),
        stat_kind: Some(stat.to_string()),
        line,
        direction,
        odds_american: odds,
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
        sample_size: 100,
    }
}

/// Scenario A — independent 2-leg over, positive EV.
#[test]
fn scenario_a_independent_two_leg_positive_ev() {
    let orch = Orchestrator::new(AppConfig::default_config());
    let request = EvaluateRequest {
        game_context: GameContext::default(),
        legs: vec![
            prop_leg("qb1", "passing_yards", 265.5, Direction::Over, -110),
            prop_leg("rb1", "rushing_yards", 70.5, Direction::Over, -110),
        ],
        marginals: vec![
            marginal("qb1", "passing_yards", 265.0, 45.0),
            marginal("rb1", "rushing_yards", 75.0, 22.0),
        ],
        correlations: CorrelationSnapshot::default(),
        seed: Some(42),
        sample_count: Some(10_000),
    };
    let result = orch.evaluate(request).unwrap();
    assert_eq!(result.simulation_meta.n_samples, 10_000);
    assert!((result.true_probability - 0.285).abs() < 0.03, "true_prob={}", result.true_probability);
    assert!(result.ev_pct > 0.0, "ev_pct={}", result.ev_pct);
}

/// Scenario B — positively correlated same-team QB/WR in a BLOWOUT regime
/// lifts true_prob and the correlation multiplier above the independent case.
#[test]
fn scenario_b_correlated_blowout_lifts_true_prob() {
    let snap = CorrelationSnapshot::new(vec![PairCorrelation {
        subject_a: "qb1".into(),
        stat_a: "passing_yards".into(),
        subject_b: "wr1".into(),
        stat_b: "receiving_yards".into(),
        rho: 0.65,
    }]);
    let ctx = GameContext {
        spread: Some(14.0),
        ..Default::default()
    };
    let request = EvaluateRequest {
        game_context: ctx,
        legs: vec![
            prop_leg("qb1", "passing_yards", 265.5, Direction::Over, -110),
            prop_leg("wr1", "receiving_yards", 70.5, Direction::Over, -110),
        ],
        marginals: vec![
            marginal("qb1", "passing_yards", 265.0, 45.0),
            marginal("wr1", "receiving_yards", 75.0, 22.0),
        ],
        correlations: snap,
        seed: Some(42),
        sample_count: Some(10_000),
    };
    let orch = Orchestrator::new(AppConfig::default_config());
    let correlated = orch.evaluate(request.clone()).unwrap();

    let mut independent_request = request;
    independent_request.correlations = CorrelationSnapshot::default();
    independent_request.game_context = GameContext::default();
    let independent = orch.evaluate(independent_request).unwrap();

    assert!(correlated.true_probability > independent.true_probability);
    assert!(correlated.correlation_multiplier > 1.0);
}

/// Scenario C — flipping one leg to "under" inverts the sign of its
/// correlation column and should noticeably reduce true_prob relative to
/// the independence product.
#[test]
fn scenario_c_under_flip_reduces_joint_probability() {
    let snap = CorrelationSnapshot::new(vec![PairCorrelation {
        subject_a: "qb1".into(),
        stat_a: "passing_yards".into(),
        subject_b: "wr1".into(),
        stat_b: "receiving_yards".into(),
        rho: 0.65,
    }]);
    let ctx = GameContext {
        spread: Some(14.0),
        ..Default::default()
    };

    let marginals = vec![
        marginal("qb1", "passing_yards", 265.0, 45.0),
        marginal("wr1", "receiving_yards", 75.0, 22.0),
    ];

    let orch = Orchestrator::new(AppConfig::default_config());

    let over_over = EvaluateRequest {
        game_context: ctx.clone(),
        legs: vec![
            prop_leg("qb1", "passing_yards", 265.5, Direction::Over, -110),
            prop_leg("wr1", "receiving_yards", 70.5, Direction::Over, -110),
        ],
        marginals: marginals.clone(),
        correlations: snap.clone(),
        seed: Some(42),
        sample_count: Some(10_000),
    };
    let over_under = EvaluateRequest {
        game_context: ctx,
        legs: vec![
            prop_leg("qb1", "passing_yards", 265.5, Direction::Over, -110),
            prop_leg("wr1", "receiving_yards", 70.5, Direction::Under, -110),
        ],
        marginals,
        correlations: snap,
        seed: Some(42),
        sample_count: Some(10_000),
    };

    let oo = orch.evaluate(over_over).unwrap();
    let ou = orch.evaluate(over_under).unwrap();

    assert!(ou.true_probability < oo.true_probability);
}

/// Scenario D — a 3-leg indefinite correlation matrix repairs cleanly via
/// eigenvalue clipping and produces a valid true_prob with no imputation.
#[test]
fn scenario_d_indefinite_three_leg_repairs_via_eigen_clip() {
    let snap = CorrelationSnapshot::new(vec![
        PairCorrelation {
            subject_a: "a".into(),
            stat_a: "s".into(),
            subject_b: "b".into(),
            stat_b: "s".into(),
            rho: 0.9,
        },
        PairCorrelation {
            subject_a: "a".into(),
            stat_a: "s".into(),
            subject_b: "c".into(),
            stat_b: "s".into(),
            rho: 0.9,
        },
        PairCorrelation {
            subject_a: "b".into(),
            stat_a: "s".into(),
            subject_b: "c".into(),
            stat_b: "s".into(),
            rho: -0.9,
        },
    ]);
    let request = EvaluateRequest {
        game_context: GameContext::default(),
        legs: vec![
            prop_leg("a", "s", 10.0, Direction::Over, -110),
            prop_leg("b", "s", 10.0, Direction::Over, -110),
            prop_leg("c", "s", 10.0, Direction::Over, -110),
        ],
        marginals: vec![
            marginal("a", "s", 12.0, 3.0),
            marginal("b", "s", 12.0, 3.0),
            marginal("c", "s", 12.0, 3.0),
        ],
        correlations: snap,
        seed: Some(7),
        sample_count: Some(10_000),
    };
    let orch = Orchestrator::new(AppConfig::default_config());
    let result = orch.evaluate(request).unwrap();
    assert!(result.true_probability > 0.0 && result.true_probability < 1.0);
    assert!(result.explanation.imputed_pairs.is_empty());
}

/// Scenario E — an unreachable deadline degrades instead of erroring.
#[test]
fn scenario_e_deadline_exceeded_yields_degraded_response() {
    let mut cfg = AppConfig::default_config();
    cfg.simulation.deadline_ms = 0;
    let orch = Orchestrator::new(cfg);
    let request = EvaluateRequest {
        game_context: GameContext::default(),
        legs: vec![prop_leg("qb1", "passing_yards", 265.5, Direction::Over, -110)],
        marginals: vec![marginal("qb1", "passing_yards", 265.0, 45.0)],
        correlations: CorrelationSnapshot::default(),
        seed: Some(1),
        sample_count: Some(1_000),
    };
    let result = orch.evaluate(request).unwrap();
    assert!(!result.recommended);
    assert_eq!(result.error_code, Some("DEADLINE_EXCEEDED"));
    assert!(result.explanation.factors.is_empty());
}

/// Scenario F — American-odds boundary conversions round-trip.
#[test]
fn scenario_f_american_odds_boundary_conversions() {
    assert!((estimator::american_to_decimal(100) - 2.0).abs() < 1e-9);
    assert!((estimator::american_to_implied(100) - 0.5).abs() < 1e-9);
    assert!((estimator::american_to_decimal(-100) - 2.0).abs() < 1e-9);
    assert!((estimator::american_to_implied(-100) - 0.5).abs() < 1e-9);
    assert!((estimator::american_to_decimal(250) - 3.5).abs() < 1e-9);
    assert!((estimator::american_to_implied(250) - 0.2857142857).abs() < 1e-6);
    assert!((estimator::american_to_decimal(-110) - 1.909_090_909).abs() < 1e-6);
    assert!((estimator::american_to_implied(-110) - 0.523_809_52).abs() < 1e-6);

    for odds in [-10_000, -500, -110, -100, 100, 150, 250, 10_000] {
        let decimal = estimator::american_to_decimal(odds);
        let back = estimator::american_to_decimal(estimator::decimal_to_american(decimal));
        assert!((decimal - back).abs() < 1e-9, "odds={odds}");
    }
}
