//! Shared value types for the parlay evaluator, following the teacher's
//! convention of a `domain` module holding request/response value objects
//! with no behavior beyond validation and small conversions.

pub mod correlation;
pub mod evaluation;
pub mod game_context;
pub mod leg;
pub mod marginal;
pub mod regime;

pub use correlation::{CorrelationKey, CorrelationSnapshot, PairCorrelation};
pub use evaluation::{
    Explanation, Factor, FactorDirection, ParlayEvaluation, SimulationMeta, SimulationResult,
};
pub use game_context::{GameContext, Injury, InjuryStatus};
pub use leg::{Direction, Leg, LegKind};
pub use marginal::{DistFamily, Marginal};
pub use regime::{RegimeAssessment, RegimeLabel};
