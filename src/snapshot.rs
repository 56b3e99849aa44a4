//! The read-only snapshot boundary (§6 External Interfaces).
//!
//! Marginal projections and pairwise correlations are produced by whatever
//! upstream modeling system owns them; this crate only consumes them. The
//! HTTP layer, database schema, and odds-ingestion workers that would
//! implement `SnapshotProvider` against a real store are out of scope here
//! (§1/§6 Non-goals) — this trait documents the boundary contract an
//! `Orchestrator` caller is expected to satisfy before filling in an
//! [`crate::orchestrator::EvaluateRequest`].

#[cfg(test)]
use mockall::automock;

use crate::domain::marginal::Marginal;

/// Read-only provider of per-game marginals and pairwise correlations.
///
/// Implementations are expected to be cheap to call repeatedly and to treat
/// their backing data as immutable for the lifetime of a request; the
/// evaluator never writes through this trait.
#[cfg_attr(test, automock)]
pub trait SnapshotProvider {
    /// Returns every marginal projection known for a game.
    fn get_marginals(&self, game_id: &str) -> Vec<Marginal>;

    /// Looks up the stored pairwise correlation between two (subject, stat)
    /// legs. `None` means no stored pair — callers impute 0, they don't
    /// treat it as an error (§7).
    fn get_pair_correlation(
        &self,
        subject_a: &str,
        stat_a: &str,
        subject_b: &str,
        stat_b: &str,
    ) -> Option<f64>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mocked_provider_round_trips_through_the_trait_object() {
        let mut mock = MockSnapshotProvider::new();
        mock.expect_get_marginals()
            .withf(|game_id| game_id == "game-1")
            .returning(|_| vec![]);
        mock.expect_get_pair_correlation()
            .returning(|_, _, _, _| Some(0.42));

        let provider: &dyn SnapshotProvider = &mock;
        assert!(provider.get_marginals("game-1").is_empty());
        assert_eq!(
            provider.get_pair_correlation("a", "pts", "b", "reb"),
            Some(0.42)
        );
    }
}
