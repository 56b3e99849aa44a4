//! Assembles a symmetric correlation matrix across legs: looks up pairwise
//! correlations, applies direction sign-flips and the regime's correlation
//! boost, and clips to a numerically safe range (§4.4).

use nalgebra::DMatrix;

use crate::domain::correlation::CorrelationSnapshot;
use crate::domain::leg::Leg;
use crate::error::{EvalError, Result};
use crate::marginal_builder::StandardizedLeg;

const CLIP_BOUND: f64 = 0.98;

/// Output of assembly: the matrix plus bookkeeping of which pairs had no
/// stored correlation and were imputed to 0.
pub struct AssembledCorrelation {
    pub matrix: DMatrix<f64>,
    pub imputed_pairs: Vec<(String, String, String, String)>,
}

/// Builds the n x n correlation matrix for the given legs.
///
/// `max_legs` enforces the spec's hard cap; above it the assembler rejects
/// with `TooManyLegs` rather than silently truncating.
pub fn assemble(
    legs: &[Leg],
    standardized: &[StandardizedLeg],
    snapshot: &CorrelationSnapshot,
    corr_boost: f64,
    max_legs: usize,
) -> Result<AssembledCorrelation> {
    let n = legs.len();
    if n > max_legs {
        return Err(EvalError::TooManyLegs { max: max_legs, got: n });
    }

    let mut matrix = DMatrix::<f64>::identity(n, n);
    let mut imputed_pairs = Vec::new();

    for i in 0..n {
        for j in (i + 1)..n {
            let a = &standardized[i];
            let b = &standardized[j];

            let (rho, imputed) = match snapshot.get(&a.subject_id, &a.stat_kind, &b.subject_id, &b.stat_kind) {
                Some(rho) => (rho, false),
                None => (0.0, true),
            };

            if imputed {
                imputed_pairs.push((
                    a.subject_id.clone(),
                    a.stat_kind.clone(),
                    b.subject_id.clone(),
                    b.stat_kind.clone(),
                ));
            }

            let sign_i = legs[i].direction.sign();
            let sign_j = legs[j].direction.sign();
            let flipped = rho * sign_i * sign_j;
            let boosted = flipped * corr_boost;
            let clipped = boosted.clamp(-CLIP_BOUND, CLIP_BOUND);

            matrix[(i, j)] = clipped;
            matrix[(j, i)] = clipped;
        }
    }

    Ok(AssembledCorrelation {
        matrix,
        imputed_pairs,
    })
}
