//! Enforces positive-semi-definiteness on the assembled correlation matrix
//! and computes its Cholesky factor, escalating from eigenvalue clipping to
//! a ridge blend if needed (§4.5).

use nalgebra::{Cholesky, DMatrix, SymmetricEigen};

use crate::config::PsdRepairConfig;
use crate::error::{EvalError, Result};

/// Attempts a plain Cholesky factorization of `r`.
fn try_cholesky(r: &DMatrix<f64>) -> Option<DMatrix<f64>> {
    Cholesky::new(r.clone()).map(|c| c.l())
}

/// Clips negative/near-zero eigenvalues to `floor`, reconstructs the matrix,
/// and rescales it back to a unit-diagonal correlation matrix.
fn eigen_clip_repair(r: &DMatrix<f64>, floor: f64) -> DMatrix<f64> {
    let eigen = SymmetricEigen::new(r.clone());
    let clipped_values = eigen.eigenvalues.map(|lambda| lambda.max(floor));
    let reconstructed = &eigen.eigenvectors
        * DMatrix::from_diagonal(&clipped_values)
        * eigen.eigenvectors.transpose();

    let n = reconstructed.nrows();
    let mut rescaled = reconstructed.clone();
    for i in 0..n {
        for j in 0..n {
            let denom = (reconstructed[(i, i)] * reconstructed[(j, j)]).sqrt();
            rescaled[(i, j)] = if denom > 0.0 {
                reconstructed[(i, j)] / denom
            } else {
                if i == j {
                    1.0
                } else {
                    0.0
                }
            };
        }
    }
    rescaled
}

/// Blends `r` toward the identity by `eps` — the last-resort escalation path.
fn ridge_blend(r: &DMatrix<f64>, eps: f64) -> DMatrix<f64> {
    let n = r.nrows();
    let identity = DMatrix::<f64>::identity(n, n);
    r * (1.0 - eps) + identity * eps
}

/// Repairs `r` into a valid correlation matrix and returns its lower
/// triangular Cholesky factor `L` such that `L * L^T ≈ r_repaired`.
pub fn repair_and_factor(r: &DMatrix<f64>, cfg: &PsdRepairConfig) -> Result<DMatrix<f64>> {
    if let Some(l) = try_cholesky(r) {
        return Ok(l);
    }

    let clipped = eigen_clip_repair(r, cfg.eigen_floor);
    if let Some(l) = try_cholesky(&clipped) {
        return Ok(l);
    }

    let mut eps = cfg.ridge_start;
    let mut current = clipped;
    while eps <= cfg.ridge_cap {
        let ridged = ridge_blend(&current, eps);
        if let Some(l) = try_cholesky(&ridged) {
            return Ok(l);
        }
        current = ridged;
        eps *= 2.0;
    }

    Err(EvalError::NonRepairableCorrelation {
        attempted_ridge: eps,
    })
}
