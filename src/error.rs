use thiserror::Error;

/// Main error type for the parlay evaluator.
///
/// Variants map 1:1 onto the wire error codes the evaluate operation can
/// surface; see [`EvalError::wire_code`].
#[derive(Error, Debug)]
pub enum EvalError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    // Input validation errors — reject immediately, no partial work.
    #[error("Invalid leg: {0}")]
    InvalidLeg(String),

    #[error("Too many legs: max {max}, got {got}")]
    TooManyLegs { max: usize, got: usize },

    #[error("Degrees of freedom too low: nu={nu} (must be > 2)")]
    DegreesOfFreedomTooLow { nu: f64 },

    // Data-availability errors
    #[error("Marginal missing for subject={subject_id} stat={stat_kind}")]
    MarginalMissing {
        subject_id: String,
        stat_kind: String,
    },

    // Numerical errors — surfaced after PSD repair exhausts ridge escalation.
    #[error("Correlation matrix not repairable: ridge reached {attempted_ridge}")]
    NonRepairableCorrelation { attempted_ridge: f64 },

    // Resource errors
    #[error("Deadline exceeded at stage '{stage}' after {elapsed_ms}ms")]
    DeadlineExceeded { stage: String, elapsed_ms: u64 },

    // Serialization errors
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Generic errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for `EvalError`.
pub type Result<T> = std::result::Result<T, EvalError>;

impl EvalError {
    /// Stable wire error code as defined in the evaluate operation's result schema.
    pub fn wire_code(&self) -> &'static str {
        match self {
            EvalError::InvalidLeg(_) => "INVALID_LEG",
            EvalError::TooManyLegs { .. } => "TOO_MANY_LEGS",
            EvalError::MarginalMissing { .. } => "MARGINAL_MISSING",
            EvalError::NonRepairableCorrelation { .. } => "NON_REPAIRABLE_CORRELATION",
            EvalError::DegreesOfFreedomTooLow { .. } => "DEGREES_OF_FREEDOM_TOO_LOW",
            EvalError::DeadlineExceeded { .. } => "DEADLINE_EXCEEDED",
            EvalError::Config(_) | EvalError::Json(_) | EvalError::Io(_) | EvalError::Internal(_) => {
                "INTERNAL"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_codes_match_spec_taxonomy() {
        assert_eq!(
            EvalError::InvalidLeg("bad".into()).wire_code(),
            "INVALID_LEG"
        );
        assert_eq!(
            EvalError::TooManyLegs { max: 6, got: 7 }.wire_code(),
            "TOO_MANY_LEGS"
        );
        assert_eq!(
            EvalError::MarginalMissing {
                subject_id: "p1".into(),
                stat_kind: "rec_yards".into()
            }
            .wire_code(),
            "MARGINAL_MISSING"
        );
        assert_eq!(
            EvalError::NonRepairableCorrelation {
                attempted_ridge: 0.2
            }
            .wire_code(),
            "NON_REPAIRABLE_CORRELATION"
        );
        assert_eq!(
            EvalError::DegreesOfFreedomTooLow { nu: 1.5 }.wire_code(),
            "DEGREES_OF_FREEDOM_TOO_LOW"
        );
        assert_eq!(
            EvalError::DeadlineExceeded {
                stage: "psd_repair".into(),
                elapsed_ms: 600
            }
            .wire_code(),
            "DEADLINE_EXCEEDED"
        );
    }
}
