pub mod cli;
pub mod config;
pub mod copula;
pub mod correlation_assembler;
pub mod domain;
pub mod error;
pub mod estimator;
pub mod feature_quantizer;
pub mod marginal_builder;
pub mod orchestrator;
pub mod psd;
pub mod regime;
pub mod snapshot;
pub mod xai;

pub use config::AppConfig;
pub use error::{EvalError, Result};
pub use orchestrator::{EvaluateRequest, Orchestrator};
pub use snapshot::SnapshotProvider;
