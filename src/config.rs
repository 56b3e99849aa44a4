use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Process-wide evaluator configuration.
///
/// Built once at orchestrator construction and never mutated afterward —
/// the numerical core treats simulation constants, `nu` bounds, and the
/// Kelly cap as fixed inputs, not state.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub nu_bounds: NuBounds,
    #[serde(default = "default_kelly_cap")]
    pub kelly_cap: f64,
    #[serde(default)]
    pub psd_repair: PsdRepairConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    /// Default Monte Carlo sample count when a request doesn't override it.
    #[serde(default = "default_sample_count")]
    pub default_sample_count: usize,
    /// Sample count used by the orchestrator's startup warmup run.
    #[serde(default = "default_warmup_sample_count")]
    pub warmup_sample_count: usize,
    /// Maximum legs accepted in a single parlay (spec-mandated hard cap).
    #[serde(default = "default_max_legs")]
    pub max_legs: usize,
    /// Hard wall-clock deadline for a full `evaluate` call.
    #[serde(default = "default_deadline_ms")]
    pub deadline_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            default_sample_count: default_sample_count(),
            warmup_sample_count: default_warmup_sample_count(),
            max_legs: default_max_legs(),
            deadline_ms: default_deadline_ms(),
        }
    }
}

fn default_sample_count() -> usize {
    10_000
}
fn default_warmup_sample_count() -> usize {
    512
}
fn default_max_legs() -> usize {
    6
}
fn default_deadline_ms() -> u64 {
    500
}
fn default_kelly_cap() -> f64 {
    0.25
}

#[derive(Debug, Clone, Deserialize)]
pub struct NuBounds {
    #[serde(default = "default_nu_min")]
    pub min: f64,
    #[serde(default = "default_nu_max")]
    pub max: f64,
}

impl Default for NuBounds {
    fn default() -> Self {
        Self {
            min: default_nu_min(),
            max: default_nu_max(),
        }
    }
}

fn default_nu_min() -> f64 {
    2.5
}
fn default_nu_max() -> f64 {
    30.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct PsdRepairConfig {
    /// Floor applied to clipped eigenvalues during PSD repair.
    #[serde(default = "default_eigen_floor")]
    pub eigen_floor: f64,
    /// Starting ridge value; doubles on each retry.
    #[serde(default = "default_ridge_start")]
    pub ridge_start: f64,
    /// Ridge escalation ceases and `NonRepairableCorrelation` is raised past this.
    #[serde(default = "default_ridge_cap")]
    pub ridge_cap: f64,
}

impl Default for PsdRepairConfig {
    fn default() -> Self {
        Self {
            eigen_floor: default_eigen_floor(),
            ridge_start: default_ridge_start(),
            ridge_cap: default_ridge_cap(),
        }
    }
}

fn default_eigen_floor() -> f64 {
    1e-6
}
fn default_ridge_start() -> f64 {
    1e-4
}
fn default_ridge_cap() -> f64 {
    1e-1
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Enable JSON formatted logs
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Load configuration from a TOML file overridden by `PARLAY_*` env vars.
    pub fn load_from<P: AsRef<Path>>(config_path: P) -> Result<Self, ConfigError> {
        let path = config_path.as_ref();

        let mut builder = Config::builder()
            .set_default("simulation.default_sample_count", 10_000_i64)?
            .set_default("simulation.warmup_sample_count", 512_i64)?
            .set_default("simulation.max_legs", 6_i64)?
            .set_default("simulation.deadline_ms", 500_i64)?
            .set_default("nu_bounds.min", 2.5)?
            .set_default("nu_bounds.max", 30.0)?
            .set_default("kelly_cap", 0.25)?
            .set_default("psd_repair.eigen_floor", 1e-6)?
            .set_default("psd_repair.ridge_start", 1e-4)?
            .set_default("psd_repair.ridge_cap", 1e-1)?
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)?;

        if path.is_file() {
            builder = builder.add_source(File::from(path).required(true));
        } else {
            builder = builder.add_source(File::from(path.join("default.toml")).required(false));
        }

        builder = builder.add_source(
            Environment::with_prefix("PARLAY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Default configuration matching the spec's §9 global constants.
    pub fn default_config() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            nu_bounds: NuBounds::default(),
            kelly_cap: default_kelly_cap(),
            psd_repair: PsdRepairConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::default_config()
    }
}
