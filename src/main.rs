use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use parlay_eval::cli::{Cli, Commands};
use parlay_eval::config::AppConfig;
use parlay_eval::orchestrator::{EvaluateRequest, Orchestrator};

fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = Cli::parse();

    let config = AppConfig::load_from(&cli.config).unwrap_or_else(|e| {
        warn!("failed to load config from {:?}: {}, using defaults", cli.config, e);
        AppConfig::default_config()
    });

    match cli.command {
        Commands::Evaluate { request, seed } => {
            let orchestrator = Orchestrator::new(config);

            let body = std::fs::read_to_string(&request)?;
            let mut req: EvaluateRequest = serde_json::from_str(&body)?;
            if seed.is_some() {
                req.seed = seed;
            }

            match orchestrator.evaluate(req) {
                Ok(evaluation) => {
                    info!(recommended = evaluation.recommended, "evaluation complete");
                    println!("{}", serde_json::to_string_pretty(&evaluation)?);
                }
                Err(e) => {
                    error!(wire_code = e.wire_code(), "evaluation failed: {e}");
                    return Err(e.into());
                }
            }
        }
        Commands::Warmup => {
            let orchestrator = Orchestrator::new(config);
            info!(
                warmup_samples = orchestrator.config().simulation.warmup_sample_count,
                "warmup complete"
            );
        }
    }

    Ok(())
}

/// Installs a single process-wide `tracing` subscriber. CLI invocations are
/// one-shot, so there's no per-request re-initialization and no rolling
/// file sink — just an env-filtered console layer.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,parlay_eval=debug"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
