//! rigbook - drilling time reconciliation CLI
//!
//! # Usage
//!
//! ```bash
//! # Reconcile captures from a JSON file (one request or an array)
//! rigbook reconcile --input captures.json --catalog causes.json
//!
//! # Print the effective configuration and standards tables
//! rigbook standards
//!
//! # Efficiency of a single activity
//! rigbook efficiency --standard 5 --real 7
//! ```
//!
//! # Environment Variables
//!
//! - `RIGBOOK_CONFIG`: Path to the engine config (default: ./rigbook.toml)
//! - `RUST_LOG`: Logging level (default: info)
//!
//! Pass `--log-json` for machine-readable log lines.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use rigbook::{
    efficiency, CaptureContext, CaptureRequest, EngineConfig, InMemoryCatalog, LedgerTotals,
    Reconciliation, ReconciliationEngine,
};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "rigbook")]
#[command(about = "Standard-vs-actual drilling time reconciliation")]
#[command(version)]
struct CliArgs {
    /// Engine config file (overrides RIGBOOK_CONFIG and ./rigbook.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit log lines as JSON objects on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: SubCommand,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Reconcile one or more capture requests and print the ledger rows
    Reconcile {
        /// JSON file holding a capture request or an array of them
        #[arg(long)]
        input: PathBuf,
        /// JSON cause catalog to check causes against. Its `tnp_fallback`
        /// key, when present, wins over `[catalog] tnp_fallback` in the config
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Print the effective configuration, standards tables included
    Standards,

    /// Efficiency percentage and severity for one activity
    Efficiency {
        /// Standard duration (hours)
        #[arg(long)]
        standard: f64,
        /// Real duration (hours)
        #[arg(long)]
        real: f64,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CaptureInput {
    Many(Vec<CaptureRequest>),
    One(CaptureRequest),
}

#[derive(Serialize)]
struct ReconcileReport {
    reconciliations: Vec<Reconciliation>,
    rejected: usize,
    totals: LedgerTotals,
}

// ============================================================================
// Commands
// ============================================================================

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(p) => EngineConfig::load_from_file(p)
            .with_context(|| format!("Failed to load config {}", p.display())),
        None => Ok(EngineConfig::load()),
    }
}

fn load_catalog(path: Option<&Path>, config: &EngineConfig) -> Result<InMemoryCatalog> {
    let fallback = config.catalog.tnp_fallback;
    match path {
        Some(p) => {
            let raw = std::fs::read_to_string(p)
                .with_context(|| format!("Failed to read catalog {}", p.display()))?;
            InMemoryCatalog::from_json(&raw, fallback)
                .with_context(|| format!("Failed to parse catalog {}", p.display()))
        }
        None => Ok(InMemoryCatalog {
            tnp_fallback: fallback,
            ..InMemoryCatalog::default()
        }),
    }
}

fn run_reconcile(config: &EngineConfig, input: &Path, catalog: Option<&Path>) -> Result<()> {
    let raw = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let requests = match serde_json::from_str::<CaptureInput>(&raw)
        .with_context(|| format!("Failed to parse capture requests in {}", input.display()))?
    {
        CaptureInput::Many(requests) => requests,
        CaptureInput::One(request) => vec![request],
    };

    let engine = ReconciliationEngine::from_config(config);
    let mut ctx = CaptureContext::new(load_catalog(catalog, config)?);
    let check_causes = catalog.is_some();

    let mut reconciliations = Vec::with_capacity(requests.len());
    let mut rejected = 0;
    for request in &requests {
        match ctx.submit(&engine, request) {
            Ok(reconciliation) => {
                if check_causes {
                    for unknown in ctx.unknown_causes(&reconciliation) {
                        error!(
                            activity_id = %reconciliation.activity_id,
                            "Cause {} / {} is not in the {} catalog",
                            unknown.category, unknown.detail, unknown.domain
                        );
                    }
                }
                reconciliations.push(reconciliation);
            }
            Err(e) => {
                error!(activity_id = %request.info().activity_id, "Rejected: {}", e);
                rejected += 1;
            }
        }
    }

    let report = ReconcileReport {
        reconciliations,
        rejected,
        totals: ctx.ledger.totals(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    if rejected > 0 {
        return Err(anyhow::anyhow!(
            "{} of {} capture(s) rejected",
            rejected,
            requests.len()
        ));
    }
    info!(committed = ctx.ledger.len(), "Reconciliation complete");
    Ok(())
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn init_logging(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_logging(args.log_json);

    let config = load_config(args.config.as_deref())?;

    match args.command {
        SubCommand::Reconcile { input, catalog } => {
            run_reconcile(&config, &input, catalog.as_deref())
        }
        SubCommand::Standards => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
        SubCommand::Efficiency { standard, real } => {
            let percent = efficiency(standard, real);
            println!("{:.1}% {}", percent, config.efficiency.classify(percent));
            Ok(())
        }
    }
}
