//! Approval chain command line interface
//!
//! Runs shipment requests through a pipeline defined in YAML.
//!
//! # Usage
//!
//! ```bash
//! # Evaluate a request read from stdin
//! echo '{"weight": 50, "cargo": "Apples"}' | chain_cli evaluate --config config/shipment-pipeline.yaml
//!
//! # Evaluate a request file, JSON output
//! chain_cli -o json evaluate --config pipeline.yaml --request shipment.json
//!
//! # List handlers in evaluation order
//! chain_cli handlers --config pipeline.yaml
//!
//! # Run the reference scenarios
//! chain_cli demo
//! ```
//!
//! Exit codes: 0 approved, 2 rejected, 1 on any setup error.

use anyhow::{Context, Result};
use approval_chain::report::{render_json, render_text};
use approval_chain::shipment::ShipmentRequest;
use approval_chain::{EvaluationTrace, Pipeline, PipelineConfig};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const REFERENCE_PIPELINE: &str = include_str!("../../config/shipment-pipeline.yaml");

#[derive(Parser)]
#[command(name = "chain_cli")]
#[command(version)]
#[command(about = "Run shipment requests through an ordered approval pipeline")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format: json or text (default)
    #[arg(long, short = 'o', global = true, default_value = "text", value_enum)]
    format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate one request against a pipeline definition
    Evaluate {
        /// Pipeline definition (YAML)
        #[arg(short, long, env = "APPROVAL_CHAIN_CONFIG")]
        config: PathBuf,

        /// Request file (JSON object); reads stdin if not provided
        #[arg(short, long)]
        request: Option<PathBuf>,
    },

    /// List the handlers of a pipeline in evaluation order
    Handlers {
        /// Pipeline definition (YAML)
        #[arg(short, long, env = "APPROVAL_CHAIN_CONFIG")]
        config: PathBuf,
    },

    /// Run the reference scenarios against the bundled pipeline
    Demo,
}

// =============================================================================
// MAIN
// =============================================================================

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Evaluate { config, request } => cmd_evaluate(&config, request, cli.format),
        Commands::Handlers { config } => cmd_handlers(&config, cli.format),
        Commands::Demo => cmd_demo(cli.format),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            if cli.format == OutputFormat::Json {
                println!("{}", serde_json::json!({ "error": format!("{:#}", e) }));
            } else {
                eprintln!("{}: {:#}", "error".red().bold(), e);
            }
            ExitCode::FAILURE
        }
    }
}

// =============================================================================
// COMMANDS
// =============================================================================

fn cmd_evaluate(config: &Path, request: Option<PathBuf>, format: OutputFormat) -> Result<ExitCode> {
    let pipeline = load_pipeline(config)?;
    let raw = read_input(request.as_deref())?;
    let request: ShipmentRequest =
        serde_json::from_str(&raw).context("Request must be a JSON object of attributes")?;

    let trace = pipeline.evaluate_traced(&request);
    print_trace(&trace, format);
    Ok(exit_code(&trace))
}

fn cmd_handlers(config: &Path, format: OutputFormat) -> Result<ExitCode> {
    let pipeline = load_pipeline(config)?;
    let names = pipeline.handler_names();

    match format {
        OutputFormat::Json => println!("{}", serde_json::json!({ "handlers": names })),
        OutputFormat::Text => {
            if names.is_empty() {
                println!("(no handlers: every request is approved)");
            }
            for (idx, name) in names.iter().enumerate() {
                println!("{:>3}. {}", idx + 1, name);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_demo(format: OutputFormat) -> Result<ExitCode> {
    let reference = PipelineConfig::from_yaml(REFERENCE_PIPELINE)
        .context("Bundled reference pipeline is invalid")?
        .build()?;
    let empty: Pipeline<ShipmentRequest> = Pipeline::empty();

    let scenarios: [(&str, &Pipeline<ShipmentRequest>, ShipmentRequest); 4] = [
        ("light apples", &reference, shipment(50, "Apples")),
        ("light explosives", &reference, shipment(50, "Explosives")),
        ("heavy explosives", &reference, shipment(5000, "Explosives")),
        ("empty pipeline", &empty, shipment(5000, "Explosives")),
    ];

    let mut results = Vec::new();
    for (label, pipeline, request) in scenarios.iter() {
        let trace = pipeline.evaluate_traced(request);
        match format {
            OutputFormat::Json => results.push(serde_json::json!({
                "scenario": label,
                "request": request,
                "result": render_json(&trace),
            })),
            OutputFormat::Text => {
                println!("{}", format!("--- {} ---", label).bold());
                print_trace(&trace, format);
            }
        }
    }

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    }
    Ok(ExitCode::SUCCESS)
}

// =============================================================================
// HELPERS
// =============================================================================

fn load_pipeline(path: &Path) -> Result<Pipeline<ShipmentRequest>> {
    let config = PipelineConfig::load(path)
        .with_context(|| format!("Failed to load pipeline from {}", path.display()))?;
    Ok(config.build()?)
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn shipment(weight: u32, cargo: &str) -> ShipmentRequest {
    ShipmentRequest::new()
        .with("weight", weight)
        .with("cargo", cargo)
}

fn print_trace(trace: &EvaluationTrace, format: OutputFormat) {
    match format {
        OutputFormat::Json => println!("{}", render_json(trace)),
        OutputFormat::Text => {
            let text = render_text(trace);
            if trace.outcome().is_approved() {
                print!("{}", text.green());
            } else {
                print!("{}", text.red());
            }
        }
    }
}

fn exit_code(trace: &EvaluationTrace) -> ExitCode {
    if trace.outcome().is_approved() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    }
}
