mod commands;
mod config;
mod input;
mod output;
mod telemetry;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::benchmark::BenchmarkArgs;
use commands::evaluate::EvaluateArgs;
use commands::impact::ImpactArgs;
use commands::profitability::ProfitabilityArgs;
use commands::risk::{QuickRiskArgs, RiskArgs};
use commands::sustainability::SustainabilityArgs;

/// Compliance-risk and financial-impact scoring for Indian MSMEs
#[derive(Parser)]
#[command(
    name = "msme-score",
    version,
    about = "Compliance-risk and financial-impact scoring for Indian MSMEs",
    long_about = "Scores regulatory obligations extracted from policy documents, \
                  estimates penalty avoidance, scheme benefits and ROI, quantifies \
                  sustainability gains and folds everything into a composite impact \
                  score. Input is a JSON or YAML file via --input, or JSON piped on stdin."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// JSON or YAML file overriding engine weights, thresholds and assumptions
    #[arg(long, global = true)]
    config: Option<String>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Score every obligation and aggregate the compliance risk
    Risk(RiskArgs),
    /// Coarse risk score from the declared risk level and penalty sizes
    QuickRisk(QuickRiskArgs),
    /// Penalty avoidance, scheme benefits, cost savings and ROI projection
    Profitability(ProfitabilityArgs),
    /// Paper, carbon and time savings with a green score
    Sustainability(SustainabilityArgs),
    /// Composite impact score from precomputed sub-model signals
    Impact(ImpactArgs),
    /// Run risk, profitability, sustainability and impact in one pass
    Evaluate(EvaluateArgs),
    /// Compare scores against synthetic sector and state peers
    Benchmark(BenchmarkArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = telemetry::init(&cli.log_level) {
        fail(&e);
    }

    if let Commands::Version = cli.command {
        println!("msme-score {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    let engine = match config::load_engine(cli.config.as_deref()) {
        Ok(engine) => engine,
        Err(e) => fail(&*e),
    };

    let result: commands::CommandResult = match cli.command {
        Commands::Risk(args) => commands::risk::run_risk(args, &engine),
        Commands::QuickRisk(args) => commands::risk::run_quick_risk(args),
        Commands::Profitability(args) => commands::profitability::run_profitability(args, &engine),
        Commands::Sustainability(args) => {
            commands::sustainability::run_sustainability(args, &engine)
        }
        Commands::Impact(args) => commands::impact::run_impact(args, &engine),
        Commands::Evaluate(args) => commands::evaluate::run_evaluate(args, &engine),
        Commands::Benchmark(args) => commands::benchmark::run_benchmark(args, &engine),
        Commands::Version => return,
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => fail(&*e),
    }
}

fn fail(e: &dyn std::error::Error) -> ! {
    eprintln!("{}: {}", "error".red().bold(), e);
    process::exit(1);
}
