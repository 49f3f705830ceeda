use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use gn_app::{AppError, AppResult, RunReport, run_optimize, run_static, write_report};
use gn_optimizer::{CancelToken, OptimizerConfig};
use gn_project::{NetworkDoc, apply_demand_overrides};

#[derive(Parser)]
#[command(name = "gasnet")]
#[command(about = "Compressed-gas network balance and station pressure optimization", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a network document
    Validate {
        /// Path to the network YAML or JSON file
        network_path: PathBuf,
    },
    /// Solve at the document's station pressures
    Solve {
        /// Path to the network YAML or JSON file
        network_path: PathBuf,
        /// Replace a user's demand, as USER=M3_PER_MIN (repeatable)
        #[arg(long = "demand", value_parser = parse_demand)]
        demands: Vec<(String, f64)>,
        /// Write the JSON report here
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Search for cheaper station pressures, then solve
    Optimize {
        /// Path to the network YAML or JSON file
        network_path: PathBuf,
        /// Population size
        #[arg(long)]
        population: Option<usize>,
        /// Maximum number of generations
        #[arg(long)]
        generations: Option<usize>,
        /// Pressure grid step in Pa
        #[arg(long)]
        step: Option<f64>,
        /// Random seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
        /// Replace a user's demand, as USER=M3_PER_MIN (repeatable)
        #[arg(long = "demand", value_parser = parse_demand)]
        demands: Vec<(String, f64)>,
        /// Write the JSON report here
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { network_path } => cmd_validate(&network_path),
        Commands::Solve {
            network_path,
            demands,
            output,
        } => cmd_solve(&network_path, &demands, output.as_deref()),
        Commands::Optimize {
            network_path,
            population,
            generations,
            step,
            seed,
            demands,
            output,
        } => {
            let doc = load_with_demands(&network_path, &demands)?;
            let mut config = gn_app::optimizer_config(&doc, OptimizerConfig::default());
            if let Some(n) = population {
                config.population_size = n;
            }
            if let Some(n) = generations {
                config.max_generations = n;
            }
            if let Some(s) = step {
                config.step_size = s;
            }
            if seed.is_some() {
                config.seed = seed;
            }
            cmd_optimize(&doc, config, output.as_deref())
        }
    }
}

fn parse_demand(arg: &str) -> Result<(String, f64), String> {
    let (user, flow) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected USER=FLOW, got '{arg}'"))?;
    let flow: f64 = flow
        .trim()
        .parse()
        .map_err(|e| format!("bad flow in '{arg}': {e}"))?;
    Ok((user.trim().to_string(), flow))
}

fn load_with_demands(path: &Path, demands: &[(String, f64)]) -> AppResult<NetworkDoc> {
    let mut doc = gn_project::load(path)?;
    apply_demand_overrides(&mut doc, demands)?;
    debug!(
        network = doc.name.as_str(),
        overrides = demands.len(),
        "loaded network document"
    );
    Ok(doc)
}

fn cmd_validate(network_path: &Path) -> AppResult<()> {
    println!("Validating network: {}", network_path.display());
    let doc = gn_project::load(network_path)?;
    gn_app::compile_network(&doc)?;
    println!(
        "✓ Network is valid ({} nodes, {} pipes, {} stations, {} users)",
        doc.nodes.len(),
        doc.pipes.len(),
        doc.stations.len(),
        doc.users.len()
    );
    Ok(())
}

fn cmd_solve(
    network_path: &Path,
    demands: &[(String, f64)],
    output: Option<&Path>,
) -> AppResult<()> {
    let doc = load_with_demands(network_path, demands)?;
    println!("Solving network: {}", doc.name);
    let report = run_static(&doc)?;
    print_summary(&report);
    finish(&report, output)
}

fn cmd_optimize(
    doc: &NetworkDoc,
    config: OptimizerConfig,
    output: Option<&Path>,
) -> AppResult<()> {
    println!(
        "Optimizing network: {} (population {}, generations {})",
        doc.name, config.population_size, config.max_generations
    );
    let report = run_optimize(doc, config, &CancelToken::new())?;
    if let Some(opt) = &report.optimization {
        println!("  Verdict: {:?}", opt.verdict);
        println!(
            "  Fitness: {:.3} -> {:.3} ({} generations, {} evaluations)",
            opt.baseline_fitness, opt.fitness, opt.generations, opt.evaluations
        );
        for s in &opt.setpoints {
            println!(
                "  {}: {:.1} kPa -> {:.1} kPa",
                s.station, s.before_kpa, s.after_kpa
            );
        }
    }
    print_summary(&report);
    finish(&report, output)
}

fn print_summary(report: &RunReport) {
    let mark = if report.feasible { "✓" } else { "✗" };
    println!(
        "{mark} {:?} after {} iterations, feasible: {}",
        report.outcome, report.iterations, report.feasible
    );
    for v in &report.violations {
        println!("  ! {v}");
    }
    let system = &report.report.system;
    println!("  Total power: {:.1} kW", system.total_power_kw);
    println!(
        "  Efficiency: net {:.3}, total {:.3}",
        system.net_efficiency, system.total_efficiency
    );
}

fn finish(report: &RunReport, output: Option<&Path>) -> AppResult<()> {
    if let Some(path) = output {
        write_report(path, report)?;
        info!(path = %path.display(), "report written");
        println!("✓ Report written to {}", path.display());
    }
    if report.feasible {
        Ok(())
    } else {
        Err(AppError::Infeasible {
            network: report.network.clone(),
        })
    }
}
