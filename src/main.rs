use anyhow::{bail, Context, Result};
use busplan::{
    batch::{run_batch, solve_folder, BatchConfig},
    output::write_partition,
    params::{MergeStrategy, Params, Relocation, Weighting},
};
use clap::Parser;
use log::{error, info};
use std::io::{self, Write};
use std::path::PathBuf;

const APP_NAME: &str = env!("CARGO_PKG_NAME");
const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = APP_NAME)]
#[command(version = VERSION)]
#[command(author = AUTHOR)]
#[command(about = "Assigns students to buses while splitting up rowdy groups", long_about = None)]
struct Args {
    /// Directory holding one sub-directory of cases per category
    #[arg(short, long, default_value = "./all_inputs")]
    inputs: PathBuf,

    /// Directory the solutions are written to
    #[arg(short, long, default_value = "./outputs")]
    outputs: PathBuf,

    /// Category to solve; may be repeated (default: small, medium and large)
    #[arg(short = 'C', long = "category")]
    categories: Vec<String>,

    /// Solve a single case folder and print its buses instead
    #[arg(long)]
    case: Option<PathBuf>,

    /// Number of cases solved in parallel
    #[arg(short, long, default_value_t = 5)]
    workers: usize,

    /// Case to leave out, written as category/case; may be repeated
    #[arg(long)]
    skip: Vec<String>,

    /// Edge weighting: uniform or ranked
    #[arg(long, default_value = "uniform")]
    weighting: Weighting,

    /// Merge strategy: simple or greedy
    #[arg(long, default_value = "greedy")]
    merge: MergeStrategy,

    /// Relocation strategy: edges or score
    #[arg(long, default_value = "score")]
    relocation: Relocation,

    /// Do not try pair swaps during local search
    #[arg(long)]
    no_swaps: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut params = Params::default();
    params.use_strategies(args.weighting, args.merge, args.relocation);
    if args.no_swaps {
        params.disable_swaps();
    }

    if let Some(folder) = &args.case {
        let name = folder.display().to_string();
        let (graph, partition, score) = solve_folder(folder, &params, &name)
            .with_context(|| format!("failed to solve {}", name))?;
        let stdout = io::stdout();
        let mut out = stdout.lock();
        write_partition(&mut out, &graph, &partition)?;
        out.flush()?;
        info!("score {:.4}", score);
        return Ok(());
    }

    let mut config = BatchConfig {
        inputs: args.inputs,
        outputs: args.outputs,
        skip: args.skip,
        workers: args.workers,
        params,
        ..BatchConfig::default()
    };
    if !args.categories.is_empty() {
        config.categories = args.categories;
    }

    let report = run_batch(&config).context("batch run failed")?;
    let failed: Vec<_> = report.failed().collect();
    for outcome in &failed {
        if let Err(e) = &outcome.result {
            error!("{}: {}", outcome.case.id(), e);
        }
    }
    info!(
        "solved {}/{} cases, mean score {:.4}",
        report.solved(),
        report.outcomes.len(),
        report.mean_score().unwrap_or(0.0)
    );
    if !failed.is_empty() {
        bail!("{} cases failed", failed.len());
    }
    Ok(())
}
