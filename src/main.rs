use std::{
    fs,
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::Parser;
use tracing::info;

use u_facility::{
    config::SolverConfig,
    models::{Instance, InstanceData},
    solver::solve,
};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Solver configuration (JSON)
    #[arg(short, long)]
    config: PathBuf,

    /// Problem instance (JSON)
    #[arg(short, long)]
    instance: PathBuf,

    /// Write the solution dump to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(short, long)]
    debug: bool,
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let f = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("cannot parse {}", path.display()))
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    let config: SolverConfig = read_json(&cli.config)?;
    let data: InstanceData = read_json(&cli.instance)?;
    let instance = Instance::new(&data)
        .with_context(|| format!("invalid instance {}", cli.instance.display()))?;

    let result = solve(&instance, &config).context("invalid configuration")?;
    info!(
        iterations = result.iterations,
        best_iteration = result.best_iteration,
        elapsed = result.elapsed.as_secs_f64(),
        "finished"
    );

    if !result.is_feasible() {
        println!("no feasible solution found");
    }
    let dump = result.solution.to_string();
    print!("{dump}");

    if let Some(path) = cli.output {
        fs::write(&path, &dump).with_context(|| format!("cannot write {}", path.display()))?;
    }

    Ok(())
}
