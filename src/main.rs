use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::info;
use tokio::io::BufReader;
use tokio::runtime::Builder;

use dvsim::cli::{Shell, HELP};
use dvsim::config::SimulatorConfig;
use dvsim::network::load_topology_file;

#[derive(Parser)]
#[command(name = "dvsim", about = "Distance-vector routing simulator")]
struct Cli {
    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Topology file to load at startup
    #[arg(long)]
    topology: Option<PathBuf>,

    /// Pause between iterations, in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    #[arg(long)]
    split_horizon: bool,

    /// Print tables and routes as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SimulatorConfig::load(path)?,
        None => SimulatorConfig::default(),
    };
    if let Some(topology) = cli.topology {
        config.topology_file = topology;
    }
    if let Some(delay_ms) = cli.delay_ms {
        config.iteration_delay_ms = delay_ms;
    }
    config.split_horizon |= cli.split_horizon;

    let topology = load_topology_file(&config.topology_file)?;
    println!("Welcome, please select one of the following commands:");
    println!("{}\n", HELP);
    println!(
        "INITIAL LOAD: {} loaded! Number of nodes in network: {}",
        config.topology_file.display(),
        topology.node_count()
    );
    info!("Split horizon enabled: {}", config.split_horizon);

    let rt = Builder::new_multi_thread()
        .enable_all()
        .build()?;

    rt.block_on(async {
        let mut shell = Shell::new(topology, config, io::stdout()).with_json(cli.json);
        shell.run(BufReader::new(tokio::io::stdin())).await
    })
}
