pub mod command;
pub mod display;

pub use command::{Command, CommandError, HELP};

use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use log::{debug, error, info};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::config::SimulatorConfig;
use crate::network::{load_topology_file, Topology};
use crate::simulation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Interactive driver owning the loaded topology for the whole session.
pub struct Shell<W: Write> {
    topology: Topology,
    config: SimulatorConfig,
    json: bool,
    iterations_run: usize,
    out: W,
}

impl<W: Write> Shell<W> {
    pub fn new(mut topology: Topology, config: SimulatorConfig, out: W) -> Self {
        topology.set_split_horizon(config.split_horizon);
        Self {
            topology,
            config,
            json: false,
            iterations_run: 0,
            out,
        }
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn iterations_run(&self) -> usize {
        self.iterations_run
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Reads commands line by line until `quit` or end of input.
    pub async fn run<R: AsyncBufRead + Unpin>(&mut self, input: R) -> Result<()> {
        let mut lines = input.lines();
        self.prompt()?;

        while let Some(line) = lines.next_line().await? {
            let flow = match line.parse::<Command>() {
                Ok(command) => match self.execute(command).await {
                    Ok(flow) => flow,
                    Err(e) => {
                        error!("Command failed: {:#}", e);
                        writeln!(self.out, "Error: {:#}", e)?;
                        Flow::Continue
                    }
                },
                Err(CommandError::Empty) => Flow::Continue,
                Err(e) => {
                    writeln!(self.out, "{}", e)?;
                    Flow::Continue
                }
            };

            if flow == Flow::Quit {
                writeln!(self.out, "Goodbye!")?;
                break;
            }
            self.prompt()?;
        }

        Ok(())
    }

    pub async fn execute(&mut self, command: Command) -> Result<Flow> {
        debug!("Executing {:?}", command);
        match command {
            Command::Route { source, destination } => {
                let outcome = simulation::resolve_route(&self.topology, source, destination)?;
                if self.json {
                    writeln!(self.out, "{}", serde_json::to_string_pretty(&outcome)?)?;
                } else {
                    writeln!(self.out, "{}", display::format_route(source, destination, &outcome))?;
                }
            }
            Command::PrintNet => self.print_network()?,
            Command::Toggle => {
                let enabled = !self.topology.split_horizon();
                simulation::set_split_horizon(&mut self.topology, enabled);
                writeln!(self.out, "Split Horizon Enabled: {}", enabled)?;
            }
            Command::SplitHorizon(enabled) => {
                simulation::set_split_horizon(&mut self.topology, enabled);
                writeln!(self.out, "Split Horizon Enabled: {}", enabled)?;
            }
            Command::Compute { iterations } => self.compute(iterations).await?,
            Command::Update { source, neighbour, cost } => {
                simulation::change_link_cost(&mut self.topology, source, neighbour, cost)?;
                writeln!(self.out, "Neighbour link updated!")?;
            }
            Command::Fail { node } => {
                simulation::fail_node(&mut self.topology, node)?;
                writeln!(self.out, "Node {} is now unreachable!", node)?;
            }
            Command::Load { path } => {
                // The current network stays in place if the new one fails to load.
                let mut topology = load_topology_file(&path)?;
                topology.set_split_horizon(self.config.split_horizon);
                self.topology = topology;
                self.iterations_run = 0;
                writeln!(
                    self.out,
                    "File loaded in successfully! ({} nodes)",
                    self.topology.node_count()
                )?;
            }
            Command::Neighbours { node } => {
                let neighbours = self.topology.neighbours(node)?;
                writeln!(self.out, "Node {}'s neighbours: {:?}", node, neighbours)?;
            }
            Command::Help => writeln!(self.out, "{}", HELP)?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    async fn compute(&mut self, iterations: usize) -> Result<()> {
        let delay = Duration::from_millis(self.config.iteration_delay_ms);

        writeln!(self.out, "Initial Network DVT")?;
        self.print_network()?;

        let mut converged_reported = false;
        for i in 1..=iterations {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            let report = simulation::run_iteration(&mut self.topology);
            self.iterations_run += 1;
            writeln!(
                self.out,
                "Iteration {}: {} entries changed across {} nodes",
                i,
                report.changed_entries,
                report.updated_nodes.len()
            )?;

            if self.config.print_iterations {
                self.print_network()?;
            }
            if report.is_stable() && !converged_reported {
                info!("Network stable after {} iteration(s)", self.iterations_run);
                converged_reported = true;
            }
        }

        writeln!(self.out, "New Network DVT")?;
        self.print_network()
    }

    fn print_network(&mut self) -> Result<()> {
        let snapshot = simulation::snapshot(&self.topology);
        if self.json {
            writeln!(self.out, "{}", serde_json::to_string_pretty(&snapshot)?)?;
        } else {
            write!(self.out, "{}", display::format_network(&snapshot))?;
        }
        Ok(())
    }

    fn prompt(&mut self) -> Result<()> {
        write!(self.out, "> ")?;
        self.out.flush()?;
        Ok(())
    }
}
