use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::{Cost, NodeLabel};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Route { source: NodeLabel, destination: NodeLabel },
    PrintNet,
    Toggle,
    SplitHorizon(bool),
    Compute { iterations: usize },
    Update { source: NodeLabel, neighbour: NodeLabel, cost: Cost },
    Fail { node: NodeLabel },
    Load { path: PathBuf },
    Neighbours { node: NodeLabel },
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("'{0}' is not a command, type 'help' for the list")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("'{value}' is not a valid {what}")]
    InvalidArgument { what: &'static str, value: String },
}

pub const HELP: &str = "\
Commands:
   route <src> <dst>              print the route between two nodes
   printnet                       print the DVT of every node
   toggle                         toggle split horizon
   split <on|off>                 set split horizon
   compute <iterations>           run a number of exchange iterations
   update <src> <neighbour> <cost> change the cost of a link
   fail <node>                    make a node unreachable
   load <file>                    load a new network from a text file
   neighbours <node>              list the neighbours of a node
   help                           show this list
   quit                           close the program";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut words = input.split_whitespace();
        let keyword = words.next().ok_or(CommandError::Empty)?.to_ascii_lowercase();
        let args: Vec<&str> = words.collect();

        let command = match keyword.as_str() {
            "route" => {
                let [source, destination] = exact(&args, "route <src> <dst>")?;
                Command::Route {
                    source: number(source, "node")?,
                    destination: number(destination, "node")?,
                }
            }
            "printnet" => {
                exact::<0>(&args, "printnet")?;
                Command::PrintNet
            }
            "toggle" => {
                exact::<0>(&args, "toggle")?;
                Command::Toggle
            }
            "split" => {
                let [state] = exact(&args, "split <on|off>")?;
                match state.to_ascii_lowercase().as_str() {
                    "on" | "true" => Command::SplitHorizon(true),
                    "off" | "false" => Command::SplitHorizon(false),
                    _ => return Err(invalid("split horizon state", state)),
                }
            }
            "compute" => {
                let [iterations] = exact(&args, "compute <iterations>")?;
                Command::Compute {
                    iterations: number(iterations, "iteration count")?,
                }
            }
            "update" => {
                let [source, neighbour, cost] = exact(&args, "update <src> <neighbour> <cost>")?;
                Command::Update {
                    source: number(source, "node")?,
                    neighbour: number(neighbour, "node")?,
                    cost: number(cost, "cost")?,
                }
            }
            "fail" => {
                let [node] = exact(&args, "fail <node>")?;
                Command::Fail {
                    node: number(node, "node")?,
                }
            }
            "load" => {
                let [path] = exact(&args, "load <file>")?;
                Command::Load { path: PathBuf::from(path) }
            }
            "neighbours" | "neighbors" => {
                let [node] = exact(&args, "neighbours <node>")?;
                Command::Neighbours {
                    node: number(node, "node")?,
                }
            }
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => return Err(CommandError::Unknown(keyword)),
        };

        Ok(command)
    }
}

fn exact<'a, const N: usize>(args: &[&'a str], usage: &'static str) -> Result<[&'a str; N], CommandError> {
    <[&str; N]>::try_from(args).map_err(|_| CommandError::Usage(usage))
}

fn number<T: FromStr>(value: &str, what: &'static str) -> Result<T, CommandError> {
    value.parse().map_err(|_| invalid(what, value))
}

fn invalid(what: &'static str, value: &str) -> CommandError {
    CommandError::InvalidArgument {
        what,
        value: value.to_string(),
    }
}
