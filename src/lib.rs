pub mod algorithms;
pub mod cli;
pub mod config;
pub mod error;
pub mod network;
pub mod protocol;
pub mod simulation;

pub use error::RoutingError;
pub use network::{Node, Topology};

/// 1-based node identifier. Label `n` lives at index `n - 1` in every table.
pub type NodeLabel = usize;
pub type Cost = u32;

/// Cost meaning "unreachable / unknown". Never a valid link cost.
pub const UNREACHABLE_COST: Cost = 999;

/// Largest network accepted. Tables are N x N, so this bounds memory at load time.
pub const MAX_NODES: usize = 4096;
