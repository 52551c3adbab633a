pub mod loader;
pub mod node;
pub mod topology;

pub use loader::{load_topology_file, parse_topology};
pub use node::Node;
pub use topology::{NodeSnapshot, RouteEntry, Topology};
