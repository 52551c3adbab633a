pub mod distance_vector;

pub use distance_vector::{compute_vector, run_iteration, update_vector, IterationReport, VectorUpdate};
