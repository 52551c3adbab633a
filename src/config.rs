pub mod simulator_config;

pub use simulator_config::SimulatorConfig;
