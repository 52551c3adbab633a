use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    pub topology_file: PathBuf,
    pub iteration_delay_ms: u64,
    pub split_horizon: bool,
    pub print_iterations: bool,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            topology_file: PathBuf::from("topologies/network1.txt"),
            iteration_delay_ms: 0,
            split_horizon: false,
            print_iterations: false,
        }
    }
}

impl SimulatorConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: SimulatorConfig = serde_json::from_str(&content)
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_then_load_keeps_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dvsim.json");
        let config = SimulatorConfig {
            topology_file: PathBuf::from("topologies/ring.txt"),
            iteration_delay_ms: 250,
            split_horizon: true,
            print_iterations: true,
        };

        config.save(&path).unwrap();
        assert_eq!(SimulatorConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: SimulatorConfig = serde_json::from_str(r#"{ "split_horizon": true }"#).unwrap();
        assert!(config.split_horizon);
        assert_eq!(config.topology_file, PathBuf::from("topologies/network1.txt"));
        assert_eq!(config.iteration_delay_ms, 0);
    }
}
