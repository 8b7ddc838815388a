//! Configuration handling for the simulator.
//!
//! Settings come from an optional YAML file, then environment variables,
//! then command-line flags (applied in `main`).

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::session::SessionConfig;

/// Simulator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Topology file to bootstrap from (prompted for when unset)
    pub network_file: Option<PathBuf>,
    /// Command prompt
    pub prompt: String,
    /// Extra attempts allowed when a distance does not parse
    pub max_input_retries: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            network_file: None,
            prompt: "> ".to_string(),
            max_input_retries: 3,
        }
    }
}

/// Root configuration structure (matches the YAML layout)
#[derive(Debug, Deserialize)]
struct RootConfig {
    simulator: Option<SimulatorSection>,
}

#[derive(Debug, Deserialize)]
struct SimulatorSection {
    network_file: Option<PathBuf>,
    prompt: Option<String>,
    max_input_retries: Option<u32>,
}

impl SimConfig {
    /// Load configuration from file and environment variables
    pub fn load_from_file<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let mut config = Self::default();

        match std::fs::read_to_string(&config_path) {
            Ok(content) => match serde_yaml::from_str::<RootConfig>(&content) {
                Ok(root) => {
                    config.apply_root_config(root);
                    info!("Loaded configuration from {:?}", config_path.as_ref());
                }
                Err(err) => {
                    warn!(
                        "Failed to parse config file {:?}, using defaults: {}",
                        config_path.as_ref(),
                        err
                    );
                }
            },
            Err(_) => {
                info!("Config file {:?} not found, using defaults", config_path.as_ref());
            }
        }

        config.apply_environment_overrides();

        info!(
            "Final simulator configuration: network_file={:?}, max_input_retries={}",
            config.network_file, config.max_input_retries
        );

        Ok(config)
    }

    fn apply_root_config(&mut self, root: RootConfig) {
        let Some(section) = root.simulator else {
            return;
        };

        if let Some(network_file) = section.network_file {
            self.network_file = Some(network_file);
        }
        if let Some(prompt) = section.prompt {
            self.prompt = prompt;
        }
        if let Some(retries) = section.max_input_retries {
            self.max_input_retries = retries;
        }
    }

    /// Apply environment variable overrides
    fn apply_environment_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(network_file) = lookup("DVSIM_NETWORK_FILE") {
            info!("Network file overridden by environment: {}", network_file);
            self.network_file = Some(PathBuf::from(network_file));
        }

        if let Some(retries) = lookup("DVSIM_MAX_INPUT_RETRIES") {
            match retries.parse::<u32>() {
                Ok(retries) => {
                    self.max_input_retries = retries;
                    info!("Input retries overridden by environment: {}", retries);
                }
                Err(_) => warn!("Ignoring invalid DVSIM_MAX_INPUT_RETRIES={:?}", retries),
            }
        }
    }

    /// Settings for the command session
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            prompt: self.prompt.clone(),
            max_input_retries: self.max_input_retries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = SimConfig::default();
        assert_eq!(config.network_file, None);
        assert_eq!(config.prompt, "> ");
        assert_eq!(config.max_input_retries, 3);
    }

    #[test]
    fn test_load_from_file() {
        let yaml_content = r#"
simulator:
  network_file: routers.txt
  prompt: "dv> "
  max_input_retries: 5
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(yaml_content.as_bytes()).unwrap();

        let mut config = SimConfig::default();
        let root: RootConfig = serde_yaml::from_str(yaml_content).unwrap();
        config.apply_root_config(root);

        assert_eq!(config.network_file, Some(PathBuf::from("routers.txt")));
        assert_eq!(config.prompt, "dv> ");
        assert_eq!(config.max_input_retries, 5);

        let loaded = SimConfig::load_from_file(temp_file.path()).unwrap();
        assert_eq!(loaded.prompt, "dv> ");
    }

    #[test]
    fn test_partial_and_missing_config() {
        let mut config = SimConfig::default();
        config.apply_root_config(serde_yaml::from_str("simulator:\n  prompt: \"$ \"\n").unwrap());
        assert_eq!(config.prompt, "$ ");
        assert_eq!(config.max_input_retries, 3);

        let mut config = SimConfig::default();
        config.apply_root_config(serde_yaml::from_str("other: true\n").unwrap());
        assert_eq!(config, SimConfig::default());

        let dir = tempfile::tempdir().unwrap();
        let missing = SimConfig::load_from_file(dir.path().join("absent.yaml")).unwrap();
        assert_eq!(missing.prompt, "> ");
    }

    #[test]
    fn test_environment_overrides() {
        let env: HashMap<&str, &str> = [
            ("DVSIM_NETWORK_FILE", "/tmp/net.txt"),
            ("DVSIM_MAX_INPUT_RETRIES", "1"),
        ]
        .into_iter()
        .collect();

        let mut config = SimConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.network_file, Some(PathBuf::from("/tmp/net.txt")));
        assert_eq!(config.max_input_retries, 1);

        let mut config = SimConfig::default();
        config.apply_overrides(|key| (key == "DVSIM_MAX_INPUT_RETRIES").then(|| "lots".to_string()));
        assert_eq!(config.max_input_retries, 3);
    }
}
