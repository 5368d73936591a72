use crate::config::NetworkConfig;
use crate::network::NetworkGraph;
use crate::utils::validate_network;
use color_eyre::eyre::{bail, WrapErr};
use color_eyre::Result;
use log::{info, warn};
use std::fs;
use std::path::Path;

/// A configuration file together with the graph built from it
#[derive(Debug, Clone)]
pub struct LoadedNetwork {
    pub config: NetworkConfig,
    pub graph: NetworkGraph,
}

/// Read and parse a network configuration. `.json` files are parsed as JSON,
/// anything else as YAML.
pub fn load_config(config_path: &Path) -> Result<NetworkConfig> {
    info!("Loading configuration from: {:?}", config_path);

    let content = fs::read_to_string(config_path)
        .wrap_err_with(|| format!("Failed to read configuration file {}", config_path.display()))?;

    let is_json = config_path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let config: NetworkConfig = if is_json {
        serde_json::from_str(&content)
            .wrap_err_with(|| format!("Failed to parse JSON configuration {}", config_path.display()))?
    } else {
        serde_yaml::from_str(&content)
            .wrap_err_with(|| format!("Failed to parse YAML configuration {}", config_path.display()))?
    };

    config.validate()?;
    Ok(config)
}

/// Load a configuration, build its graph and run the structural validator.
/// A graph with any finding is rejected with every finding listed.
pub fn load_network(config_path: &Path) -> Result<LoadedNetwork> {
    let config = load_config(config_path)?;
    let graph = config
        .build_graph()
        .wrap_err("Failed to build network from configuration")?;

    let report = validate_network(&graph);
    if !report.valid {
        warn!("Network failed validation with {} findings", report.errors.len());
        bail!("Network validation failed:\n  - {}", report.errors.join("\n  - "));
    }

    info!("Loaded {}", graph);
    Ok(LoadedNetwork { config, graph })
}
