use crate::config::ProcessorConfig;
use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// File name looked up next to the running executable when no path is given.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Default location of the settings file: `config.json` beside the binary,
/// falling back to the working directory if the executable path is unknown.
pub fn default_config_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(CONFIG_FILE_NAME)))
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
}

/// Loads and validates the static JSON settings file.
/// Any failure here is fatal for the whole run.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ProcessorConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "[CONFIG] Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => content,
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "[CONFIG] Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    let config: ProcessorConfig = match serde_json::from_str(&config_content) {
        Ok(conf) => conf,
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "[CONFIG] Failed to parse config JSON");
            return Err(anyhow::anyhow!("Failed to parse config JSON: {e}"));
        }
    };

    if let Err(reason) = config.validate() {
        error!(reason = %reason, config_path = ?path_ref, "[CONFIG] Invalid configuration value");
        anyhow::bail!("Invalid configuration in {:?}: {}", path_ref, reason);
    }

    config.trace_loaded();
    Ok(config)
}
