use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use spdlog::info;

use calatorii::config::{find_config, read_config, Config};
use calatorii::logger::default_log_location;

pub(crate) fn open_config(cfg_path: Option<PathBuf>) -> Result<Config> {
    let config_path = match cfg_path.or_else(find_config) {
        Some(path) => path,
        None => return Err(anyhow!("Could not find calatorii.toml. Please run calatorii --help")),
    };

    if let Ok(cur_dir) = env::current_dir() {
        info!("Current dir: {}", cur_dir.display());
    }
    info!("Reading config from {}", config_path.display());
    let mut config = read_config(&config_path)
        .with_context(|| format!("Loading {}", config_path.display()))?;

    if let Some(mut log) = config.log {
        let location = log.location.unwrap_or_else(default_log_location);
        info!("Log enabled. Files will be written in {}", location.display());
        log.location = Some(location);
        config.log = Some(log);
    } else {
        info!("Log disabled. Using stdout");
    }

    Ok(config)
}
