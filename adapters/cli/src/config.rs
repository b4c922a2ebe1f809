use std::{fs, path::Path};

use anyhow::{Context, Result};
use upstairs_core::EngineConfig;

/// Loads the engine configuration, falling back to defaults without a file.
pub(crate) fn load(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };

    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    parse(&contents).with_context(|| format!("invalid config file at {}", path.display()))
}

fn parse(contents: &str) -> Result<EngineConfig> {
    let config: EngineConfig =
        toml::from_str(contents).context("failed to parse engine config toml contents")?;
    config.validate()?;
    Ok(config)
}
