// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::PathBuf, str::FromStr};

use jcal::DEFAULT_MAX_DEPTH;
use jiff::tz::TimeZone;
use tokio::fs;

use crate::util::OutputFormat;

pub const APP_NAME: &str = "jcal";

const JCAL_CONFIG_ENV: &str = "JCAL_CONFIG";

#[tracing::instrument]
pub async fn parse_config(path: Option<PathBuf>) -> Result<Config, Box<dyn Error>> {
    let path = if let Some(path) = path {
        path
    } else if let Ok(env_path) = std::env::var(JCAL_CONFIG_ENV) {
        PathBuf::from(env_path)
    } else {
        let path = get_config_dir()?.join(format!("{APP_NAME}/config.toml"));
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        path
    };

    fs::read_to_string(&path)
        .await
        .map_err(|e| format!("Failed to read config file at {}: {}", path.display(), e))?
        .parse::<Config>()
        .map_err(|e| format!("Failed to parse config file at {}: {}", path.display(), e).into())
}

/// Configuration for the jcal command-line tool.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Deepest component nesting the decoder accepts.
    pub max_depth: usize,

    /// Default output format.
    pub output_format: OutputFormat,

    /// IANA time zone used to render timestamps, UTC if unset.
    pub timezone: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            output_format: OutputFormat::default(),
            timezone: None,
        }
    }
}

impl Config {
    /// Resolve the configured time zone.
    pub fn time_zone(&self) -> Result<TimeZone, Box<dyn Error>> {
        match &self.timezone {
            Some(name) => TimeZone::get(name)
                .map_err(|e| format!("Unknown time zone '{name}': {e}").into()),
            None => Ok(TimeZone::UTC),
        }
    }
}

impl FromStr for Config {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

fn get_config_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(not(unix))]
    let config_dir = dirs::config_dir();
    config_dir.ok_or_else(|| "User-specific home directory not found".into())
}
