use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::filter::DEFAULT_ALERT_RADIUS_KM;
use crate::geometry::Coordinate;

fn default_alert_radius_km() -> f64 {
    DEFAULT_ALERT_RADIUS_KM
}
fn default_shelter_radius_km() -> f64 {
    0.0
}

/// Settings read from `shelterscope.toml`. Command-line flags win over
/// anything set here.
#[derive(Debug, Deserialize)]
pub struct FileConfig {
    /// Default origin when `--near` is not given
    #[serde(default)]
    pub origin_lat: Option<f64>,
    #[serde(default)]
    pub origin_lon: Option<f64>,
    #[serde(default = "default_alert_radius_km")]
    pub alert_radius_km: f64,
    /// 0 lists shelters at any distance
    #[serde(default = "default_shelter_radius_km")]
    pub shelter_radius_km: f64,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            origin_lat: None,
            origin_lon: None,
            alert_radius_km: default_alert_radius_km(),
            shelter_radius_km: default_shelter_radius_km(),
        }
    }
}

impl FileConfig {
    /// First parseable config file from the search path, if any
    pub fn load() -> Option<Self> {
        for path in get_config_paths() {
            if !path.exists() {
                continue;
            }
            match Self::from_path(&path) {
                Ok(config) => {
                    debug!(path = %path.display(), "Loaded config");
                    return Some(config);
                }
                Err(e) => {
                    warn!(path = %path.display(), "Ignoring config file: {:#}", e);
                }
            }
        }
        None
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            bail!("Config file not found: {:?}", path);
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// The configured default origin; a half-specified origin is an error
    pub fn origin(&self) -> Result<Option<Coordinate>> {
        match (self.origin_lat, self.origin_lon) {
            (None, None) => Ok(None),
            (lat, lon) => Ok(Some(
                Coordinate::from_parts(lat, lon).context("Invalid origin in config file")?,
            )),
        }
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("shelterscope.toml"));
    paths.push(PathBuf::from(".shelterscope.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("shelterscope").join("config.toml"));
        paths.push(config_dir.join("shelterscope.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".shelterscope.toml"));
    }

    paths
}
