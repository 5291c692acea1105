use crate::constants::{
    BASE_ICONS_FILE, BASE_ICONS_URL, CONFIG_ENV_VAR, CONFIG_FILE, FULL_ICONS_FILE, FULL_ICONS_URL,
    LOG_DIR, MATERIAL_ICONS_DIR, OUTPUT_DIR, ROOT_ENTITY, SCHEMAS_DIR,
};
use crate::error::{IconError, Result};
use crate::material::{IconSize, IconStyle, IconZoom};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub augment: AugmentConfig,
    pub export: ExportConfig,
    pub fetch: FetchConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Checkout of google/material-design-icons
    pub material_design_icons: PathBuf,
    /// Directory (or single file) of EXPRESS schemas
    pub schemas: PathBuf,
    pub base_icons: PathBuf,
    pub full_icons: PathBuf,
    pub output: PathBuf,
    pub logs: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            material_design_icons: PathBuf::from(MATERIAL_ICONS_DIR),
            schemas: PathBuf::from(SCHEMAS_DIR),
            base_icons: PathBuf::from(BASE_ICONS_FILE),
            full_icons: PathBuf::from(FULL_ICONS_FILE),
            output: PathBuf::from(OUTPUT_DIR),
            logs: PathBuf::from(LOG_DIR),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AugmentConfig {
    pub root: String,
}

impl Default for AugmentConfig {
    fn default() -> Self {
        Self {
            root: ROOT_ENTITY.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub style: IconStyle,
    pub size: IconSize,
    pub zoom: IconZoom,
    pub overwrite: bool,
    pub invert_colors: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            style: IconStyle::default(),
            size: IconSize::default(),
            zoom: IconZoom::default(),
            overwrite: true,
            invert_colors: true,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub base_icons_url: String,
    pub full_icons_url: String,
    pub timeout_seconds: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_icons_url: BASE_ICONS_URL.to_string(),
            full_icons_url: FULL_ICONS_URL.to_string(),
            timeout_seconds: 30,
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Config {
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load configuration.
    ///
    /// An explicit path (argument or `IFC_ICONS_CONFIG`) must exist. Without
    /// one, `ifc_icons.toml` is read when present and defaults are used
    /// otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let explicit = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from));

        let path = match explicit {
            Some(path) => path,
            None => {
                let default = PathBuf::from(CONFIG_FILE);
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let content = fs::read_to_string(&path).map_err(|e| {
            IconError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml(&content)
    }
}
