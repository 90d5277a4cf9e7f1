//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/rosetree/rosetree.toml`
//! 3. Local config: `<dir>/.rosetree.toml`
//! 4. Environment variables: `ROSETREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::{Node, TreeError, TreeResult};

/// Default maximum number of levels accepted by [`Settings::guard`].
pub const DEFAULT_MAX_DEPTH: usize = 10_000;

/// Default number of levels drawn by the renderer.
pub const DEFAULT_RENDER_DEPTH: usize = 64;

/// How trees are rendered as text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RenderSettings {
    /// Prefix every label with the node id
    pub show_ids: bool,
    /// Placed between id and value when ids are shown
    pub id_separator: String,
    /// Levels drawn before deeper children are elided
    pub max_depth: usize,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            show_ids: true,
            id_separator: ": ".into(),
            max_depth: DEFAULT_RENDER_DEPTH,
        }
    }
}

/// Raw render settings for intermediate parsing (Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawRenderSettings {
    pub show_ids: Option<bool>,
    pub id_separator: Option<String>,
    pub max_depth: Option<usize>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub max_depth: Option<usize>,
    #[serde(default)]
    pub render: RawRenderSettings,
}

impl RenderSettings {
    /// Overlay wins where it specifies a value.
    pub fn merge(&self, overlay: &RawRenderSettings) -> Self {
        Self {
            show_ids: overlay.show_ids.unwrap_or(self.show_ids),
            id_separator: overlay
                .id_separator
                .clone()
                .unwrap_or_else(|| self.id_separator.clone()),
            max_depth: overlay.max_depth.unwrap_or(self.max_depth),
        }
    }
}

/// Unified configuration for rosetree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Deepest tree accepted by [`Settings::guard`]
    pub max_depth: usize,
    /// Text rendering options
    pub render: RenderSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            render: RenderSettings::default(),
        }
    }
}

/// Get the XDG config directory for rosetree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "rosetree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("rosetree.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".rosetree.toml")
}

fn config_err(e: ConfigError) -> TreeError {
    TreeError::Config {
        message: e.to_string(),
    }
}

/// Typed lookup of one env-derived key: absent is `None`, unparsable is an error.
fn env_value<T: DeserializeOwned>(config: &Config, key: &str) -> TreeResult<Option<T>> {
    match config.get::<T>(key) {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(TreeError::Config {
            message: format!("environment override {}: {}", key, e),
        }),
    }
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> TreeResult<RawSettings> {
    let content = std::fs::read_to_string(path).map_err(|e| TreeError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| TreeError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Merge overlay config onto self (base): overlay wins if Some.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            max_depth: overlay.max_depth.unwrap_or(self.max_depth),
            render: self.render.merge(&overlay.render),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.rosetree.toml`
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/rosetree/rosetree.toml`
    /// 3. Local config: `<local_dir>/.rosetree.toml`
    /// 4. Environment variables: `ROSETREE_*` prefix, `__` between sections
    ///    (`ROSETREE_MAX_DEPTH`, `ROSETREE_RENDER__SHOW_IDS`); a variable that
    ///    is set but does not parse is a [`TreeError::Config`]
    #[instrument(level = "debug")]
    pub fn load(local_dir: Option<&Path>) -> TreeResult<Self> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("Loading global config: {}", global_path.display());
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                debug!("Loading local config: {}", local_path.display());
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        Self::apply_env_overrides(current)
    }

    /// Apply ROSETREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> TreeResult<Self> {
        // Use config crate just for env var parsing
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("ROSETREE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(config_err)?;

        if let Some(val) = env_value(&config, "max_depth")? {
            settings.max_depth = val;
        }
        if let Some(val) = env_value(&config, "render.show_ids")? {
            settings.render.show_ids = val;
        }
        if let Some(val) = env_value(&config, "render.id_separator")? {
            settings.render.id_separator = val;
        }
        if let Some(val) = env_value(&config, "render.max_depth")? {
            settings.render.max_depth = val;
        }

        Ok(settings)
    }

    /// Rejects trees deeper than `max_depth`, returning the depth otherwise.
    ///
    /// Nothing in the crate recurses per level, so this is a policy limit
    /// for callers accepting trees from untrusted input.
    pub fn guard<I, T>(&self, tree: &Node<I, T>) -> TreeResult<usize> {
        tree.check_depth(self.max_depth)
    }
}
