// File: ./src/config.rs
// Handles configuration loading, saving, and defaults.
use crate::context::AppContext;
use anyhow::{Context, Error, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Beats `todo_file` from the config, loses to `--file`.
pub const TODO_FILE_ENV: &str = "TODOTXT_FILE";

fn default_true() -> bool {
    true
}

fn default_editor() -> String {
    "xdg-open".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub todo_file: Option<PathBuf>,
    #[serde(default = "default_editor")]
    pub editor: String,
    #[serde(default = "default_true")]
    pub sort_on_load: bool,
    #[serde(default)]
    pub hide_completed: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            todo_file: None,
            // Match the serde defaults
            editor: default_editor(),
            sort_on_load: true,
            hide_completed: false,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load the configuration from disk using an explicit context.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))?;

        Ok(config)
    }

    /// Like `load`, but a missing file yields the defaults. Other failures
    /// (unreadable file, bad TOML) are still returned.
    pub fn load_or_default(ctx: &dyn AppContext) -> Result<Self> {
        match Self::load(ctx) {
            Ok(config) => Ok(config),
            Err(e) if Self::is_missing_config_error(&e) => {
                log::debug!("No config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    pub fn is_missing_config_error(err: &Error) -> bool {
        if err.to_string().contains("Config file not found") {
            return true;
        }

        for cause in err.chain() {
            if let Some(io_err) = cause.downcast_ref::<std::io::Error>()
                && io_err.kind() == std::io::ErrorKind::NotFound
            {
                return true;
            }
        }

        false
    }

    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        let toml_str = toml::to_string_pretty(self)?;
        atomic_write(&path, toml_str)
            .with_context(|| format!("Failed to write config file '{}'", path.display()))?;
        Ok(())
    }

    /// Resolution order: explicit override, `TODOTXT_FILE`, `todo_file`,
    /// then the context's default location.
    pub fn resolve_todo_path(
        &self,
        ctx: &dyn AppContext,
        override_path: Option<PathBuf>,
    ) -> Result<PathBuf> {
        if let Some(p) = override_path {
            return Ok(p);
        }
        if let Ok(p) = std::env::var(TODO_FILE_ENV)
            && !p.is_empty()
        {
            return Ok(PathBuf::from(p));
        }
        if let Some(p) = &self.todo_file {
            return Ok(p.clone());
        }
        ctx.get_default_todo_path()
    }

    /// Unknown level names fall back to `Warn`.
    pub fn log_level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(self.log_level.trim()).unwrap_or(LevelFilter::Warn)
    }
}

/// Write to a sibling `.tmp` file, then rename over the target.
fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
    let path = path.as_ref();
    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, contents)?;
    fs::rename(tmp_path, path)?;
    Ok(())
}
