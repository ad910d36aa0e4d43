//! Configuration loading and parsing.
//!
//! Parses `sortvis.toml` (or an override path provided by the binary). Every
//! section is optional and defaults to the built-in values, so an empty or
//! missing file yields the stock behavior: 50 values drawn from `0..=100`,
//! 120 ticks per second, Bubble Sort ascending.
//!
//! The parsed file is kept as written (`Config::file`); the values the
//! runtime actually uses are derived from it by [`Config::normalize`], which
//! clamps out-of-range numbers and logs every adjustment on the `config`
//! target. Unknown fields are ignored. A file that fails to parse is reported
//! with `warn!` and replaced by defaults.

use anyhow::Result;
use core_model::{Algorithm, ListSpec, SortDirection};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

pub const CONFIG_FILE_NAME: &str = "sortvis.toml";

/// Largest array accepted; beyond this bars are narrower than a cell on any terminal.
pub const LIST_LEN_MAX: usize = 400;
pub const TICK_RATE_MIN: u32 = 1;
pub const TICK_RATE_MAX: u32 = 1000;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct ListConfig {
    #[serde(default = "ListConfig::default_len")]
    pub len: usize,
    #[serde(default = "ListConfig::default_min")]
    pub min: i32,
    #[serde(default = "ListConfig::default_max")]
    pub max: i32,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            len: Self::default_len(),
            min: Self::default_min(),
            max: Self::default_max(),
        }
    }
}

impl ListConfig {
    const fn default_len() -> usize {
        50
    }
    const fn default_min() -> i32 {
        0
    }
    const fn default_max() -> i32 {
        100
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct AnimationConfig {
    /// Frame ticks per second; one sort step per tick.
    #[serde(default = "AnimationConfig::default_tick_rate")]
    pub tick_rate: u32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            tick_rate: Self::default_tick_rate(),
        }
    }
}

impl AnimationConfig {
    const fn default_tick_rate() -> u32 {
        120
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct StartupConfig {
    #[serde(default)]
    pub algorithm: Algorithm,
    #[serde(default)]
    pub direction: SortDirection,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub list: ListConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub startup: StartupConfig,
    /// `command = "key"` overrides, applied on top of the default bindings.
    #[serde(default)]
    pub keys: BTreeMap<String, String>,
}

/// Values given on the command line; each `Some` replaces the file value before clamping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub len: Option<usize>,
    pub algorithm: Option<Algorithm>,
    pub direction: Option<SortDirection>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub file: ConfigFile,    // parsed (or default) data
    /// Effective list shape after clamping.
    pub list: ListSpec,
    /// Effective tick rate after clamping.
    pub tick_rate: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_file(None, ConfigFile::default())
    }
}

/// Best-effort config path: `./sortvis.toml` first, then the platform config
/// dir (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("sortvis").join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        info!(target: "config", path = %path.display(), "config_file_absent_using_defaults");
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            info!(target: "config", path = %path.display(), "config_loaded");
            Ok(Config::from_file(Some(content), file))
        }
        Err(e) => {
            warn!(
                target: "config",
                path = %path.display(),
                error = %e,
                "config_parse_failed_using_defaults"
            );
            Ok(Config::default())
        }
    }
}

impl Config {
    pub fn from_file(raw: Option<String>, file: ConfigFile) -> Self {
        let mut cfg = Self {
            raw,
            file,
            list: ListSpec::default(),
            tick_rate: AnimationConfig::default_tick_rate(),
        };
        cfg.normalize();
        cfg
    }

    /// Recompute the effective values from `file`, clamping what is out of range.
    pub fn normalize(&mut self) {
        let ListConfig { len, min, max } = self.file.list;

        let eff_len = len.clamp(1, LIST_LEN_MAX);
        if eff_len != len {
            info!(
                target: "config",
                raw = len,
                clamped = eff_len,
                max = LIST_LEN_MAX,
                "list_len_clamped"
            );
        }

        let (eff_min, eff_max) = if min <= max { (min, max) } else { (max, min) };
        if eff_min != min {
            info!(target: "config", min, max, "list_bounds_swapped");
        }

        let rate = self.file.animation.tick_rate;
        let eff_rate = rate.clamp(TICK_RATE_MIN, TICK_RATE_MAX);
        if eff_rate != rate {
            info!(
                target: "config",
                raw = rate,
                clamped = eff_rate,
                "tick_rate_clamped"
            );
        }

        self.list = ListSpec {
            len: eff_len,
            min: eff_min,
            max: eff_max,
        };
        self.tick_rate = eff_rate;
    }

    /// Apply command line values on top of the file, then re-clamp.
    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(len) = overrides.len {
            self.file.list.len = len;
        }
        if let Some(algorithm) = overrides.algorithm {
            self.file.startup.algorithm = algorithm;
        }
        if let Some(direction) = overrides.direction {
            self.file.startup.direction = direction;
        }
        self.normalize();
    }

    pub fn algorithm(&self) -> Algorithm {
        self.file.startup.algorithm
    }

    pub fn direction(&self) -> SortDirection {
        self.file.startup.direction
    }

    /// Key overrides as `(command, key)` pairs in name order.
    pub fn key_overrides(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.file
            .keys
            .iter()
            .map(|(command, key)| (command.as_str(), key.as_str()))
    }
}
