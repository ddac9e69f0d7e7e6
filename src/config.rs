use crate::prelude::*;
use serde::Deserialize;
use std::path::Path;

pub const MIN_CHECK_INTERVAL_SECS: u64 = 5;
/// Longest cycle a config may ask for, a hundred years.
pub const MAX_CYCLE_SECS: f64 = 100.0 * 365.0 * 24.0 * 3600.0;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    pub world: WorldConfig,
    pub bounds: BoundsConfig,
    pub timing: TimingConfig,
    pub debug: DebugConfig,
    pub teleport: TeleportConfig,
    pub api: ApiConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct WorldConfig {
    pub name: String,
}
impl Default for WorldConfig {
    fn default() -> Self {
        Self { name: "world".into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BoundsConfig {
    pub min_border_size: f64,
    pub max_border_size: f64,
}
impl Default for BoundsConfig {
    fn default() -> Self {
        Self {
            min_border_size: 16.0,
            max_border_size: 59_999_968.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    #[default]
    Minutes,
    Hours,
}
impl TimeUnit {
    pub const fn secs(self) -> f64 {
        match self {
            TimeUnit::Minutes => 60.0,
            TimeUnit::Hours => 3600.0,
        }
    }
}

/// Range a normal cycle's length is drawn from. `min-minutes` and
/// `max-minutes` are counted in `unit`, so with `unit = "hours"` they are hours.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TimingConfig {
    pub min_minutes: f64,
    pub max_minutes: f64,
    pub unit: TimeUnit,
}
impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            min_minutes: 1.0,
            max_minutes: 720.0,
            unit: TimeUnit::Minutes,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DebugConfig {
    /// Whether `/wbdebug` may switch to short debug cycles at all.
    pub enabled: bool,
}
impl Default for DebugConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TeleportConfig {
    pub check_interval_seconds: u64,
    pub disable_damage_each_sweep: bool,
}
impl Default for TeleportConfig {
    fn default() -> Self {
        Self {
            check_interval_seconds: 60,
            disable_damage_each_sweep: true,
        }
    }
}
impl TeleportConfig {
    pub fn check_interval(&self) -> Ticks {
        Ticks::from_secs(self.check_interval_seconds.max(MIN_CHECK_INTERVAL_SECS))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ApiConfig {
    /// Where border updates get posted. Nothing is sent while unset.
    pub url: Option<String>,
    pub secret: Option<String>,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| BorderError::ConfigRead {
            path: path.to_owned(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Like [`Config::load`], but a missing file means defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::warn!("no config at {path:?}, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let BoundsConfig { min_border_size: min, max_border_size: max } = self.bounds;
        if !(min.is_finite() && min > 0.0) {
            return Err(BorderError::InvalidConfig(format!(
                "bounds.min-border-size must be a positive number, got {min}"
            )));
        }
        if !max.is_finite() || max < min {
            return Err(BorderError::InvalidConfig(format!(
                "bounds.max-border-size must be at least {min}, got {max}"
            )));
        }
        let TimingConfig { min_minutes, max_minutes, .. } = self.timing;
        if !(min_minutes.is_finite() && max_minutes.is_finite()) {
            return Err(BorderError::InvalidConfig("timing bounds must be finite".into()));
        }
        let longest = min_minutes.max(max_minutes) * self.timing.unit.secs();
        if longest > MAX_CYCLE_SECS {
            return Err(BorderError::InvalidConfig(format!(
                "timing bounds allow a {longest}s cycle, the limit is {MAX_CYCLE_SECS}s"
            )));
        }
        Ok(())
    }
}
