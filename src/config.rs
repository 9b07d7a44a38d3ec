use crate::game::{deserialize_millis, GridError, GridSize, SpeedError, SpeedTable, SpeedTier};
use log::LevelFilter;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(try_from = "RawConfig")]
pub(crate) struct Config {
    /// Size of the playing field
    pub(crate) grid: GridSize,

    /// Delay between ticks for each snake length
    pub(crate) speed: SpeedTable,

    /// Settings for the log file
    pub(crate) log: LogConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("gridsnake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct LogConfig {
    /// File to write log messages to; if unset, the default log file path is
    /// used
    pub(crate) file: Option<PathBuf>,

    /// Least severe level of message to log.  `off` disables logging.
    pub(crate) level: LevelFilter,
}

impl LogConfig {
    /// Return the file that logs should be written to: the file given in the
    /// configuration or, if that is not set, the default log file path.
    /// Return `None` if no path is configured and the default path could not
    /// be computed.
    pub(crate) fn log_file(&self) -> Option<PathBuf> {
        self.file.clone().or_else(|| {
            dirs::data_local_dir().map(|p| p.join("gridsnake").join("gridsnake.log"))
        })
    }
}

impl Default for LogConfig {
    fn default() -> LogConfig {
        LogConfig {
            file: None,
            level: LevelFilter::Info,
        }
    }
}

#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(default)]
struct RawConfig {
    grid: RawGridConfig,
    speed: RawSpeedConfig,
    log: RawLogConfig,
}

#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(default)]
struct RawGridConfig {
    width: u16,
    height: u16,
}

impl Default for RawGridConfig {
    fn default() -> RawGridConfig {
        RawGridConfig {
            width: GridSize::DEFAULT.width(),
            height: GridSize::DEFAULT.height(),
        }
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct RawSpeedConfig {
    tiers: Vec<SpeedTier>,
    #[serde(deserialize_with = "deserialize_millis")]
    fallback_ms: Duration,
}

impl Default for RawSpeedConfig {
    fn default() -> RawSpeedConfig {
        RawSpeedConfig {
            tiers: SpeedTable::DEFAULT_TIERS.to_vec(),
            fallback_ms: SpeedTable::DEFAULT_FALLBACK,
        }
    }
}

#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(default)]
struct RawLogConfig {
    file: Option<PathBuf>,
    level: Option<LevelFilter>,
}

impl TryFrom<RawConfig> for Config {
    type Error = ConfigValueError;

    fn try_from(value: RawConfig) -> Result<Config, ConfigValueError> {
        let RawConfig { grid, speed, log } = value;
        Ok(Config {
            grid: GridSize::new(grid.width, grid.height)?,
            speed: SpeedTable::new(speed.tiers, speed.fallback_ms)?,
            log: LogConfig {
                file: log.file,
                level: log.level.unwrap_or(LevelFilter::Info),
            },
        })
    }
}

/// Error for configuration values that parse but make no sense
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum ConfigValueError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Speed(#[from] SpeedError),
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}
