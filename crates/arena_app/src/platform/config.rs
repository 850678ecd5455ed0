use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use arena_core::EngineId;
use arena_engine::ClientSettings;
use engine_logging::{engine_info, engine_warn};
use serde::{Deserialize, Serialize};

use super::cli::Cli;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

/// Config file read when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = ".arena.ron";

/// Where the loaded settings came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
    /// `--config` named a file that does not exist.
    MissingExplicit(PathBuf),
}

/// Settings loaded from `.arena.ron`, then overridden by command-line flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub base_url: String,
    pub engines: Vec<EngineId>,
    pub start_page: Option<u32>,
    pub max_pages: Option<u32>,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub output_dir: PathBuf,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        let client = ClientSettings::default();
        Self {
            base_url: client.base_url,
            engines: EngineId::ALL.to_vec(),
            start_page: None,
            max_pages: None,
            connect_timeout_secs: client.connect_timeout.as_secs(),
            request_timeout_secs: client.request_timeout.as_secs(),
            output_dir: PathBuf::from("output"),
        }
    }
}

impl ArenaConfig {
    /// Loads `explicit`, or `.arena.ron` when no path was given. A missing file
    /// yields the defaults; a missing explicit file is also logged as a warning.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, ConfigSource), ConfigError> {
        let path = explicit.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                if explicit.is_none() {
                    return Ok((Self::default(), ConfigSource::Defaults));
                }
                engine_warn!("Config file {:?} not found; using defaults", path);
                return Ok((
                    Self::default(),
                    ConfigSource::MissingExplicit(path.to_path_buf()),
                ));
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config = ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        engine_info!("Loaded config from {:?}", path);
        Ok((config, ConfigSource::File(path.to_path_buf())))
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(base_url) = &cli.base_url {
            self.base_url = base_url.clone();
        }
        if !cli.engines.is_empty() {
            self.engines = cli.engines.clone();
        }
        if cli.start_page.is_some() {
            self.start_page = cli.start_page;
        }
        if cli.max_pages.is_some() {
            self.max_pages = cli.max_pages;
        }
        if let Some(dir) = &cli.export_dir {
            self.output_dir = dir.clone();
        }
    }

    /// Configured engines in order, without repeats.
    pub fn selection(&self) -> Vec<EngineId> {
        let mut selection = Vec::with_capacity(self.engines.len());
        for engine in &self.engines {
            if selection.contains(engine) {
                engine_warn!("Engine {} listed more than once; ignoring repeat", engine);
            } else {
                selection.push(*engine);
            }
        }
        selection
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.base_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            start_page: self.start_page,
            max_pages: self.max_pages,
        }
    }
}
