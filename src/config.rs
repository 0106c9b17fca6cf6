use std::path::PathBuf;

use anyhow::{anyhow, Result};
use directories::BaseDirs;

/// Spreadsheet written by the "update spreadsheet" action, relative to the
/// working directory.
pub const DEFAULT_SPREADSHEET: &str = "clientes_atualizados.xlsx";
/// Path pre-filled in the image destination prompt.
pub const DEFAULT_IMAGE: &str = "clientes.png";
/// Folder name used beneath the user's home directory for the log file.
const DATA_DIR_NAME: &str = ".client-manager";
const LOG_FILE_NAME: &str = "client-manager.log";

/// Runtime settings resolved once at startup and handed to the UI.
#[derive(Debug, Clone)]
pub struct Config {
    pub spreadsheet_path: PathBuf,
    pub image_path: PathBuf,
    pub log_file: PathBuf,
    /// Default `tracing` level when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Config {
    /// Build a config, falling back to the defaults for anything not given.
    pub fn resolve(
        spreadsheet_path: Option<PathBuf>,
        image_path: Option<PathBuf>,
        log_file: Option<PathBuf>,
        log_level: Option<String>,
    ) -> Result<Self> {
        let log_file = match log_file {
            Some(path) => path,
            None => default_log_path()?,
        };
        Ok(Self {
            spreadsheet_path: spreadsheet_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SPREADSHEET)),
            image_path: image_path.unwrap_or_else(|| PathBuf::from(DEFAULT_IMAGE)),
            log_file,
            log_level: log_level.unwrap_or_else(|| "info".to_string()),
        })
    }
}

/// Resolve the log file inside the user's home.
fn default_log_path() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(LOG_FILE_NAME))
}
