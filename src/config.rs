use anyhow::{Context, Result};
use std::path::PathBuf;

const DATA_DIR_ENV: &str = "LEDGERLY_DATA_DIR";
const CURRENCY_ENV: &str = "LEDGERLY_CURRENCY";
pub(crate) const LOG_FILTER_ENV: &str = "LEDGERLY_LOG";

const DEFAULT_CURRENCY: &str = "₹";

#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub data_dir: PathBuf,
    pub currency: String,
}

impl Config {
    /// Resolve settings from the environment, falling back to the platform data directory.
    pub(crate) fn from_env() -> Result<Self> {
        let data_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => default_data_dir()?,
        };
        let currency = std::env::var(CURRENCY_ENV)
            .ok()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());
        Ok(Self { data_dir, currency })
    }

    /// Create the data directory if needed.
    pub(crate) fn ensure_data_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir).with_context(|| {
            format!(
                "Failed to create data directory: {}",
                self.data_dir.display()
            )
        })
    }

    pub(crate) fn db_path(&self) -> PathBuf {
        self.data_dir.join("ledgerly.db")
    }

    pub(crate) fn log_path(&self) -> PathBuf {
        self.data_dir.join("ledgerly.log")
    }
}

fn default_data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "ledgerly", "Ledgerly")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(proj_dirs.data_dir().to_path_buf())
}
