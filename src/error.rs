use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RotaError {
    #[error("Config directory not found at {0}. Run 'rotacalc init' to create it.")]
    ConfigNotFound(PathBuf),

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config directory already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("Invalid value '{value}' for {field} (use comma as the decimal separator, e.g. '52,3')")]
    InvalidNumber { field: String, value: String },

    #[error("Calculation '{0}' not found in history")]
    EntryNotFound(String),

    #[error("Invalid entry index '{0}'. Use 'rotacalc list' to see recent calculations.")]
    InvalidEntryIndex(String),

    #[error("Calculation '{0}' has no cost details to remove")]
    NoCosts(String),

    #[error("Invalid extra cost '{0}'. Expected 'description:value' (e.g. 'Estadia:35,00')")]
    InvalidExtraFormat(String),

    #[error("No cost values supplied. Use --km, --pedagio, --provider-pedagio or --extra.")]
    NoCostInput,

    #[error("Invalid --period value: '{0}'. Use 'all', 'today', 'week' or 'month'.")]
    InvalidPeriod(String),

    #[error("Remote sync is disabled. Enable it under [remote] in config.toml.")]
    SyncDisabled,

    #[error("Sync failed: {0}")]
    Sync(String),

    #[error("Could not copy to clipboard: {0}")]
    Clipboard(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RotaError>;
