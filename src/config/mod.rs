mod settings;
mod state;

pub use settings::{Config, RemoteSettings, WeatherSettings};
pub use state::{CostDetails, ExtraCost, HistoryEntry, State, HISTORY_CAP};

use crate::error::{Result, RotaError};
use crate::template::DEFAULT_TEMPLATE;
use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;

/// Get the config directory path (~/.rotacalc/)
pub fn config_dir() -> Result<PathBuf> {
    // First try XDG-style directories
    if let Some(proj_dirs) = ProjectDirs::from("", "", "rotacalc") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    // Fallback to ~/.rotacalc/
    let home = dirs_home().ok_or_else(|| {
        RotaError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".rotacalc"))
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Load config.toml (missing file means defaults: remote and weather off).
/// The calculator must keep working when only collaborator config is absent.
pub fn load_config(config_dir: &PathBuf) -> Result<Config> {
    let path = config_dir.join("config.toml");
    if !path.exists() {
        return Ok(Config::default());
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| RotaError::ConfigParse { path, source: e })
}

/// Load state.toml (creates default if missing)
pub fn load_state(config_dir: &PathBuf) -> Result<State> {
    let path = config_dir.join("state.toml");
    if !path.exists() {
        return Ok(State::default());
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| RotaError::ConfigParse { path, source: e })
}

/// Save state.toml
pub fn save_state(config_dir: &PathBuf, state: &State) -> Result<()> {
    let path = config_dir.join("state.toml");
    let content = toml::to_string_pretty(state).map_err(|e| {
        RotaError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            e.to_string(),
        ))
    })?;
    fs::write(path, content)?;
    Ok(())
}

/// Active summary template: the local copy when present, otherwise the
/// built-in default.
pub fn load_template(config_dir: &PathBuf) -> Result<String> {
    let path = config_dir.join("template.txt");
    if !path.exists() {
        return Ok(DEFAULT_TEMPLATE.to_string());
    }
    Ok(fs::read_to_string(&path)?)
}

pub fn save_template(config_dir: &PathBuf, template: &str) -> Result<()> {
    fs::write(config_dir.join("template.txt"), template)?;
    Ok(())
}

/// Drop the local template copy so reads fall back to the default.
pub fn reset_template(config_dir: &PathBuf) -> Result<()> {
    let path = config_dir.join("template.txt");
    if path.exists() {
        fs::remove_file(path)?;
    }
    Ok(())
}

/// Per-device identifier used to key remote rows, generated once and kept in
/// its own file.
pub fn device_id(config_dir: &PathBuf) -> Result<String> {
    let path = config_dir.join("device_id");
    if path.exists() {
        let id = fs::read_to_string(&path)?.trim().to_string();
        if !id.is_empty() {
            return Ok(id);
        }
    }
    let id = generate_device_id();
    fs::write(&path, &id)?;
    Ok(id)
}

fn generate_device_id() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |d| d.subsec_nanos() as u64);
    let millis = chrono::Utc::now().timestamp_millis();
    format!("dev_{:x}{:x}_{}", std::process::id(), nanos, millis)
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"# Remote persistence (Supabase-style REST endpoint). Calculations are always
# stored locally; the remote store is best-effort and disabled by default.
[remote]
enabled = false
url = ""       # e.g. https://xyzcompany.supabase.co
api_key = ""   # anon key

[weather]
api_key = ""   # OpenWeather API key; leave empty to disable 'rotacalc weather'
"#;
