use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub remote: RemoteSettings,
    #[serde(default)]
    pub weather: WeatherSettings,
}

/// Best-effort remote store (Supabase-style REST). Calculations always land
/// locally first; nothing here gates the calculator itself.
#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct RemoteSettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub api_key: String,
}

#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct WeatherSettings {
    #[serde(default)]
    pub api_key: String,
}
