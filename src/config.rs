use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_PLAYERS_PATH: &str = "data/active_players_grandmaster.csv";
const DEFAULT_VENUES_PATH: &str = "data/venue_intelligence.csv";
const DEFAULT_BATTLES_PATH: &str = "data/key_battles.json";
const DEFAULT_WEATHER_TIMEOUT_SECS: u64 = 3;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub players_path: PathBuf,
    pub venues_path: PathBuf,
    pub battles_path: PathBuf,
    pub weather: WeatherConfig,
}

#[derive(Debug, Clone)]
pub struct WeatherConfig {
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_WEATHER_TIMEOUT_SECS),
        }
    }
}

impl AppConfig {
    /// Read from the environment. Call after `.env` files are loaded.
    pub fn from_env() -> Self {
        let timeout_secs = opt_env("WEATHER_TIMEOUT_SECS")
            .and_then(|val| val.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_WEATHER_TIMEOUT_SECS)
            .clamp(1, 10);
        Self {
            players_path: path_env("SQUADMIND_PLAYERS_PATH", DEFAULT_PLAYERS_PATH),
            venues_path: path_env("SQUADMIND_VENUES_PATH", DEFAULT_VENUES_PATH),
            battles_path: path_env("SQUADMIND_BATTLES_PATH", DEFAULT_BATTLES_PATH),
            weather: WeatherConfig {
                api_key: opt_env("OPENWEATHER_API_KEY"),
                timeout: Duration::from_secs(timeout_secs),
            },
        }
    }
}

fn opt_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .and_then(|val| if val.trim().is_empty() { None } else { Some(val) })
}

fn path_env(key: &str, default: &str) -> PathBuf {
    opt_env(key)
        .map(|val| PathBuf::from(val.trim()))
        .unwrap_or_else(|| PathBuf::from(default))
}
