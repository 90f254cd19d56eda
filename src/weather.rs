use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::WeatherConfig;
use crate::http_client::get_with_query;

const WEATHER_URL: &str = "http://api.openweathermap.org/data/2.5/weather";
const FALLBACK_DESCRIPTION: &str = "Clear";
const FALLBACK_TEMP_C: f64 = 25.0;
const KELVIN_OFFSET: f64 = 273.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherStatus {
    Live,
    ApiError,
    NetworkError,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub description: String,
    pub temperature_c: f64,
    pub status: WeatherStatus,
    pub fetched_at: DateTime<Utc>,
}

impl WeatherReport {
    fn fallback(status: WeatherStatus) -> Self {
        Self {
            description: FALLBACK_DESCRIPTION.to_string(),
            temperature_c: FALLBACK_TEMP_C,
            status,
            fetched_at: Utc::now(),
        }
    }
}

pub fn status_label(status: WeatherStatus) -> &'static str {
    match status {
        WeatherStatus::Live => "Live",
        WeatherStatus::ApiError => "API Error",
        WeatherStatus::NetworkError => "Network Error",
    }
}

#[derive(Debug, Deserialize)]
struct OwmResponse {
    weather: Vec<OwmCondition>,
    main: OwmMain,
}

#[derive(Debug, Deserialize)]
struct OwmCondition {
    main: String,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
}

#[derive(Debug, thiserror::Error)]
enum WeatherError {
    #[error("weather api returned {0}")]
    Api(StatusCode),
    #[error("weather api key not configured")]
    NoKey,
    #[error(transparent)]
    Network(#[from] anyhow::Error),
}

/// Current conditions near `venue`. Never fails: any problem yields the
/// canned "Clear, 25.0" report tagged with the error status.
pub fn live_weather(venue: &str, cfg: &WeatherConfig) -> WeatherReport {
    let city = query_city(venue);
    match fetch_weather(city, cfg) {
        Ok((description, temperature_c)) => {
            debug!(venue, city, temperature_c, "live weather");
            WeatherReport {
                description,
                temperature_c,
                status: WeatherStatus::Live,
                fetched_at: Utc::now(),
            }
        }
        Err(err @ (WeatherError::Api(_) | WeatherError::NoKey)) => {
            warn!(venue, "weather unavailable: {err}");
            WeatherReport::fallback(WeatherStatus::ApiError)
        }
        Err(WeatherError::Network(err)) => {
            warn!(venue, "weather fetch failed: {err:#}");
            WeatherReport::fallback(WeatherStatus::NetworkError)
        }
    }
}

/// "The Sevens, Dubai" -> "Dubai".
pub fn query_city(venue: &str) -> &str {
    match venue.rsplit_once(',') {
        Some((_, city)) => city.trim(),
        None => venue.trim(),
    }
}

fn fetch_weather(city: &str, cfg: &WeatherConfig) -> Result<(String, f64), WeatherError> {
    let Some(key) = cfg.api_key.as_deref() else {
        return Err(WeatherError::NoKey);
    };
    let reply = get_with_query(WEATHER_URL, &[("q", city), ("appid", key)], cfg.timeout)?;
    if !reply.is_ok() {
        return Err(WeatherError::Api(reply.status));
    }
    Ok(parse_weather_json(&reply.body)?)
}

/// Condition label and Celsius temperature rounded to one decimal.
pub fn parse_weather_json(raw: &str) -> anyhow::Result<(String, f64)> {
    let resp = serde_json::from_str::<OwmResponse>(raw)?;
    let description = resp
        .weather
        .into_iter()
        .next()
        .map(|w| w.main)
        .ok_or_else(|| anyhow::anyhow!("weather response has no conditions"))?;
    let celsius = ((resp.main.temp - KELVIN_OFFSET) * 10.0).round() / 10.0;
    Ok((description, celsius))
}
