use std::fmt::Display;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{info, warn};

use crate::config::WeatherConfig;
use crate::error::{Error, Result};

pub const WEATHER_ERROR: &str = "Unable to load weather data. Please check your internet connection.";
pub const API_BASE: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Deserialize, Debug)]
pub struct CurrentResponse {
    #[serde(default)]
    pub name: String,
    pub main: Main,
    pub weather: Vec<Conditions>,
}

#[derive(Deserialize, Debug)]
pub struct ForecastResponse {
    pub list: Vec<ForecastEntry>,
}

#[derive(Deserialize, Debug)]
pub struct ForecastEntry {
    pub dt: i64,
    pub main: Main,
    pub weather: Vec<Conditions>,
}

#[derive(Deserialize, Debug)]
pub struct Main {
    pub temp: f32,
}

#[derive(Deserialize, Debug)]
pub struct Conditions {
    pub description: String,
    pub icon: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct WeatherReport {
    pub town: String,
    pub temperature: String,
    pub description: String,
    /// Provider icon code such as `03d`.
    pub icon: String,
    pub hourly: Vec<HourlyForecast>,
    pub daily: Vec<DailyForecast>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HourlyForecast {
    pub time: String,
    pub temperature: String,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DailyForecast {
    pub day: String,
    pub temperature: String,
    pub description: String,
    pub icon: String,
}

pub struct WeatherClient {
    config: WeatherConfig,
    client: reqwest::blocking::Client,
}

impl WeatherClient {
    pub fn new(config: WeatherConfig, timeout: Duration) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!("falling back to default HTTP client: {}", e);
                reqwest::blocking::Client::new()
            });
        WeatherClient { config, client }
    }

    fn url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}?lat={}&lon={}&appid={}&units={}",
            self.config.api_base.trim_end_matches('/'),
            endpoint,
            self.config.lat,
            self.config.lon,
            self.config.api_key,
            self.config.units
        )
    }

    fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = self.url(endpoint);
        // the query string carries the api key
        let location = format!("{}/{}", self.config.api_base.trim_end_matches('/'), endpoint);
        let network = |source| Error::Network {
            location: location.clone(),
            source,
        };

        let response = self.client.get(&url).send().map_err(network)?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                location: location.clone(),
                status: status.as_u16(),
            });
        }
        response.json::<T>().map_err(network)
    }

    pub fn fetch_report(&self) -> Result<WeatherReport> {
        let current: CurrentResponse = self.get("weather")?;
        let forecast: ForecastResponse = self.get("forecast")?;
        build_report(&current, &forecast, &self.config.units, &chrono::Local)
    }

    /// One attempt; any failure becomes the fixed weather message.
    pub fn load(&self) -> std::result::Result<WeatherReport, &'static str> {
        match self.fetch_report() {
            Ok(report) => {
                info!(town = %report.town, "weather loaded");
                Ok(report)
            }
            Err(e) => {
                warn!("weather unavailable: {}", e);
                Err(WEATHER_ERROR)
            }
        }
    }
}

pub fn unit_symbol(units: &str) -> &'static str {
    match units {
        "metric" => "°C",
        "imperial" => "°F",
        _ => "K",
    }
}

/// Glyph for a provider icon code. The day/night suffix is ignored.
pub fn icon_glyph(icon: &str) -> &'static str {
    match icon.get(..2).unwrap_or_default() {
        "01" => "☀",
        "02" => "🌤",
        "03" | "04" => "☁",
        "09" => "🌧",
        "10" => "🌦",
        "11" => "⛈",
        "13" => "❄",
        "50" => "🌫",
        _ => "🌡",
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn first_conditions<'a>(weather: &'a [Conditions], location: &str) -> Result<&'a Conditions> {
    weather.first().ok_or_else(|| Error::MissingArray {
        location: location.to_string(),
        key: "weather".to_string(),
    })
}

pub fn build_report<Tz>(
    current: &CurrentResponse,
    forecast: &ForecastResponse,
    units: &str,
    tz: &Tz,
) -> Result<WeatherReport>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let symbol = unit_symbol(units);
    let now = first_conditions(&current.weather, "weather")?;
    let local = |dt: i64| -> DateTime<Tz> {
        DateTime::<Utc>::from_timestamp(dt, 0)
            .unwrap_or_default()
            .with_timezone(tz)
    };

    let mut hourly = Vec::new();
    for entry in forecast.list.iter().take(8) {
        let conditions = first_conditions(&entry.weather, "forecast")?;
        hourly.push(HourlyForecast {
            time: local(entry.dt).format("%H:%M").to_string(),
            temperature: format!("{:.1}{}", entry.main.temp, symbol),
            description: conditions.description.clone(),
        });
    }

    // the provider reports every 3 hours, so every 8th entry is a new day
    let mut daily = Vec::new();
    for entry in forecast.list.iter().step_by(8).take(3) {
        let conditions = first_conditions(&entry.weather, "forecast")?;
        daily.push(DailyForecast {
            day: local(entry.dt).format("%a").to_string(),
            temperature: format!("{}{}", entry.main.temp.round() as i32, symbol),
            description: conditions.description.clone(),
            icon: conditions.icon.clone(),
        });
    }

    Ok(WeatherReport {
        town: current.name.clone(),
        temperature: format!("{}{}", current.main.temp.round() as i32, symbol),
        description: capitalize(&now.description),
        icon: now.icon.clone(),
        hourly,
        daily,
    })
}
