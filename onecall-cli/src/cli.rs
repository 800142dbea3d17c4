use anyhow::{Context, Result, bail};
use chrono::{DateTime, FixedOffset, Utc};
use clap::{Args, Parser, Subcommand};
use inquire::{
    CustomType, CustomUserError, MultiSelect, Password, PasswordDisplayMode, Select, Text,
    validator::Validation,
};
use onecall_core::{RequestConfig, Section, Sections, Units, WeatherClient, WeatherSnapshot};
use std::fmt;
use tracing::{debug, warn};

use crate::config::{Config, Location};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "onecall", version, about = "OpenWeather One Call CLI")]
pub struct Cli {
    /// Log request details to stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactively store API key, location and request defaults.
    Configure,

    /// Fetch the weather once and print it.
    Show(ShowArgs),
}

#[derive(Debug, Default, Args)]
pub struct ShowArgs {
    /// Latitude in degrees; falls back to the configured location.
    #[arg(long, allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Longitude in degrees; falls back to the configured location.
    #[arg(long, allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// Sections to request, e.g. "current,hourly,daily". Unknown names are ignored.
    #[arg(long, value_delimiter = ',')]
    pub want: Option<Vec<String>>,

    /// standard, metric or imperial.
    #[arg(long)]
    pub units: Option<Units>,

    /// Language code for condition descriptions, e.g. "de".
    #[arg(long)]
    pub lang: Option<String>,

    #[arg(long, env = "OWM_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Print the whole snapshot as JSON instead of a summary.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show(args) => show(args).await,
        }
    }
}

impl ShowArgs {
    /// Location and key all given on the command line.
    pub fn is_self_contained(&self) -> bool {
        self.lat.is_some() && self.lon.is_some() && self.api_key.is_some()
    }

    /// An unreadable config file only matters when the flags leave a gap.
    pub fn fallback_config(&self, loaded: Result<Config>) -> Result<Config> {
        match loaded {
            Ok(config) => Ok(config),
            Err(err) if self.is_self_contained() => {
                warn!("Ignoring config file: {err:#}");
                Ok(Config::default())
            }
            Err(err) => Err(err),
        }
    }

    /// Merge flags over the stored config. Flags win.
    pub fn request_config(&self, config: &Config) -> Result<RequestConfig> {
        let location = match (self.lat, self.lon) {
            (Some(latitude), Some(longitude)) => Location {
                latitude,
                longitude,
            },
            (None, None) => config.location()?,
            _ => bail!("--lat and --lon must be given together"),
        };

        let api_key = match self.api_key.as_deref() {
            Some(key) => key,
            None => config.api_key()?,
        };

        let sections = self
            .want
            .as_ref()
            .map(Sections::from_names)
            .unwrap_or_else(|| config.wanted_sections());

        RequestConfig::build(
            location.latitude,
            location.longitude,
            sections,
            self.units.or(config.units),
            self.lang.as_deref().or(config.language.as_deref()),
            api_key,
        )
        .context("Invalid request parameters")
    }
}

async fn show(args: ShowArgs) -> Result<()> {
    let config = args.fallback_config(Config::load())?;
    let request = args.request_config(&config)?;
    debug!(?request, "resolved request");

    let units = request.units();
    let client = WeatherClient::new(request);
    let snapshot = client
        .fetch()
        .await
        .context("Error getting weather data")?;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&snapshot).context("Failed to serialize snapshot")?
        );
    } else {
        print!("{}", Summary { snapshot: &snapshot, units });
    }

    Ok(())
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key (empty keeps the current one):")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?;
    if !api_key.trim().is_empty() {
        config.api_key = Some(api_key.trim().to_string());
    }

    let mut latitude = CustomType::<f64>::new("Latitude:")
        .with_error_message("Please enter a number")
        .with_validator(valid_latitude);
    let mut longitude = CustomType::<f64>::new("Longitude:")
        .with_error_message("Please enter a number")
        .with_validator(valid_longitude);
    if let Some(loc) = config.location {
        latitude = latitude.with_default(loc.latitude);
        longitude = longitude.with_default(loc.longitude);
    }
    config.location = Some(Location {
        latitude: latitude.prompt()?,
        longitude: longitude.prompt()?,
    });

    config.units = Some(Select::new("Units:", Units::all().to_vec()).prompt()?);

    let language = Text::new("Language code (empty for provider default):")
        .with_default(config.language.as_deref().unwrap_or_default())
        .prompt()?;
    config.language = Some(language.trim().to_string()).filter(|l| !l.is_empty());

    let sections = MultiSelect::new("Sections to request:", Section::ALL.to_vec())
        .with_all_selected_by_default()
        .prompt()?;
    config.sections = Some(sections.iter().map(|s| s.as_str().to_string()).collect());

    // Reject values the client would refuse before writing them.
    ShowArgs::default().request_config(&config)?;

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());

    Ok(())
}

fn valid_latitude(value: &f64) -> Result<Validation, CustomUserError> {
    Ok(degrees_within(*value, 90.0))
}

fn valid_longitude(value: &f64) -> Result<Validation, CustomUserError> {
    Ok(degrees_within(*value, 180.0))
}

fn degrees_within(value: f64, limit: f64) -> Validation {
    if value.is_finite() && (-limit..=limit).contains(&value) {
        Validation::Valid
    } else {
        Validation::Invalid(format!("Must be between -{limit} and {limit}").into())
    }
}

fn temperature_unit(units: Option<Units>) -> &'static str {
    match units {
        Some(Units::Metric) => "°C",
        Some(Units::Imperial) => "°F",
        Some(Units::Standard) | None => "K",
    }
}

fn speed_unit(units: Option<Units>) -> &'static str {
    match units {
        Some(Units::Imperial) => "mph",
        _ => "m/s",
    }
}

fn local_time(ts: Option<DateTime<Utc>>, offset: Option<FixedOffset>) -> String {
    match (ts, offset) {
        (Some(ts), Some(offset)) => ts.with_timezone(&offset).format("%Y-%m-%d %H:%M").to_string(),
        (Some(ts), None) => ts.format("%Y-%m-%d %H:%M UTC").to_string(),
        (None, _) => "-".to_string(),
    }
}

/// Human-readable summary of a snapshot.
pub struct Summary<'a> {
    pub snapshot: &'a WeatherSnapshot,
    pub units: Option<Units>,
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.snapshot;
        let temp = temperature_unit(self.units);
        let speed = speed_unit(self.units);
        let offset = snapshot.offset();

        writeln!(
            out,
            "Location: {:.2}, {:.2} ({})",
            snapshot.latitude, snapshot.longitude, snapshot.timezone
        )?;

        if let Some(current) = &snapshot.current {
            writeln!(out, "Time: {}", local_time(current.time(), offset))?;
            writeln!(out, "Sun rise: {}", local_time(current.sunrise_time(), offset))?;
            writeln!(out, "Sun set: {}", local_time(current.sunset_time(), offset))?;
            writeln!(out, "Temperature: {:.1} {temp}", current.temperature)?;
            writeln!(out, "Feels like: {:.1} {temp}", current.feels_like)?;
            writeln!(out, "Humidity: {} %", current.humidity)?;
            writeln!(out, "Pressure: {} hPa", current.pressure)?;
            writeln!(out, "Rain: {} mm", current.rain.one_hour)?;
            writeln!(out, "Wind speed: {} {speed}", current.wind_speed)?;
            writeln!(out, "Wind direction: {} °", current.wind_degree)?;
            if let Some(condition) = current.weather.first() {
                writeln!(out, "Conditions: {}", condition.description)?;
            }
        }

        if !snapshot.daily.is_empty() {
            writeln!(out, "Daily:")?;
            for day in &snapshot.daily {
                writeln!(
                    out,
                    "  {}  {:.1}..{:.1} {temp}  precipitation {:.0} %",
                    local_time(day.time(), offset),
                    day.temperature.min,
                    day.temperature.max,
                    day.precipitation_probability * 100.0
                )?;
            }
        }

        for alert in &snapshot.alerts {
            writeln!(
                out,
                "Alert: {} ({}) until {}",
                alert.event,
                alert.sender_name,
                local_time(alert.end_time(), offset)
            )?;
        }

        Ok(())
    }
}
