//! Typed mirror of the One Call response body.
//!
//! Fields the provider leaves out or sends as `null` (because the section was excluded
//! or the value is unavailable) decode to their zero/empty value. Nothing is interpolated.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnNull, serde_as};

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherSnapshot {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "lon")]
    pub longitude: f64,
    /// IANA zone name, e.g. "Europe/Berlin".
    #[serde_as(as = "DefaultOnNull")]
    pub timezone: String,
    /// Shift from UTC in seconds.
    #[serde_as(as = "DefaultOnNull")]
    pub timezone_offset: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<CurrentWeather>,
    #[serde_as(as = "DefaultOnNull")]
    pub minutely: Vec<MinutelyForecast>,
    #[serde_as(as = "DefaultOnNull")]
    pub hourly: Vec<HourlyForecast>,
    #[serde_as(as = "DefaultOnNull")]
    pub daily: Vec<DailyForecast>,
    #[serde_as(as = "DefaultOnNull")]
    pub alerts: Vec<Alert>,
}

impl WeatherSnapshot {
    /// Local offset of the requested location, if the provider sent a sane one.
    pub fn offset(&self) -> Option<FixedOffset> {
        FixedOffset::east_opt(self.timezone_offset)
    }
}

/// Short condition descriptor ("Rain", "light rain", icon "10d").
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Condition {
    #[serde_as(as = "DefaultOnNull")]
    pub id: u32,
    #[serde_as(as = "DefaultOnNull")]
    pub main: String,
    #[serde_as(as = "DefaultOnNull")]
    pub description: String,
    #[serde_as(as = "DefaultOnNull")]
    pub icon: String,
}

/// Accumulation over the last hour, in mm.
#[serde_as]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Precipitation {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "1h")]
    pub one_hour: f64,
}

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentWeather {
    #[serde_as(as = "DefaultOnNull")]
    pub dt: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub sunrise: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub sunset: i64,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "temp")]
    pub temperature: f64,
    #[serde_as(as = "DefaultOnNull")]
    pub feels_like: f64,
    /// hPa
    #[serde_as(as = "DefaultOnNull")]
    pub pressure: u32,
    /// %
    #[serde_as(as = "DefaultOnNull")]
    pub humidity: u32,
    #[serde_as(as = "DefaultOnNull")]
    pub dew_point: f64,
    /// %
    #[serde_as(as = "DefaultOnNull")]
    pub clouds: u32,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "uvi")]
    pub uv_index: f64,
    /// m
    #[serde_as(as = "DefaultOnNull")]
    pub visibility: u32,
    #[serde_as(as = "DefaultOnNull")]
    pub wind_speed: f64,
    #[serde_as(as = "DefaultOnNull")]
    pub wind_gust: f64,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "wind_deg")]
    pub wind_degree: u32,
    #[serde_as(as = "DefaultOnNull")]
    pub rain: Precipitation,
    #[serde_as(as = "DefaultOnNull")]
    pub snow: Precipitation,
    #[serde_as(as = "DefaultOnNull")]
    pub weather: Vec<Condition>,
}

impl CurrentWeather {
    pub fn time(&self) -> Option<DateTime<Utc>> {
        unix_to_utc(self.dt)
    }

    pub fn sunrise_time(&self) -> Option<DateTime<Utc>> {
        unix_to_utc(self.sunrise)
    }

    pub fn sunset_time(&self) -> Option<DateTime<Utc>> {
        unix_to_utc(self.sunset)
    }
}

#[serde_as]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinutelyForecast {
    #[serde_as(as = "DefaultOnNull")]
    pub dt: i64,
    /// mm/h
    #[serde_as(as = "DefaultOnNull")]
    pub precipitation: f64,
}

impl MinutelyForecast {
    pub fn time(&self) -> Option<DateTime<Utc>> {
        unix_to_utc(self.dt)
    }
}

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HourlyForecast {
    #[serde_as(as = "DefaultOnNull")]
    pub dt: i64,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "temp")]
    pub temperature: f64,
    #[serde_as(as = "DefaultOnNull")]
    pub feels_like: f64,
    #[serde_as(as = "DefaultOnNull")]
    pub pressure: u32,
    #[serde_as(as = "DefaultOnNull")]
    pub humidity: u32,
    #[serde_as(as = "DefaultOnNull")]
    pub dew_point: f64,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "uvi")]
    pub uv_index: f64,
    #[serde_as(as = "DefaultOnNull")]
    pub clouds: u32,
    #[serde_as(as = "DefaultOnNull")]
    pub visibility: u32,
    #[serde_as(as = "DefaultOnNull")]
    pub wind_speed: f64,
    #[serde_as(as = "DefaultOnNull")]
    pub wind_gust: f64,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "wind_deg")]
    pub wind_degree: u32,
    /// Probability of precipitation, 0.0..=1.0.
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "pop")]
    pub precipitation_probability: f64,
    #[serde_as(as = "DefaultOnNull")]
    pub rain: Precipitation,
    #[serde_as(as = "DefaultOnNull")]
    pub snow: Precipitation,
    #[serde_as(as = "DefaultOnNull")]
    pub weather: Vec<Condition>,
}

impl HourlyForecast {
    pub fn time(&self) -> Option<DateTime<Utc>> {
        unix_to_utc(self.dt)
    }
}

#[serde_as]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyTemperature {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "morn")]
    pub morning: f64,
    #[serde_as(as = "DefaultOnNull")]
    pub day: f64,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "eve")]
    pub evening: f64,
    #[serde_as(as = "DefaultOnNull")]
    pub night: f64,
    #[serde_as(as = "DefaultOnNull")]
    pub min: f64,
    #[serde_as(as = "DefaultOnNull")]
    pub max: f64,
}

#[serde_as]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyFeelsLike {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "morn")]
    pub morning: f64,
    #[serde_as(as = "DefaultOnNull")]
    pub day: f64,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "eve")]
    pub evening: f64,
    #[serde_as(as = "DefaultOnNull")]
    pub night: f64,
}

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyForecast {
    #[serde_as(as = "DefaultOnNull")]
    pub dt: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub sunrise: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub sunset: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub moonrise: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub moonset: i64,
    /// 0 and 1 are new moon, 0.5 is full moon.
    #[serde_as(as = "DefaultOnNull")]
    pub moon_phase: f64,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "temp")]
    pub temperature: DailyTemperature,
    #[serde_as(as = "DefaultOnNull")]
    pub feels_like: DailyFeelsLike,
    #[serde_as(as = "DefaultOnNull")]
    pub pressure: u32,
    #[serde_as(as = "DefaultOnNull")]
    pub humidity: u32,
    #[serde_as(as = "DefaultOnNull")]
    pub dew_point: f64,
    #[serde_as(as = "DefaultOnNull")]
    pub wind_speed: f64,
    #[serde_as(as = "DefaultOnNull")]
    pub wind_gust: f64,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "wind_deg")]
    pub wind_degree: u32,
    #[serde_as(as = "DefaultOnNull")]
    pub clouds: u32,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "uvi")]
    pub uv_index: f64,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "pop")]
    pub precipitation_probability: f64,
    /// Daily total, mm.
    #[serde_as(as = "DefaultOnNull")]
    pub rain: f64,
    /// Daily total, mm.
    #[serde_as(as = "DefaultOnNull")]
    pub snow: f64,
    #[serde_as(as = "DefaultOnNull")]
    pub weather: Vec<Condition>,
}

impl DailyForecast {
    pub fn time(&self) -> Option<DateTime<Utc>> {
        unix_to_utc(self.dt)
    }
}

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Alert {
    #[serde_as(as = "DefaultOnNull")]
    pub sender_name: String,
    #[serde_as(as = "DefaultOnNull")]
    pub event: String,
    #[serde_as(as = "DefaultOnNull")]
    pub start: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub end: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub description: String,
    #[serde_as(as = "DefaultOnNull")]
    pub tags: Vec<String>,
}

impl Alert {
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        unix_to_utc(self.start)
    }

    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        unix_to_utc(self.end)
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"{
        "lat": 50.95,
        "lon": 6.95,
        "timezone": "Europe/Berlin",
        "timezone_offset": 3600,
        "current": {
            "dt": 1700000000,
            "sunrise": 1699984000,
            "sunset": 1700018000,
            "temp": 12.3,
            "feels_like": 11.1,
            "pressure": 1013,
            "humidity": 81,
            "dew_point": 9.2,
            "uvi": 0.89,
            "clouds": 75,
            "visibility": 10000,
            "wind_speed": 4.1,
            "wind_gust": 7.2,
            "wind_deg": 230,
            "rain": { "1h": 0.25 },
            "snow": { "1h": 0.0 },
            "weather": [
                { "id": 500, "main": "Rain", "description": "light rain", "icon": "10d" }
            ]
        },
        "minutely": [
            { "dt": 1700000040, "precipitation": 0.0 },
            { "dt": 1700000100, "precipitation": 0.31 }
        ],
        "hourly": [
            {
                "dt": 1700002800,
                "temp": 12.0,
                "feels_like": 10.9,
                "pressure": 1012,
                "humidity": 83,
                "dew_point": 9.0,
                "uvi": 0.5,
                "clouds": 90,
                "visibility": 9000,
                "wind_speed": 4.5,
                "wind_gust": 8.0,
                "wind_deg": 240,
                "pop": 0.6,
                "rain": { "1h": 0.4 },
                "weather": [
                    { "id": 501, "main": "Rain", "description": "moderate rain", "icon": "10d" }
                ]
            }
        ],
        "daily": [
            {
                "dt": 1700042400,
                "sunrise": 1699984000,
                "sunset": 1700018000,
                "moonrise": 1699990000,
                "moonset": 1700020000,
                "moon_phase": 0.12,
                "summary": "Expect a day of partly cloudy with rain",
                "temp": { "day": 13.1, "min": 7.2, "max": 14.0, "night": 8.3, "eve": 11.0, "morn": 7.5 },
                "feels_like": { "day": 12.4, "night": 6.9, "eve": 10.2, "morn": 5.8 },
                "pressure": 1011,
                "humidity": 78,
                "dew_point": 8.8,
                "wind_speed": 5.2,
                "wind_deg": 250,
                "wind_gust": 11.3,
                "weather": [
                    { "id": 500, "main": "Rain", "description": "light rain", "icon": "10d" }
                ],
                "clouds": 88,
                "pop": 0.92,
                "rain": 3.48,
                "uvi": 1.2
            }
        ],
        "alerts": [
            {
                "sender_name": "Deutscher Wetterdienst",
                "event": "wind gusts",
                "start": 1700010000,
                "end": 1700040000,
                "description": "There is a risk of wind gusts.",
                "tags": ["Wind"]
            }
        ]
    }"#;

    #[test]
    fn decodes_every_field() {
        let s: WeatherSnapshot = serde_json::from_str(FULL).expect("valid document");

        assert_eq!(s.latitude, 50.95);
        assert_eq!(s.longitude, 6.95);
        assert_eq!(s.timezone, "Europe/Berlin");
        assert_eq!(s.timezone_offset, 3600);

        let c = s.current.as_ref().expect("current section");
        assert_eq!(c.dt, 1_700_000_000);
        assert_eq!(c.sunrise, 1_699_984_000);
        assert_eq!(c.sunset, 1_700_018_000);
        assert_eq!(c.temperature, 12.3);
        assert_eq!(c.feels_like, 11.1);
        assert_eq!(c.pressure, 1013);
        assert_eq!(c.humidity, 81);
        assert_eq!(c.dew_point, 9.2);
        assert_eq!(c.uv_index, 0.89);
        assert_eq!(c.clouds, 75);
        assert_eq!(c.visibility, 10000);
        assert_eq!(c.wind_speed, 4.1);
        assert_eq!(c.wind_gust, 7.2);
        assert_eq!(c.wind_degree, 230);
        assert_eq!(c.rain.one_hour, 0.25);
        assert_eq!(c.snow.one_hour, 0.0);
        assert_eq!(
            c.weather,
            vec![Condition {
                id: 500,
                main: "Rain".into(),
                description: "light rain".into(),
                icon: "10d".into(),
            }]
        );

        assert_eq!(s.minutely.len(), 2);
        assert_eq!(s.minutely[1].dt, 1_700_000_100);
        assert_eq!(s.minutely[1].precipitation, 0.31);

        let h = &s.hourly[0];
        assert_eq!(h.dt, 1_700_002_800);
        assert_eq!(h.temperature, 12.0);
        assert_eq!(h.feels_like, 10.9);
        assert_eq!(h.pressure, 1012);
        assert_eq!(h.humidity, 83);
        assert_eq!(h.dew_point, 9.0);
        assert_eq!(h.uv_index, 0.5);
        assert_eq!(h.clouds, 90);
        assert_eq!(h.visibility, 9000);
        assert_eq!(h.wind_speed, 4.5);
        assert_eq!(h.wind_gust, 8.0);
        assert_eq!(h.wind_degree, 240);
        assert_eq!(h.precipitation_probability, 0.6);
        assert_eq!(h.rain.one_hour, 0.4);
        assert_eq!(h.snow, Precipitation::default());
        assert_eq!(h.weather[0].description, "moderate rain");

        let d = &s.daily[0];
        assert_eq!(d.dt, 1_700_042_400);
        assert_eq!(d.moonrise, 1_699_990_000);
        assert_eq!(d.moonset, 1_700_020_000);
        assert_eq!(d.moon_phase, 0.12);
        assert_eq!(
            d.temperature,
            DailyTemperature {
                morning: 7.5,
                day: 13.1,
                evening: 11.0,
                night: 8.3,
                min: 7.2,
                max: 14.0,
            }
        );
        assert_eq!(
            d.feels_like,
            DailyFeelsLike {
                morning: 5.8,
                day: 12.4,
                evening: 10.2,
                night: 6.9,
            }
        );
        assert_eq!(d.pressure, 1011);
        assert_eq!(d.humidity, 78);
        assert_eq!(d.dew_point, 8.8);
        assert_eq!(d.wind_speed, 5.2);
        assert_eq!(d.wind_gust, 11.3);
        assert_eq!(d.wind_degree, 250);
        assert_eq!(d.clouds, 88);
        assert_eq!(d.uv_index, 1.2);
        assert_eq!(d.precipitation_probability, 0.92);
        assert_eq!(d.rain, 3.48);
        assert_eq!(d.snow, 0.0);

        let a = &s.alerts[0];
        assert_eq!(a.sender_name, "Deutscher Wetterdienst");
        assert_eq!(a.event, "wind gusts");
        assert_eq!(a.start, 1_700_010_000);
        assert_eq!(a.end, 1_700_040_000);
        assert_eq!(a.description, "There is a risk of wind gusts.");
        assert_eq!(a.tags, vec!["Wind".to_string()]);
    }

    #[test]
    fn missing_sections_are_empty() {
        let s: WeatherSnapshot = serde_json::from_str(
            r#"{"lat":50.95,"lon":6.95,"timezone":"Europe/Berlin","timezone_offset":3600,
                "current":{"dt":1700000000,"temp":12.3}}"#,
        )
        .unwrap();

        assert!(s.daily.is_empty());
        assert!(s.hourly.is_empty());
        assert!(s.minutely.is_empty());
        assert!(s.alerts.is_empty());

        let c = s.current.unwrap();
        assert_eq!(c.temperature, 12.3);
        assert_eq!(c.wind_gust, 0.0);
        assert_eq!(c.rain.one_hour, 0.0);
        assert!(c.weather.is_empty());
    }

    #[test]
    fn null_sections_and_fields_decode_as_empty() {
        let s: WeatherSnapshot =
            serde_json::from_str(r#"{"lat":1.0,"lon":2.0,"daily":null}"#).expect("null daily");
        assert!(s.daily.is_empty());

        let s: WeatherSnapshot = serde_json::from_str(
            r#"{"lat":1.0,"lon":2.0,"timezone":null,"timezone_offset":null,
                "current":{"dt":1700000000,"temp":null,"rain":null,"weather":null},
                "minutely":null,"hourly":[{"dt":1,"pop":null,"wind_gust":null}],
                "daily":[{"temp":null,"rain":null}],
                "alerts":[{"event":"fog","tags":null}]}"#,
        )
        .expect("nulls decode to zero values");

        assert_eq!(s.timezone, "");
        assert_eq!(s.timezone_offset, 0);
        let c = s.current.unwrap();
        assert_eq!(c.temperature, 0.0);
        assert_eq!(c.rain, Precipitation::default());
        assert!(c.weather.is_empty());
        assert!(s.minutely.is_empty());
        assert_eq!(s.hourly[0].precipitation_probability, 0.0);
        assert_eq!(s.daily[0].temperature, DailyTemperature::default());
        assert_eq!(s.daily[0].rain, 0.0);
        assert!(s.alerts[0].tags.is_empty());
    }

    #[test]
    fn null_current_is_none() {
        let s: WeatherSnapshot = serde_json::from_str(r#"{"current":null}"#).unwrap();
        assert!(s.current.is_none());
    }

    #[test]
    fn excluded_current_is_none() {
        let s: WeatherSnapshot = serde_json::from_str(r#"{"lat":1.0,"lon":2.0,"daily":[]}"#).unwrap();
        assert!(s.current.is_none());
        assert_eq!(s.timezone, "");
    }

    #[test]
    fn schema_mismatch_is_an_error() {
        assert!(serde_json::from_str::<WeatherSnapshot>(r#"{"lat":"north"}"#).is_err());
        assert!(serde_json::from_str::<WeatherSnapshot>(r#"{"daily":{}}"#).is_err());
        assert!(serde_json::from_str::<WeatherSnapshot>("not json").is_err());
    }

    #[test]
    fn timestamp_helpers() {
        let s: WeatherSnapshot = serde_json::from_str(FULL).unwrap();
        let c = s.current.as_ref().unwrap();

        assert_eq!(c.time().unwrap().to_rfc3339(), "2023-11-14T22:13:20+00:00");
        assert!(c.sunrise_time().unwrap() < c.sunset_time().unwrap());
        assert!(s.alerts[0].start_time().unwrap() < s.alerts[0].end_time().unwrap());
        assert_eq!(s.offset().unwrap().local_minus_utc(), 3600);
    }
}
