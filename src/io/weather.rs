//! CSV weather file reader.
//!
//! Expected columns: `time`, `ghi`, `temp_air`, `wind_speed`, and optionally
//! `dni` and `dhi`. Missing component columns or empty cells become `NaN`,
//! which the engine fills with a decomposition model. Timestamps are RFC 3339
//! or naive `YYYY-MM-DD HH:MM[:SS]` taken as UTC.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::sim::weather::WeatherSample;

/// Weather file parse error with row context.
#[derive(Debug)]
pub struct WeatherError {
    /// One-based data row number, 0 for header/file-level errors.
    pub row: usize,
    /// Human-readable description.
    pub message: String,
}

impl fmt::Display for WeatherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.row == 0 {
            write!(f, "weather file error: {}", self.message)
        } else {
            write!(f, "weather file error (row {}): {}", self.row, self.message)
        }
    }
}

/// Reads a weather series from a CSV file.
///
/// # Errors
///
/// Returns a `WeatherError` if the file cannot be opened or parsed.
pub fn read_weather_csv(path: &Path) -> Result<Vec<WeatherSample>, WeatherError> {
    let file = File::open(path).map_err(|e| WeatherError {
        row: 0,
        message: format!("cannot open \"{}\": {e}", path.display()),
    })?;
    read_weather(file)
}

/// Reads a weather series from any reader.
///
/// # Errors
///
/// Returns a `WeatherError` if the header lacks required columns or a row
/// fails to parse.
pub fn read_weather(reader: impl Read) -> Result<Vec<WeatherSample>, WeatherError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| WeatherError {
            row: 0,
            message: format!("cannot read header: {e}"),
        })?
        .clone();
    let col = |name: &str| headers.iter().position(|h| h == name);

    let time_col = col("time").ok_or_else(|| missing_column("time"))?;
    let ghi_col = col("ghi").ok_or_else(|| missing_column("ghi"))?;
    let temp_col = col("temp_air").ok_or_else(|| missing_column("temp_air"))?;
    let wind_col = col("wind_speed").ok_or_else(|| missing_column("wind_speed"))?;
    let dni_col = col("dni");
    let dhi_col = col("dhi");

    let mut samples = Vec::new();
    for (idx, record) in rdr.records().enumerate() {
        let row = idx + 1;
        let record = record.map_err(|e| WeatherError {
            row,
            message: e.to_string(),
        })?;

        let time = parse_timestamp(&record[time_col]).ok_or_else(|| WeatherError {
            row,
            message: format!("invalid timestamp \"{}\"", &record[time_col]),
        })?;

        samples.push(WeatherSample {
            time,
            ghi: parse_required(&record[ghi_col], "ghi", row)?,
            dni: parse_optional(dni_col.map(|c| &record[c]), "dni", row)?,
            dhi: parse_optional(dhi_col.map(|c| &record[c]), "dhi", row)?,
            temp_air: parse_required(&record[temp_col], "temp_air", row)?,
            wind_speed: parse_required(&record[wind_col], "wind_speed", row)?,
        });
    }
    Ok(samples)
}

fn missing_column(name: &str) -> WeatherError {
    WeatherError {
        row: 0,
        message: format!("missing required column \"{name}\""),
    }
}

fn parse_required(field: &str, name: &str, row: usize) -> Result<f64, WeatherError> {
    field.parse::<f64>().map_err(|_| WeatherError {
        row,
        message: format!("invalid {name} value \"{field}\""),
    })
}

/// Absent column or empty cell becomes `NaN` (not measured).
fn parse_optional(field: Option<&str>, name: &str, row: usize) -> Result<f64, WeatherError> {
    match field {
        None => Ok(f64::NAN),
        Some("") => Ok(f64::NAN),
        Some(v) => parse_required(v, name, row),
    }
}

fn parse_timestamp(field: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(field) {
        return Some(ts.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(field, fmt) {
            return Some(naive.and_utc());
        }
    }
    None
}
