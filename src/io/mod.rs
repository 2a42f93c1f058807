//! Telemetry export and weather file ingestion.

pub mod export;
pub mod weather;

pub use export::{export_csv, write_csv};
pub use weather::{WeatherError, read_weather, read_weather_csv};
