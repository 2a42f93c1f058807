//! Simulation layer: timing, synthetic weather, the step engine, and KPIs.

pub mod engine;
pub mod kpi;
pub mod types;
pub mod weather;

pub use engine::{ArraySetup, Engine};
pub use kpi::KpiReport;
pub use types::{SimTiming, StepRecord};
pub use weather::{Ambient, CloudField, WeatherSample};
