//! Core simulation types: timing configuration and per-step records.

use std::fmt;

use chrono::{DateTime, Duration, NaiveDate, Utc};

/// Centralized simulation timing.
///
/// The engine and the weather synthesizer both reference this struct, so the
/// timestep duration is derived in exactly one place.
#[derive(Debug, Clone)]
pub struct SimTiming {
    /// First simulated instant (midnight UTC of the start date).
    pub start: DateTime<Utc>,
    /// Timestep length in minutes.
    pub step_minutes: u32,
    /// Number of days to simulate.
    pub days: u32,
    /// Duration of one timestep in hours.
    pub dt_hours: f64,
    /// Master random seed for reproducibility.
    pub seed: u64,
}

impl SimTiming {
    /// Creates a new timing configuration.
    ///
    /// # Panics
    ///
    /// Panics if `step_minutes` is zero, does not divide a day evenly, or
    /// `days` is zero.
    pub fn new(start_date: NaiveDate, step_minutes: u32, days: u32, seed: u64) -> Self {
        assert!(
            step_minutes > 0 && 1440 % step_minutes == 0,
            "step_minutes must be > 0 and divide 1440 evenly"
        );
        assert!(days > 0, "days must be > 0");
        Self {
            start: start_date
                .and_hms_opt(0, 0, 0)
                .expect("midnight is always valid")
                .and_utc(),
            step_minutes,
            days,
            dt_hours: f64::from(step_minutes) / 60.0,
            seed,
        }
    }

    /// Number of timesteps per simulated day.
    pub fn steps_per_day(&self) -> usize {
        (1440 / self.step_minutes) as usize
    }

    /// Total number of timesteps across all days.
    pub fn total_steps(&self) -> usize {
        self.steps_per_day() * self.days as usize
    }

    /// Timestamp of timestep `t`.
    pub fn timestamp(&self, t: usize) -> DateTime<Utc> {
        self.start + Duration::minutes(i64::from(self.step_minutes) * t as i64)
    }

    /// All simulated timestamps in order.
    pub fn timestamps(&self) -> Vec<DateTime<Utc>> {
        (0..self.total_steps()).map(|t| self.timestamp(t)).collect()
    }
}

/// Complete record of one simulation timestep.
#[derive(Debug, Clone)]
pub struct StepRecord {
    /// Timestep index.
    pub timestep: usize,
    /// UTC timestamp.
    pub time: DateTime<Utc>,
    /// Apparent (refraction-corrected) solar zenith angle, degrees.
    pub apparent_zenith: f64,
    /// Solar azimuth, degrees clockwise from north.
    pub azimuth: f64,
    /// Global horizontal irradiance, W/m².
    pub ghi: f64,
    /// Direct normal irradiance, W/m².
    pub dni: f64,
    /// Diffuse horizontal irradiance, W/m².
    pub dhi: f64,
    /// Total plane-of-array irradiance, W/m².
    pub poa_global: f64,
    /// Ambient air temperature, C.
    pub temp_air: f64,
    /// Wind speed, m/s.
    pub wind_speed: f64,
    /// SAPM cell temperature, C.
    pub temp_cell: f64,
    /// Array DC power at the maximum power point, W.
    pub dc_power_w: f64,
    /// Array voltage at the maximum power point, V.
    pub v_mp: f64,
    /// Array current at the maximum power point, A.
    pub i_mp: f64,
}

impl fmt::Display for StepRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "t={:>4} {} | zen={:>6.2}  az={:>6.2} | ghi={:>7.1}  dni={:>7.1}  \
             dhi={:>6.1}  poa={:>7.1} | Tair={:>5.1}C  Tcell={:>5.1}C | \
             P={:>9.1} W ({:.1} V, {:.2} A)",
            self.timestep,
            self.time.format("%Y-%m-%d %H:%M"),
            self.apparent_zenith,
            self.azimuth,
            self.ghi,
            self.dni,
            self.dhi,
            self.poa_global,
            self.temp_air,
            self.temp_cell,
            self.dc_power_w,
            self.v_mp,
            self.i_mp,
        )
    }
}
