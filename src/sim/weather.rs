//! Synthetic weather: AR(1) cloud transmittance and diurnal ambient
//! conditions.

use chrono::{DateTime, Utc};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// One weather observation, measured or synthesized.
///
/// Irradiance components may be `NaN` when a measured file does not carry
/// them; the engine fills the gaps with a decomposition model.
#[derive(Debug, Clone, Copy)]
pub struct WeatherSample {
    /// UTC timestamp.
    pub time: DateTime<Utc>,
    /// Global horizontal irradiance, W/m².
    pub ghi: f64,
    /// Direct normal irradiance, W/m² (`NaN` if not measured).
    pub dni: f64,
    /// Diffuse horizontal irradiance, W/m² (`NaN` if not measured).
    pub dhi: f64,
    /// Air temperature, C.
    pub temp_air: f64,
    /// Wind speed, m/s.
    pub wind_speed: f64,
}

/// Gaussian noise via the Box-Muller transform.
///
/// Returns zero for a non-positive standard deviation.
pub fn gaussian_noise(rng: &mut StdRng, std_dev: f64) -> f64 {
    if std_dev <= 0.0 {
        return 0.0;
    }
    let u1: f64 = rng.random::<f64>().clamp(1e-6, 1.0);
    let u2: f64 = rng.random::<f64>();
    let z0 = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    z0 * std_dev
}

/// Heaviest overcast the transmittance process can reach.
const TRANSMITTANCE_MIN: f64 = 0.05;
/// Clearest sky the transmittance process can reach.
const TRANSMITTANCE_MAX: f64 = 0.85;

/// Temporally correlated broadband atmospheric transmittance.
///
/// Cloud fronts persist over many timesteps, so independent per-step noise
/// looks wrong in telemetry. The transmittance follows a first-order
/// autoregressive process around the clear-sky value:
/// ```text
/// tau(t) = alpha * tau(t-1) + (1 - alpha) * (tau_clear + epsilon(t))
/// ```
/// clamped to \[0.05, 0.85\]. `alpha` near 1 gives slow-moving fronts,
/// `alpha` of 0 independent noise.
#[derive(Debug, Clone)]
pub struct CloudField {
    /// Clear-sky broadband transmittance the process reverts to.
    pub clear_transmittance: f64,
    /// AR(1) correlation coefficient.
    pub alpha: f64,
    /// Standard deviation of the innovation noise.
    pub cloud_noise_std: f64,
    /// Current transmittance state.
    transmittance: f64,
    rng: StdRng,
}

impl CloudField {
    /// Creates a cloud transmittance process.
    ///
    /// `alpha` is clamped to [0, 1]; the clear-sky transmittance to the
    /// process bounds.
    pub fn new(clear_transmittance: f64, alpha: f64, cloud_noise_std: f64, seed: u64) -> Self {
        let clear = clear_transmittance.clamp(TRANSMITTANCE_MIN, TRANSMITTANCE_MAX);
        Self {
            clear_transmittance: clear,
            alpha: alpha.clamp(0.0, 1.0),
            cloud_noise_std: cloud_noise_std.max(0.0),
            transmittance: clear,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Advances the process by one step and returns the new transmittance.
    ///
    /// Called every timestep, day and night, so the correlation survives
    /// across sunrise.
    pub fn advance(&mut self) -> f64 {
        let epsilon = gaussian_noise(&mut self.rng, self.cloud_noise_std);
        self.transmittance = self.alpha * self.transmittance
            + (1.0 - self.alpha) * (self.clear_transmittance + epsilon);
        self.transmittance = self.transmittance.clamp(TRANSMITTANCE_MIN, TRANSMITTANCE_MAX);
        self.transmittance
    }
}

/// Diurnal air temperature and wind synthesizer.
///
/// Temperature follows a sinusoid peaking at 15:00 solar time; wind is the
/// mean plus Gaussian noise, floored at zero.
#[derive(Debug, Clone)]
pub struct Ambient {
    /// Daily mean air temperature, C.
    pub temp_mean: f64,
    /// Half the daily temperature swing, C.
    pub temp_amplitude: f64,
    /// Mean wind speed, m/s.
    pub wind_mean: f64,
    /// Wind noise standard deviation, m/s.
    pub wind_noise_std: f64,
    rng: StdRng,
}

impl Ambient {
    pub fn new(
        temp_mean: f64,
        temp_amplitude: f64,
        wind_mean: f64,
        wind_noise_std: f64,
        seed: u64,
    ) -> Self {
        Self {
            temp_mean,
            temp_amplitude,
            wind_mean: wind_mean.max(0.0),
            wind_noise_std: wind_noise_std.max(0.0),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Samples air temperature and wind speed at a solar time in decimal
    /// hours.
    pub fn sample(&mut self, solar_time: f64) -> (f64, f64) {
        let phase = 2.0 * std::f64::consts::PI * (solar_time - 15.0) / 24.0;
        let temp_air = self.temp_mean + self.temp_amplitude * phase.cos();
        let wind_speed = (self.wind_mean + gaussian_noise(&mut self.rng, self.wind_noise_std))
            .max(0.0);
        (temp_air, wind_speed)
    }
}
