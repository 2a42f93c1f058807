//! TOML-based scenario configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::atmosphere::AirmassModel;
use crate::irradiance::decomposition::DecompositionModel;
use crate::irradiance::{SkyDiffuseModel, surface_albedo};
use crate::pv::{ArrayLayout, ModuleParams, MountType};
use crate::sim::{Ambient, ArraySetup, CloudField, Engine, SimTiming, WeatherSample};
use crate::solar::Location;

/// Seed offset for the ambient RNG to avoid correlation with the cloud field.
const AMBIENT_SEED_OFFSET: u64 = 101;

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the baseline scenario. Load from TOML
/// with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Simulation timing and model selection.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Site coordinates.
    #[serde(default)]
    pub location: LocationConfig,
    /// Array orientation and layout.
    #[serde(default)]
    pub array: ArrayConfig,
    /// Module reference parameters.
    #[serde(default)]
    pub module: ModuleConfig,
    /// Synthetic sky and ambient conditions.
    #[serde(default)]
    pub sky: SkyConfig,
}

/// Simulation timing and model selection.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Start date, `YYYY-MM-DD` (UTC midnight).
    pub start_date: String,
    /// Timestep length in minutes (must divide 1440 evenly).
    pub step_minutes: u32,
    /// Number of days to simulate.
    pub days: u32,
    /// Master random seed.
    pub seed: u64,
    /// Decomposition model for GHI-only weather: `"erbs"` or `"disc"`.
    pub decomposition: String,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            start_date: "2020-06-01".to_string(),
            step_minutes: 60,
            days: 1,
            seed: 42,
            decomposition: "erbs".to_string(),
        }
    }
}

/// Site coordinates.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocationConfig {
    /// Latitude in decimal degrees, positive north.
    pub latitude: f64,
    /// Longitude in decimal degrees, positive east.
    pub longitude: f64,
    /// Altitude above sea level in metres.
    pub altitude_m: f64,
}

impl Default for LocationConfig {
    fn default() -> Self {
        // Tucson, Arizona.
        Self {
            latitude: 32.2,
            longitude: -110.9,
            altitude_m: 700.0,
        }
    }
}

/// Array orientation, layout, and model selection.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArrayConfig {
    /// Panel tilt from horizontal, degrees.
    pub surface_tilt: f64,
    /// Panel azimuth, degrees clockwise from north.
    pub surface_azimuth: f64,
    /// Series modules per string.
    pub modules_per_string: u32,
    /// Parallel strings.
    pub strings: u32,
    /// Ground surface type for the albedo lookup.
    pub surface_type: String,
    /// Explicit albedo override; takes precedence over `surface_type`.
    pub albedo: Option<f64>,
    /// SAPM mounting configuration.
    pub mount: String,
    /// Sky-diffuse transposition model.
    pub sky_diffuse_model: String,
    /// Airmass parameterization.
    pub airmass_model: String,
}

impl Default for ArrayConfig {
    fn default() -> Self {
        Self {
            surface_tilt: 30.0,
            surface_azimuth: 180.0,
            modules_per_string: 12,
            strings: 2,
            surface_type: "grass".to_string(),
            albedo: None,
            mount: "open_rack_glass_glass".to_string(),
            sky_diffuse_model: "haydavies".to_string(),
            airmass_model: "kastenyoung1989".to_string(),
        }
    }
}

/// Module reference parameters for the De Soto model.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModuleConfig {
    /// Light-generated current at reference conditions (A).
    pub il_ref: f64,
    /// Diode saturation current at reference conditions (A).
    pub io_ref: f64,
    /// Series resistance (ohm).
    pub rs_ref: f64,
    /// Shunt resistance at reference conditions (ohm).
    pub rsh_ref: f64,
    /// Modified ideality factor (V).
    pub a_ref: f64,
    /// Temperature coefficient of short-circuit current (A/C).
    pub alpha_sc: f64,
    /// Band gap at reference temperature (eV).
    pub eg_ref: f64,
    /// Relative band gap temperature dependence (1/K).
    pub degdt: f64,
    /// Cells connected in series.
    pub cells_in_series: u32,
}

impl Default for ModuleConfig {
    fn default() -> Self {
        let m = ModuleParams::default();
        Self {
            il_ref: m.il_ref,
            io_ref: m.io_ref,
            rs_ref: m.rs_ref,
            rsh_ref: m.rsh_ref,
            a_ref: m.a_ref,
            alpha_sc: m.alpha_sc,
            eg_ref: m.eg_ref,
            degdt: m.degdt,
            cells_in_series: m.cells_in_series,
        }
    }
}

impl ModuleConfig {
    fn to_params(&self) -> ModuleParams {
        ModuleParams {
            il_ref: self.il_ref,
            io_ref: self.io_ref,
            rs_ref: self.rs_ref,
            rsh_ref: self.rsh_ref,
            a_ref: self.a_ref,
            alpha_sc: self.alpha_sc,
            eg_ref: self.eg_ref,
            degdt: self.degdt,
            cells_in_series: self.cells_in_series,
        }
    }
}

/// Synthetic sky and ambient conditions.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SkyConfig {
    /// Clear-sky broadband transmittance (0-1).
    pub transmittance: f64,
    /// AR(1) correlation coefficient of the cloud field (0-1).
    pub alpha: f64,
    /// Innovation noise standard deviation of the cloud field.
    pub cloud_noise_std: f64,
    /// Daily mean air temperature (C).
    pub temp_mean: f64,
    /// Half the daily temperature swing (C).
    pub temp_amplitude: f64,
    /// Mean wind speed (m/s).
    pub wind_mean: f64,
    /// Wind noise standard deviation (m/s).
    pub wind_noise_std: f64,
}

impl Default for SkyConfig {
    fn default() -> Self {
        Self {
            transmittance: 0.7,
            alpha: 0.9,
            cloud_noise_std: 0.1,
            temp_mean: 24.0,
            temp_amplitude: 8.0,
            wind_mean: 2.0,
            wind_noise_std: 0.5,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"simulation.step_minutes"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {} — {}", self.field, self.message)
    }
}

impl ScenarioConfig {
    /// Returns the baseline scenario: a desert site with light, slowly
    /// moving clouds.
    pub fn baseline() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            location: LocationConfig::default(),
            array: ArrayConfig::default(),
            module: ModuleConfig::default(),
            sky: SkyConfig::default(),
        }
    }

    /// Returns the stormy preset: heavy, fast-changing cloud cover and wind.
    pub fn stormy() -> Self {
        Self {
            sky: SkyConfig {
                transmittance: 0.45,
                alpha: 0.95,
                cloud_noise_std: 0.35,
                temp_mean: 15.0,
                temp_amplitude: 5.0,
                wind_mean: 6.0,
                wind_noise_std: 2.0,
            },
            array: ArrayConfig {
                sky_diffuse_model: "perez".to_string(),
                ..ArrayConfig::default()
            },
            ..Self::baseline()
        }
    }

    /// Returns the rooftop preset: a small close-mounted residential array
    /// over an urban surface.
    pub fn rooftop() -> Self {
        Self {
            location: LocationConfig {
                latitude: 47.6,
                longitude: -122.3,
                altitude_m: 50.0,
            },
            array: ArrayConfig {
                surface_tilt: 20.0,
                surface_azimuth: 200.0,
                modules_per_string: 8,
                strings: 1,
                surface_type: "urban".to_string(),
                mount: "close_mount_glass_glass".to_string(),
                sky_diffuse_model: "klucher".to_string(),
                ..ArrayConfig::default()
            },
            sky: SkyConfig {
                transmittance: 0.6,
                temp_mean: 16.0,
                temp_amplitude: 6.0,
                wind_mean: 3.0,
                ..SkyConfig::default()
            },
            ..Self::baseline()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "stormy", "rooftop"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "stormy" => Ok(Self::stormy()),
            "rooftop" => Ok(Self::rooftop()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is
    /// invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown
    /// fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if the configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let s = &self.simulation;
        if NaiveDate::parse_from_str(&s.start_date, "%Y-%m-%d").is_err() {
            errors.push(ConfigError {
                field: "simulation.start_date".into(),
                message: format!("must be YYYY-MM-DD, got \"{}\"", s.start_date),
            });
        }
        if s.step_minutes == 0 || 1440 % s.step_minutes != 0 {
            errors.push(ConfigError {
                field: "simulation.step_minutes".into(),
                message: "must be > 0 and divide 1440 evenly".into(),
            });
        }
        if s.days == 0 {
            errors.push(ConfigError {
                field: "simulation.days".into(),
                message: "must be > 0".into(),
            });
        }
        if let Err(e) = DecompositionModel::from_str(&s.decomposition) {
            errors.push(ConfigError {
                field: "simulation.decomposition".into(),
                message: e,
            });
        }

        let loc = &self.location;
        if !(-90.0..=90.0).contains(&loc.latitude) {
            errors.push(ConfigError {
                field: "location.latitude".into(),
                message: "must be in [-90, 90]".into(),
            });
        }
        if !(-180.0..=180.0).contains(&loc.longitude) {
            errors.push(ConfigError {
                field: "location.longitude".into(),
                message: "must be in [-180, 180]".into(),
            });
        }

        let a = &self.array;
        if !(0.0..=90.0).contains(&a.surface_tilt) {
            errors.push(ConfigError {
                field: "array.surface_tilt".into(),
                message: "must be in [0, 90]".into(),
            });
        }
        if !(0.0..360.0).contains(&a.surface_azimuth) {
            errors.push(ConfigError {
                field: "array.surface_azimuth".into(),
                message: "must be in [0, 360)".into(),
            });
        }
        if a.modules_per_string == 0 || a.strings == 0 {
            errors.push(ConfigError {
                field: "array.modules_per_string".into(),
                message: "modules_per_string and strings must be > 0".into(),
            });
        }
        match a.albedo {
            Some(alb) if !(0.0..=1.0).contains(&alb) => errors.push(ConfigError {
                field: "array.albedo".into(),
                message: "must be in [0.0, 1.0]".into(),
            }),
            None if surface_albedo(&a.surface_type).is_none() => errors.push(ConfigError {
                field: "array.surface_type".into(),
                message: format!("unknown surface type \"{}\"", a.surface_type),
            }),
            _ => {}
        }
        if let Err(e) = MountType::from_str(&a.mount) {
            errors.push(ConfigError {
                field: "array.mount".into(),
                message: e,
            });
        }
        if let Err(e) = SkyDiffuseModel::from_str(&a.sky_diffuse_model) {
            errors.push(ConfigError {
                field: "array.sky_diffuse_model".into(),
                message: e,
            });
        }
        if let Err(e) = AirmassModel::from_str(&a.airmass_model) {
            errors.push(ConfigError {
                field: "array.airmass_model".into(),
                message: e,
            });
        }

        let m = &self.module;
        if m.il_ref <= 0.0 || m.io_ref <= 0.0 {
            errors.push(ConfigError {
                field: "module.il_ref".into(),
                message: "il_ref and io_ref must be > 0".into(),
            });
        }
        if m.rs_ref < 0.0 || m.rsh_ref <= 0.0 {
            errors.push(ConfigError {
                field: "module.rs_ref".into(),
                message: "rs_ref must be >= 0 and rsh_ref > 0".into(),
            });
        }
        if m.a_ref <= 0.0 {
            errors.push(ConfigError {
                field: "module.a_ref".into(),
                message: "must be > 0".into(),
            });
        }
        if m.cells_in_series == 0 {
            errors.push(ConfigError {
                field: "module.cells_in_series".into(),
                message: "must be > 0".into(),
            });
        }

        let sky = &self.sky;
        if !(0.0..=1.0).contains(&sky.transmittance) || sky.transmittance == 0.0 {
            errors.push(ConfigError {
                field: "sky.transmittance".into(),
                message: "must be in (0.0, 1.0]".into(),
            });
        }
        if !(0.0..=1.0).contains(&sky.alpha) {
            errors.push(ConfigError {
                field: "sky.alpha".into(),
                message: "must be in [0.0, 1.0]".into(),
            });
        }
        if sky.cloud_noise_std < 0.0 || sky.wind_noise_std < 0.0 {
            errors.push(ConfigError {
                field: "sky.cloud_noise_std".into(),
                message: "noise standard deviations must be >= 0".into(),
            });
        }

        errors
    }

    /// Builds a simulation engine from this configuration.
    ///
    /// # Errors
    ///
    /// Returns the first validation error if the configuration is invalid.
    pub fn build_engine(&self, weather: Option<Vec<WeatherSample>>) -> Result<Engine, ConfigError> {
        if let Some(e) = self.validate().into_iter().next() {
            return Err(e);
        }

        let s = &self.simulation;
        // Validated above, so these parses cannot fail.
        let start = NaiveDate::parse_from_str(&s.start_date, "%Y-%m-%d").map_err(|e| {
            ConfigError {
                field: "simulation.start_date".into(),
                message: e.to_string(),
            }
        })?;
        let timing = SimTiming::new(start, s.step_minutes, s.days, s.seed);

        let loc = &self.location;
        let location = Location::new(loc.latitude, loc.longitude, loc.altitude_m);

        let a = &self.array;
        let albedo = match a.albedo {
            Some(alb) => alb,
            None => surface_albedo(&a.surface_type).ok_or_else(|| ConfigError {
                field: "array.surface_type".into(),
                message: format!("unknown surface type \"{}\"", a.surface_type),
            })?,
        };
        let array = ArraySetup {
            surface_tilt: a.surface_tilt,
            surface_azimuth: a.surface_azimuth,
            albedo,
            layout: ArrayLayout {
                modules_per_string: a.modules_per_string,
                strings: a.strings,
            },
            mount: parse_field(&a.mount, "array.mount")?,
            sky_diffuse_model: parse_field(&a.sky_diffuse_model, "array.sky_diffuse_model")?,
            airmass_model: parse_field(&a.airmass_model, "array.airmass_model")?,
            decomposition: parse_field(&s.decomposition, "simulation.decomposition")?,
        };

        if let Some(ref w) = weather {
            if w.len() != timing.total_steps() {
                return Err(ConfigError {
                    field: "weather".into(),
                    message: format!(
                        "weather file has {} rows but the simulation needs {}",
                        w.len(),
                        timing.total_steps()
                    ),
                });
            }
            // Rows are consumed positionally, so a misdated file would
            // silently pair the wrong sun position with each sample.
            for (t, sample) in w.iter().enumerate() {
                let expected = timing.timestamp(t);
                if sample.time != expected {
                    return Err(ConfigError {
                        field: "weather".into(),
                        message: format!(
                            "row {} is timestamped {} but the simulation step falls at {}",
                            t + 1,
                            sample.time.format("%Y-%m-%d %H:%M"),
                            expected.format("%Y-%m-%d %H:%M")
                        ),
                    });
                }
            }
        }

        let sky = &self.sky;
        let cloud = CloudField::new(sky.transmittance, sky.alpha, sky.cloud_noise_std, s.seed);
        let ambient = Ambient::new(
            sky.temp_mean,
            sky.temp_amplitude,
            sky.wind_mean,
            sky.wind_noise_std,
            s.seed.wrapping_add(AMBIENT_SEED_OFFSET),
        );

        Ok(Engine::new(
            timing,
            location,
            array,
            self.module.to_params(),
            cloud,
            ambient,
            weather,
        ))
    }
}

fn parse_field<T: FromStr<Err = String>>(value: &str, field: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|message| ConfigError {
        field: field.to_string(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_presets_valid() {
        for &name in ScenarioConfig::PRESETS {
            let cfg = ScenarioConfig::from_preset(name).expect("known preset");
            let errors = cfg.validate();
            assert!(errors.is_empty(), "{name} should be valid: {errors:?}");
        }
    }

    #[test]
    fn from_preset_unknown() {
        let err = ScenarioConfig::from_preset("nonexistent");
        assert!(err.is_err());
        assert!(err.unwrap_err().message.contains("unknown preset"));
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[simulation]
start_date = "2021-03-15"
step_minutes = 15
days = 2
seed = 99
decomposition = "disc"

[location]
latitude = 39.74
longitude = -105.18
altitude_m = 1830.0

[array]
surface_tilt = 35.0
surface_azimuth = 180.0
modules_per_string = 16
strings = 4
surface_type = "snow"
mount = "open_rack_glass_polymer"
sky_diffuse_model = "perez"
airmass_model = "kastenyoung1989"

[module]
il_ref = 6.0
io_ref = 1.0e-10
rs_ref = 0.3
rsh_ref = 300.0
a_ref = 1.6
alpha_sc = 0.003
eg_ref = 1.121
degdt = -0.0002677
cells_in_series = 60

[sky]
transmittance = 0.75
alpha = 0.85
cloud_noise_std = 0.15
temp_mean = 5.0
temp_amplitude = 7.0
wind_mean = 4.0
wind_noise_std = 1.0
"#;
        let cfg = ScenarioConfig::from_toml_str(toml).expect("parses");
        assert_eq!(cfg.simulation.step_minutes, 15);
        assert_eq!(cfg.array.strings, 4);
        assert_eq!(cfg.module.cells_in_series, 60);
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let cfg = ScenarioConfig::from_toml_str("[location]\nlatitude = 45.0\n").expect("parses");
        assert_eq!(cfg.location.latitude, 45.0);
        assert_eq!(cfg.location.longitude, -110.9);
        assert_eq!(cfg.simulation.step_minutes, 60);
    }

    #[test]
    fn unknown_field_rejected() {
        let err = ScenarioConfig::from_toml_str("[simulation]\nstepminutes = 60\n");
        assert!(err.is_err());
    }

    #[test]
    fn bad_start_date_flagged() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.simulation.start_date = "June 1st".to_string();
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "simulation.start_date"));
    }

    #[test]
    fn uneven_step_minutes_flagged() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.simulation.step_minutes = 7;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "simulation.step_minutes"));
    }

    #[test]
    fn unknown_model_names_flagged() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.array.mount = "carport".to_string();
        cfg.array.sky_diffuse_model = "v3".to_string();
        cfg.array.airmass_model = "flat".to_string();
        cfg.simulation.decomposition = "magic".to_string();
        let errors = cfg.validate();
        assert_eq!(errors.len(), 4, "{errors:?}");
    }

    #[test]
    fn albedo_override_beats_surface_type() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.array.surface_type = "volcano".to_string();
        cfg.array.albedo = Some(0.3);
        // Explicit albedo means the bogus surface type is never consulted.
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn unknown_surface_type_flagged_without_override() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.array.surface_type = "volcano".to_string();
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "array.surface_type"));
    }

    #[test]
    fn out_of_range_transmittance_flagged() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.sky.transmittance = 0.0;
        assert!(!cfg.validate().is_empty());
        cfg.sky.transmittance = 1.2;
        assert!(!cfg.validate().is_empty());
    }

    #[test]
    fn build_engine_from_baseline() {
        let cfg = ScenarioConfig::baseline();
        let engine = cfg.build_engine(None);
        assert!(engine.is_ok());
    }

    #[test]
    fn build_engine_rejects_invalid() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.simulation.days = 0;
        assert!(cfg.build_engine(None).is_err());
    }

    fn hourly_samples(start: chrono::DateTime<chrono::Utc>, hours: i64) -> Vec<WeatherSample> {
        (0..hours)
            .map(|h| WeatherSample {
                time: start + chrono::Duration::hours(h),
                ghi: 500.0,
                dni: f64::NAN,
                dhi: f64::NAN,
                temp_air: 20.0,
                wind_speed: 2.0,
            })
            .collect()
    }

    #[test]
    fn build_engine_accepts_aligned_weather() {
        let cfg = ScenarioConfig::baseline();
        let start = NaiveDate::from_ymd_opt(2020, 6, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc();
        assert!(cfg.build_engine(Some(hourly_samples(start, 24))).is_ok());
    }

    #[test]
    fn build_engine_rejects_short_weather() {
        let cfg = ScenarioConfig::baseline();
        let err = cfg.build_engine(Some(Vec::new())).unwrap_err();
        assert_eq!(err.field, "weather");
        assert!(err.message.contains("24"), "{}", err.message);
    }

    #[test]
    fn build_engine_rejects_misdated_weather() {
        // Right row count, wrong start date: positional pairing would put
        // every sample under the wrong sun.
        let cfg = ScenarioConfig::baseline();
        let start = NaiveDate::from_ymd_opt(2020, 6, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc();
        let err = cfg.build_engine(Some(hourly_samples(start, 24))).unwrap_err();
        assert_eq!(err.field, "weather");
        assert!(err.message.contains("2020-06-02"), "{}", err.message);
    }
}
