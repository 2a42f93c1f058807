//! Simulation engine that chains sun position, weather, transposition, and
//! the module electrical model.

use crate::atmosphere::{self, AirmassModel};
use crate::irradiance::decomposition::{self, DecompositionModel};
use crate::irradiance::{
    self, ExtraRadiationMethod, IrradianceComponents, SOLAR_CONSTANT, SkyDiffuseModel,
};
use crate::pv::{self, ArrayLayout, ModuleParams, MountType};
use crate::solar::{Location, ephemeris};

use super::types::{SimTiming, StepRecord};
use super::weather::{Ambient, CloudField, WeatherSample};

use chrono::{Datelike, Timelike};

/// Mechanical and model configuration of the simulated array.
#[derive(Debug, Clone)]
pub struct ArraySetup {
    /// Panel tilt from horizontal, degrees.
    pub surface_tilt: f64,
    /// Panel azimuth, degrees clockwise from north.
    pub surface_azimuth: f64,
    /// Broadband ground albedo.
    pub albedo: f64,
    /// Electrical layout.
    pub layout: ArrayLayout,
    /// Mounting configuration for the thermal model.
    pub mount: MountType,
    /// Sky-diffuse transposition model.
    pub sky_diffuse_model: SkyDiffuseModel,
    /// Airmass parameterization.
    pub airmass_model: AirmassModel,
    /// Decomposition model for GHI-only weather.
    pub decomposition: DecompositionModel,
}

/// Simulation engine owning the site, array, module, and weather source.
///
/// Weather is either a measured series (one sample per timestep) or
/// synthesized on the fly from the AR(1) cloud field and the ambient
/// synthesizer.
#[derive(Debug)]
pub struct Engine {
    timing: SimTiming,
    location: Location,
    array: ArraySetup,
    module: ModuleParams,
    cloud: CloudField,
    ambient: Ambient,
    weather: Option<Vec<WeatherSample>>,
}

impl Engine {
    /// Creates a new simulation engine.
    ///
    /// # Panics
    ///
    /// Panics if a measured weather series is given whose length differs
    /// from the total step count.
    pub fn new(
        timing: SimTiming,
        location: Location,
        array: ArraySetup,
        module: ModuleParams,
        cloud: CloudField,
        ambient: Ambient,
        weather: Option<Vec<WeatherSample>>,
    ) -> Self {
        if let Some(ref w) = weather {
            assert_eq!(
                w.len(),
                timing.total_steps(),
                "weather series length must match the simulation step count"
            );
        }
        Self {
            timing,
            location,
            array,
            module,
            cloud,
            ambient,
            weather,
        }
    }

    /// Array nameplate power at standard test conditions, W.
    pub fn nameplate_w(&self) -> f64 {
        let stc = pv::singlediode(&pv::desoto(&self.module, 1000.0, 25.0));
        self.array.layout.scale(stc).p_mp
    }

    /// Returns a reference to the timing configuration.
    pub fn timing(&self) -> &SimTiming {
        &self.timing
    }

    /// Executes one simulation timestep and returns the record.
    pub fn step(&mut self, t: usize) -> StepRecord {
        let time = self.timing.timestamp(t);
        let pressure = self.location.pressure();

        // 1. Ambient conditions: measured passthrough, or the diurnal
        //    synthesizer at longitude-approximated solar time. Resolved
        //    first so temperature can feed the refraction correction.
        let (temp_air, wind_speed) = match self.weather {
            Some(ref series) => (series[t].temp_air, series[t].wind_speed),
            None => {
                let utc_hours = f64::from(time.hour())
                    + f64::from(time.minute()) / 60.0
                    + f64::from(time.second()) / 3600.0;
                let local_solar =
                    (utc_hours + self.location.longitude / 15.0).rem_euclid(24.0);
                self.ambient.sample(local_solar)
            }
        };

        // 2. Sun position.
        let pos = ephemeris(
            time,
            self.location.latitude,
            self.location.longitude,
            pressure,
            temp_air,
        );

        // 3. Cloud transmittance advances every step, day and night.
        let transmittance = self.cloud.advance();

        // 4. Airmass and extraterrestrial irradiance.
        let dni_extra = irradiance::get_extra_radiation(
            time.ordinal(),
            SOLAR_CONSTANT,
            ExtraRadiationMethod::Spencer,
        );
        let airmass_rel = atmosphere::relative_airmass(pos.apparent_zenith, self.array.airmass_model);
        let airmass_abs = atmosphere::absolute_airmass(airmass_rel, pressure);

        // 5. Horizontal irradiance: measured series or synthesis.
        let irrad = match self.weather {
            Some(ref series) => {
                let sample = series[t];
                self.complete_components(&sample, &pos, time.ordinal(), pressure)
            }
            None => {
                if pos.is_daylight() {
                    irradiance::liujordan(pos.apparent_zenith, transmittance, airmass_abs, dni_extra)
                } else {
                    IrradianceComponents {
                        ghi: 0.0,
                        dni: 0.0,
                        dhi: 0.0,
                    }
                }
            }
        };

        // 6. Transposition to the array plane. Dark steps skip the models,
        //    which are undefined without global irradiance.
        let poa = if irrad.ghi > 0.0 {
            irradiance::get_total_irradiance(
                self.array.surface_tilt,
                self.array.surface_azimuth,
                pos.apparent_zenith,
                pos.azimuth,
                irrad,
                dni_extra,
                airmass_rel,
                self.array.albedo,
                self.array.sky_diffuse_model,
            )
        } else {
            irradiance::PoaIrradiance {
                global: 0.0,
                direct: 0.0,
                diffuse: 0.0,
                sky_diffuse: 0.0,
                ground_diffuse: 0.0,
            }
        };

        // 7. Thermal and electrical model.
        let temp_cell =
            pv::sapm_cell_temperature(poa.global, temp_air, wind_speed, self.array.mount.params());
        let diode = pv::desoto(&self.module, poa.global, temp_cell);
        let array_mpp = self.array.layout.scale(pv::singlediode(&diode));

        StepRecord {
            timestep: t,
            time,
            apparent_zenith: pos.apparent_zenith,
            azimuth: pos.azimuth,
            ghi: irrad.ghi,
            dni: irrad.dni,
            dhi: irrad.dhi,
            poa_global: poa.global,
            temp_air,
            wind_speed,
            temp_cell,
            dc_power_w: array_mpp.p_mp,
            v_mp: array_mpp.v_mp,
            i_mp: array_mpp.i_mp,
        }
    }

    /// Executes all timesteps and returns the complete step record vector.
    pub fn run(&mut self) -> Vec<StepRecord> {
        let total = self.timing.total_steps();
        let mut results = Vec::with_capacity(total);
        for t in 0..total {
            results.push(self.step(t));
        }
        results
    }

    /// Fills missing DNI/DHI in a measured sample.
    ///
    /// With both components missing the configured decomposition model runs
    /// on GHI; with one missing the closure relation
    /// `ghi = dni * cos(zenith) + dhi` supplies the other.
    fn complete_components(
        &self,
        sample: &WeatherSample,
        pos: &crate::solar::SolarPosition,
        day_of_year: u32,
        pressure: f64,
    ) -> IrradianceComponents {
        let ghi = sample.ghi.max(0.0);
        // Below the horizon any measured global is treated as all diffuse.
        if ghi <= 0.0 || !pos.is_daylight() {
            return IrradianceComponents {
                ghi,
                dni: 0.0,
                dhi: ghi,
            };
        }
        let cos_zenith = pos.apparent_zenith.to_radians().cos();

        let (dni, dhi) = match (sample.dni.is_nan(), sample.dhi.is_nan()) {
            (false, false) => (sample.dni, sample.dhi),
            (false, true) => (sample.dni, (ghi - sample.dni * cos_zenith).max(0.0)),
            (true, false) => (((ghi - sample.dhi) / cos_zenith).max(0.0), sample.dhi),
            (true, true) => match self.array.decomposition {
                DecompositionModel::Erbs => {
                    let out = decomposition::erbs(ghi, pos.apparent_zenith, day_of_year);
                    (out.dni, out.dhi)
                }
                DecompositionModel::Disc => {
                    let out = decomposition::disc(ghi, pos.apparent_zenith, day_of_year, pressure);
                    (out.dni, (ghi - out.dni * cos_zenith).max(0.0))
                }
            },
        };
        IrradianceComponents { ghi, dni, dhi }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn timing() -> SimTiming {
        SimTiming::new(NaiveDate::from_ymd_opt(2020, 6, 1).unwrap(), 60, 1, 42)
    }

    fn setup() -> ArraySetup {
        ArraySetup {
            surface_tilt: 30.0,
            surface_azimuth: 180.0,
            albedo: 0.2,
            layout: ArrayLayout {
                modules_per_string: 10,
                strings: 2,
            },
            mount: MountType::OpenRackGlassGlass,
            sky_diffuse_model: SkyDiffuseModel::HayDavies,
            airmass_model: AirmassModel::KastenYoung1989,
            decomposition: DecompositionModel::Erbs,
        }
    }

    fn engine(seed: u64, weather: Option<Vec<WeatherSample>>) -> Engine {
        Engine::new(
            timing(),
            Location::new(32.2, -111.0, 700.0),
            setup(),
            ModuleParams::default(),
            CloudField::new(0.7, 0.9, 0.1, seed),
            Ambient::new(22.0, 8.0, 2.0, 0.5, seed.wrapping_add(17)),
            weather,
        )
    }

    #[test]
    fn seed_determinism() {
        let a = engine(42, None).run();
        let b = engine(42, None).run();
        assert_eq!(a.len(), b.len());
        for (ra, rb) in a.iter().zip(&b) {
            assert_eq!(ra.dc_power_w, rb.dc_power_w);
            assert_eq!(ra.ghi, rb.ghi);
            assert_eq!(ra.temp_cell, rb.temp_cell);
        }
    }

    #[test]
    fn different_seeds_differ() {
        let a = engine(42, None).run();
        let b = engine(43, None).run();
        let differ = a
            .iter()
            .zip(&b)
            .any(|(ra, rb)| (ra.dc_power_w - rb.dc_power_w).abs() > 1e-6);
        assert!(differ);
    }

    #[test]
    fn night_steps_produce_no_power() {
        let results = engine(42, None).run();
        for r in &results {
            if r.apparent_zenith >= 90.0 {
                assert_eq!(r.ghi, 0.0, "t={}", r.timestep);
                assert_eq!(r.dc_power_w, 0.0, "t={}", r.timestep);
            }
        }
    }

    #[test]
    fn daytime_produces_power() {
        let results = engine(42, None).run();
        let peak = results.iter().map(|r| r.dc_power_w).fold(0.0, f64::max);
        let nameplate = engine(42, None).nameplate_w();
        assert!(peak > 0.2 * nameplate, "peak {peak} of {nameplate}");
        assert!(peak < 1.2 * nameplate);
    }

    #[test]
    fn cell_runs_hotter_than_air_in_sun() {
        let results = engine(42, None).run();
        let noon = results
            .iter()
            .max_by(|a, b| a.poa_global.total_cmp(&b.poa_global))
            .unwrap();
        assert!(noon.temp_cell > noon.temp_air + 5.0);
    }

    #[test]
    fn measured_weather_passthrough() {
        let t = timing();
        let series: Vec<WeatherSample> = t
            .timestamps()
            .into_iter()
            .map(|time| WeatherSample {
                time,
                ghi: 500.0,
                dni: 600.0,
                dhi: 120.0,
                temp_air: 18.0,
                wind_speed: 3.0,
            })
            .collect();
        let results = engine(42, Some(series)).run();
        let day = results.iter().find(|r| r.apparent_zenith < 60.0).unwrap();
        assert_eq!(day.ghi, 500.0);
        assert_eq!(day.dni, 600.0);
        assert_eq!(day.dhi, 120.0);
        assert_eq!(day.temp_air, 18.0);
        assert!(day.dc_power_w > 0.0);
    }

    #[test]
    fn ghi_only_weather_is_decomposed() {
        let t = timing();
        let series: Vec<WeatherSample> = t
            .timestamps()
            .into_iter()
            .map(|time| WeatherSample {
                time,
                ghi: 600.0,
                dni: f64::NAN,
                dhi: f64::NAN,
                temp_air: 20.0,
                wind_speed: 2.0,
            })
            .collect();
        let results = engine(42, Some(series)).run();
        let day = results.iter().find(|r| r.apparent_zenith < 60.0).unwrap();
        assert!(day.dni.is_finite() && day.dni > 0.0);
        assert!(day.dhi.is_finite() && day.dhi > 0.0);
        // Closure relation holds after decomposition.
        let cos_z = day.apparent_zenith.to_radians().cos();
        assert!((day.dni * cos_z + day.dhi - day.ghi).abs() < 1.0);
    }

    #[test]
    fn missing_dhi_filled_by_closure() {
        let t = timing();
        let series: Vec<WeatherSample> = t
            .timestamps()
            .into_iter()
            .map(|time| WeatherSample {
                time,
                ghi: 700.0,
                dni: 800.0,
                dhi: f64::NAN,
                temp_air: 20.0,
                wind_speed: 2.0,
            })
            .collect();
        let results = engine(42, Some(series)).run();
        let day = results.iter().find(|r| r.apparent_zenith < 45.0).unwrap();
        let cos_z = day.apparent_zenith.to_radians().cos();
        assert!((day.dhi - (700.0 - 800.0 * cos_z).max(0.0)).abs() < 1e-9);
    }

    #[test]
    #[should_panic]
    fn weather_length_mismatch_panics() {
        engine(42, Some(Vec::new()));
    }

    #[test]
    fn measured_temperature_feeds_refraction() {
        let series = |temp_air: f64| -> Vec<WeatherSample> {
            timing()
                .timestamps()
                .into_iter()
                .map(|time| WeatherSample {
                    time,
                    ghi: 500.0,
                    dni: 600.0,
                    dhi: 120.0,
                    temp_air,
                    wind_speed: 2.0,
                })
                .collect()
        };
        let warm = engine(42, Some(series(35.0))).run();
        let cold = engine(42, Some(series(-30.0))).run();
        // Refraction scales with air density, so a low sun appears at a
        // slightly different zenith under the measured temperature.
        let (w, c) = warm
            .iter()
            .zip(&cold)
            .find(|(r, _)| r.apparent_zenith > 60.0 && r.apparent_zenith < 90.0)
            .expect("a low-sun daylight step");
        assert!(
            w.apparent_zenith != c.apparent_zenith,
            "refraction should respond to measured air temperature"
        );
    }

    #[test]
    fn nameplate_scales_with_layout() {
        let e = engine(42, None);
        let single = pv::singlediode(&pv::desoto(&ModuleParams::default(), 1000.0, 25.0));
        assert!((e.nameplate_w() - 20.0 * single.p_mp).abs() < 1e-6);
    }
}
