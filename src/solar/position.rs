//! Ephemeris sun-position algorithm with atmospheric refraction correction.
//!
//! Computes topocentric sun coordinates from UTC time and location using the
//! classical low-precision ephemeris (Keplerian orbital elements referred to
//! the 1900 epoch, sidereal-time hour angle). Agrees with the NREL SPA to
//! about two decimal places in zenith and azimuth, which is well below the
//! uncertainty of any irradiance model fed from it.

use chrono::{DateTime, Datelike, Timelike, Utc};

/// Aberration of light, degrees (20 arcseconds).
const ABERRATION: f64 = 20.0 / 3600.0;

/// Sun position angles for a single instant.
///
/// All angles in degrees. Azimuth is measured clockwise from north.
/// `apparent_*` fields include the atmospheric refraction correction;
/// the plain fields are the true geometric angles.
#[derive(Debug, Clone, Copy)]
pub struct SolarPosition {
    /// True elevation above the horizon.
    pub elevation: f64,
    /// Refraction-corrected elevation.
    pub apparent_elevation: f64,
    /// True zenith angle, `90 - elevation`.
    pub zenith: f64,
    /// Refraction-corrected zenith angle.
    pub apparent_zenith: f64,
    /// Azimuth, clockwise from north.
    pub azimuth: f64,
    /// Local apparent solar time in decimal hours.
    pub solar_time: f64,
}

impl SolarPosition {
    /// Whether the sun is above the horizon after refraction.
    pub fn is_daylight(&self) -> bool {
        self.apparent_zenith < 90.0
    }
}

/// Computes the sun position for a UTC instant at the given coordinates.
///
/// # Arguments
///
/// * `time` - UTC timestamp
/// * `latitude` - Site latitude in degrees, positive north
/// * `longitude` - Site longitude in degrees, positive east
/// * `pressure` - Site air pressure in pascals (refraction correction)
/// * `temperature` - Air temperature in degrees C (refraction correction)
pub fn ephemeris(
    time: DateTime<Utc>,
    latitude: f64,
    longitude: f64,
    pressure: f64,
    temperature: f64,
) -> SolarPosition {
    let lat_r = latitude.to_radians();

    let day_of_year = f64::from(time.ordinal());
    let dec_hours = f64::from(time.hour())
        + f64::from(time.minute()) / 60.0
        + f64::from(time.second()) / 3600.0
        + f64::from(time.nanosecond()) / 3.6e12;

    // Days since the 1900 ephemeris epoch (noon-based).
    let yr = f64::from(time.year() - 1900);
    let yr_begin = 365.0 * yr + ((yr - 1.0) / 4.0).floor() - 0.5;
    let ezero = yr_begin + day_of_year;
    let t = ezero / 36525.0;

    // Greenwich mean sidereal time at 0h UT, then at the actual hour.
    let mut gmst0 = 6.0 / 24.0 + 38.0 / 1440.0
        + (45.836 + 8_640_184.542 * t + 0.0929 * t * t) / 86400.0;
    gmst0 = 360.0 * (gmst0 - gmst0.floor());
    let gmsti = (gmst0 + 360.0 * (1.0027379093 * dec_hours / 24.0)).rem_euclid(360.0);
    let loc_ast = (360.0 + gmsti + longitude).rem_euclid(360.0);

    let epoch_date = ezero + dec_hours / 24.0;
    let t1 = epoch_date / 36525.0;

    let obliquity_r = (23.452294 - 0.0130125 * t1 - 1.64e-6 * t1 * t1
        + 5.03e-7 * t1 * t1 * t1)
        .to_radians();
    let ml_perigee =
        281.22083 + 4.70684e-5 * epoch_date + 0.000453 * t1 * t1 + 3e-6 * t1 * t1 * t1;
    let mean_anom = (358.47583 + 0.985600267 * epoch_date
        - 0.00015 * t1 * t1
        - 3e-6 * t1 * t1 * t1)
        .rem_euclid(360.0);
    let eccen = 0.01675104 - 4.18e-5 * t1 - 1.26e-7 * t1 * t1;

    // Kepler's equation, fixed-point iteration in degrees.
    let mut eccen_anom = mean_anom;
    let mut e = 0.0_f64;
    while (eccen_anom - e).abs() > 0.0001 {
        e = eccen_anom;
        eccen_anom = mean_anom + eccen.to_degrees() * e.to_radians().sin();
    }

    let true_anom = 2.0
        * (((1.0 + eccen) / (1.0 - eccen)).sqrt() * (eccen_anom.to_radians() / 2.0).tan())
            .atan2(1.0)
            .to_degrees()
            .rem_euclid(360.0);
    let ec_lon = (ml_perigee + true_anom).rem_euclid(360.0) - ABERRATION;
    let ec_lon_r = ec_lon.to_radians();

    let dec_r = (obliquity_r.sin() * ec_lon_r.sin()).asin();
    let rt_ascen = (obliquity_r.cos() * ec_lon_r.sin())
        .atan2(ec_lon_r.cos())
        .to_degrees();

    let mut hr_angle = loc_ast - rt_ascen;
    let hr_angle_r = hr_angle.to_radians();
    if hr_angle.abs() > 180.0 {
        hr_angle -= 360.0 * hr_angle.signum();
    }

    let mut azimuth = (-hr_angle_r.sin())
        .atan2(lat_r.cos() * dec_r.tan() - lat_r.sin() * hr_angle_r.cos())
        .to_degrees();
    if azimuth < 0.0 {
        azimuth += 360.0;
    }

    let elevation = (lat_r.cos() * dec_r.cos() * hr_angle_r.cos() + lat_r.sin() * dec_r.sin())
        .asin()
        .to_degrees();
    let solar_time = (180.0 + hr_angle) / 15.0;

    let refraction = refraction_correction(elevation, pressure, temperature);
    let apparent_elevation = elevation + refraction;

    SolarPosition {
        elevation,
        apparent_elevation,
        zenith: 90.0 - elevation,
        apparent_zenith: 90.0 - apparent_elevation,
        azimuth,
        solar_time,
    }
}

/// Atmospheric refraction in degrees for a true elevation angle.
///
/// Piecewise fit in arcseconds, scaled by the ratio of actual to standard
/// temperature and pressure. Zero below -1 degree elevation.
fn refraction_correction(elevation: f64, pressure: f64, temperature: f64) -> f64 {
    let tan_el = elevation.to_radians().tan();
    let arcsec = if elevation > 5.0 && elevation <= 85.0 {
        58.1 / tan_el - 0.07 / tan_el.powi(3) + 8.6e-5 / tan_el.powi(5)
    } else if elevation > -0.575 && elevation <= 5.0 {
        elevation * (-518.2 + elevation * (103.4 + elevation * (-12.79 + elevation * 0.711)))
            + 1735.0
    } else if elevation > -1.0 && elevation <= -0.575 {
        -20.774 / tan_el
    } else {
        0.0
    };
    arcsec * (283.0 / (273.0 + temperature)) * (pressure / 101325.0) / 3600.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    /// NREL SPA benchmark point: Golden, Colorado, 2003-10-17 12:30:30 MST
    /// (19:30:30 UTC). Reference values: apparent zenith 50.111622,
    /// azimuth 194.340241, elevation 39.872046, apparent elevation 39.888378.
    fn golden_benchmark() -> SolarPosition {
        let time = Utc.with_ymd_and_hms(2003, 10, 17, 19, 30, 30).unwrap();
        ephemeris(time, 39.742476, -105.1786, 82000.0, 11.0)
    }

    #[test]
    fn golden_apparent_zenith() {
        let pos = golden_benchmark();
        assert!(
            (pos.apparent_zenith - 50.111622).abs() < 0.01,
            "apparent zenith {} should match SPA benchmark",
            pos.apparent_zenith
        );
    }

    #[test]
    fn golden_azimuth() {
        let pos = golden_benchmark();
        assert!(
            (pos.azimuth - 194.340241).abs() < 0.01,
            "azimuth {} should match SPA benchmark",
            pos.azimuth
        );
    }

    #[test]
    fn golden_elevation() {
        let pos = golden_benchmark();
        assert!((pos.elevation - 39.872046).abs() < 0.01);
        assert!((pos.apparent_elevation - 39.888378).abs() < 0.01);
    }

    #[test]
    fn zenith_elevation_complementary() {
        let pos = golden_benchmark();
        assert!((pos.zenith + pos.elevation - 90.0).abs() < 1e-9);
        assert!((pos.apparent_zenith + pos.apparent_elevation - 90.0).abs() < 1e-9);
    }

    #[test]
    fn refraction_raises_apparent_elevation() {
        let pos = golden_benchmark();
        assert!(pos.apparent_elevation > pos.elevation);
    }

    #[test]
    fn night_sun_below_horizon() {
        // Local midnight in Tucson.
        let time = Utc.with_ymd_and_hms(2014, 6, 24, 7, 0, 0).unwrap();
        let pos = ephemeris(time, 32.2, -111.0, 101325.0, 12.0);
        assert!(pos.apparent_zenith > 90.0);
        assert!(!pos.is_daylight());
    }

    #[test]
    fn noon_sun_high_in_summer() {
        // Local solar noon-ish in Tucson near the solstice.
        let time = Utc.with_ymd_and_hms(2014, 6, 24, 19, 30, 0).unwrap();
        let pos = ephemeris(time, 32.2, -111.0, 101325.0, 25.0);
        assert!(pos.apparent_zenith < 15.0, "zenith {}", pos.apparent_zenith);
        assert!(pos.is_daylight());
    }

    #[test]
    fn azimuth_in_range() {
        for hour in 0..24 {
            let time = Utc.with_ymd_and_hms(2014, 6, 24, hour, 0, 0).unwrap();
            let pos = ephemeris(time, 32.2, -111.0, 101325.0, 12.0);
            assert!((0.0..360.0).contains(&pos.azimuth));
        }
    }

    #[test]
    fn southern_hemisphere_noon_azimuth_near_north() {
        // Winter noon at 35 S, 0 E: sun due north.
        let time = Utc.with_ymd_and_hms(1996, 7, 5, 12, 0, 0).unwrap();
        let pos = ephemeris(time, -35.0, 0.0, 101325.0, 12.0);
        assert!(
            pos.azimuth < 30.0 || pos.azimuth > 330.0,
            "azimuth {} should be near north",
            pos.azimuth
        );
    }

    #[test]
    fn refraction_zero_deep_below_horizon() {
        assert_eq!(refraction_correction(-10.0, 101325.0, 12.0), 0.0);
    }

    #[test]
    fn solar_time_near_noon_at_transit() {
        let pos = golden_benchmark();
        // 12:30 local standard time, longitude correction small at -105.18.
        assert!((pos.solar_time - 12.5).abs() < 0.3, "{}", pos.solar_time);
    }
}
