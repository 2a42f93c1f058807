//! GHI decomposition models.
//!
//! Weather files frequently carry only global horizontal irradiance. These
//! models estimate the direct and diffuse split from GHI, sun position, and
//! day of year, so the transposition stage always has full components to
//! work with.

use std::fmt;
use std::str::FromStr;

use crate::atmosphere::{self, AirmassModel};

use super::{ExtraRadiationMethod, SOLAR_CONSTANT, cosd, get_extra_radiation};

/// Selectable GHI decomposition model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecompositionModel {
    Erbs,
    Disc,
}

impl DecompositionModel {
    /// Model names accepted in scenario configuration.
    pub const NAMES: &[&str] = &["erbs", "disc"];
}

impl FromStr for DecompositionModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "erbs" => Ok(Self::Erbs),
            "disc" => Ok(Self::Disc),
            other => Err(format!(
                "unknown decomposition model \"{other}\", available: {}",
                Self::NAMES.join(", ")
            )),
        }
    }
}

impl fmt::Display for DecompositionModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Erbs => f.write_str("erbs"),
            Self::Disc => f.write_str("disc"),
        }
    }
}

/// Floor for the cosine of the zenith angle in the clearness index, to keep
/// low-sun samples bounded.
const MIN_COS_ZENITH: f64 = 0.065;

/// Upper clamp on the clearness index.
const MAX_CLEARNESS_INDEX: f64 = 2.0;

/// Zenith angle above which DISC output is zeroed.
const DISC_MAX_ZENITH: f64 = 87.0;

/// Clearness index: the ratio of GHI to the horizontal extraterrestrial
/// irradiance, clamped to [0, 2].
pub fn clearness_index(ghi: f64, zenith: f64, extra_radiation: f64) -> f64 {
    let cos_zenith = cosd(zenith).max(MIN_COS_ZENITH);
    (ghi / (extra_radiation * cos_zenith)).clamp(0.0, MAX_CLEARNESS_INDEX)
}

/// Output of the Erbs decomposition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErbsResult {
    /// Estimated direct normal irradiance.
    pub dni: f64,
    /// Estimated diffuse horizontal irradiance.
    pub dhi: f64,
    /// Clearness index.
    pub kt: f64,
}

/// Erbs (1982) correlation: diffuse fraction as a piecewise polynomial in
/// the clearness index.
pub fn erbs(ghi: f64, zenith: f64, day_of_year: u32) -> ErbsResult {
    let extra = get_extra_radiation(day_of_year, SOLAR_CONSTANT, ExtraRadiationMethod::Spencer);
    let kt = clearness_index(ghi, zenith, extra);

    let diffuse_fraction = if kt <= 0.22 {
        1.0 - 0.09 * kt
    } else if kt <= 0.8 {
        0.9511 - 0.1604 * kt + 4.388 * kt.powi(2) - 16.638 * kt.powi(3) + 12.336 * kt.powi(4)
    } else {
        0.165
    };

    let dhi = diffuse_fraction * ghi;
    let dni = (ghi - dhi) / cosd(zenith);
    ErbsResult { dni, dhi, kt }
}

/// Output of the DISC decomposition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscResult {
    /// Estimated direct normal irradiance.
    pub dni: f64,
    /// Clearness index.
    pub kt: f64,
    /// Absolute airmass used by the correlation.
    pub airmass: f64,
}

/// Maxwell (1987) DISC model: direct normal irradiance from GHI via a
/// quasi-physical clear-sky beam transmittance and an airmass-dependent
/// departure term.
///
/// Samples with zenith above 87 degrees, negative GHI, or a negative model
/// output yield zero DNI.
pub fn disc(ghi: f64, zenith: f64, day_of_year: u32, pressure: f64) -> DiscResult {
    // DISC was fit against a 1370 W/m² solar constant.
    let extra = get_extra_radiation(day_of_year, 1370.0, ExtraRadiationMethod::Spencer);
    let kt = (ghi / (extra * cosd(zenith).max(MIN_COS_ZENITH))).max(0.0);

    let am = atmosphere::absolute_airmass(
        atmosphere::relative_airmass(zenith, AirmassModel::Kasten1966),
        pressure,
    );

    let (a, b, c) = if kt <= 0.6 {
        (
            0.512 - 1.56 * kt + 2.286 * kt.powi(2) - 2.222 * kt.powi(3),
            0.37 + 0.962 * kt,
            -0.28 + 0.932 * kt - 2.048 * kt.powi(2),
        )
    } else {
        (
            -5.743 + 21.77 * kt - 27.49 * kt.powi(2) + 11.56 * kt.powi(3),
            41.4 - 118.5 * kt + 66.05 * kt.powi(2) + 31.9 * kt.powi(3),
            -47.01 + 184.2 * kt - 222.0 * kt.powi(2) + 73.81 * kt.powi(3),
        )
    };

    let kn_clear = 0.866 - 0.122 * am + 0.0121 * am.powi(2) - 0.000653 * am.powi(3)
        + 1.4e-5 * am.powi(4);
    let kn = kn_clear - (a + b * (c * am).exp());

    let mut dni = kn * extra;
    if zenith > DISC_MAX_ZENITH || ghi < 0.0 || dni.is_nan() || dni < 0.0 {
        dni = 0.0;
    }
    DiscResult { dni, kt, airmass: am }
}
