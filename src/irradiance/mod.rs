//! Irradiance modeling: extraterrestrial radiation, surface geometry,
//! plane-of-array composition, and component synthesis.
//!
//! Sky-diffuse transposition models live in [`transposition`]; GHI
//! decomposition models in [`decomposition`]. All angles are degrees and all
//! irradiances W/m² at the public API.

pub mod decomposition;
pub mod transposition;

use std::fmt;
use std::str::FromStr;

pub use transposition::SkyDiffuseModel;

/// Default solar constant in W/m².
pub const SOLAR_CONSTANT: f64 = 1366.1;

/// Broadband albedo values for common ground surfaces.
pub const SURFACE_ALBEDOS: &[(&str, f64)] = &[
    ("urban", 0.18),
    ("grass", 0.20),
    ("fresh grass", 0.26),
    ("soil", 0.17),
    ("sand", 0.40),
    ("snow", 0.65),
    ("fresh snow", 0.75),
    ("asphalt", 0.12),
    ("concrete", 0.30),
    ("aluminum", 0.85),
    ("copper", 0.74),
    ("fresh steel", 0.35),
    ("dirty steel", 0.08),
    ("sea", 0.06),
];

/// Looks up the albedo for a named surface type.
pub fn surface_albedo(surface_type: &str) -> Option<f64> {
    SURFACE_ALBEDOS
        .iter()
        .find(|(name, _)| *name == surface_type)
        .map(|(_, albedo)| *albedo)
}

/// Horizontal irradiance components for one sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IrradianceComponents {
    /// Global horizontal irradiance.
    pub ghi: f64,
    /// Direct normal irradiance.
    pub dni: f64,
    /// Diffuse horizontal irradiance.
    pub dhi: f64,
}

/// Plane-of-array irradiance components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoaIrradiance {
    /// Total in-plane irradiance.
    pub global: f64,
    /// Beam contribution.
    pub direct: f64,
    /// Total diffuse (sky + ground).
    pub diffuse: f64,
    /// Sky-diffuse contribution from the transposition model.
    pub sky_diffuse: f64,
    /// Ground-reflected contribution.
    pub ground_diffuse: f64,
}

/// Day-angle method for extraterrestrial radiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtraRadiationMethod {
    /// Spencer (1971) Fourier fit, the default.
    Spencer,
    /// ASCE cosine approximation.
    Asce,
}

impl FromStr for ExtraRadiationMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "spencer" => Ok(Self::Spencer),
            "asce" => Ok(Self::Asce),
            other => Err(format!(
                "unknown extraterrestrial radiation method \"{other}\", \
                 available: spencer, asce"
            )),
        }
    }
}

impl fmt::Display for ExtraRadiationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spencer => f.write_str("spencer"),
            Self::Asce => f.write_str("asce"),
        }
    }
}

/// Extraterrestrial direct normal irradiance for a day of year (1-366).
///
/// Accounts for the annual variation of the earth-sun distance.
pub fn get_extra_radiation(
    day_of_year: u32,
    solar_constant: f64,
    method: ExtraRadiationMethod,
) -> f64 {
    let b = 2.0 * std::f64::consts::PI / 365.0 * f64::from(day_of_year - 1);
    let rover_r0_sqrd = match method {
        ExtraRadiationMethod::Spencer => {
            1.00011 + 0.034221 * b.cos() + 0.00128 * b.sin() + 0.000719 * (2.0 * b).cos()
                + 7.7e-5 * (2.0 * b).sin()
        }
        ExtraRadiationMethod::Asce => 1.0 + 0.033 * b.cos(),
    };
    solar_constant * rover_r0_sqrd
}

/// Dot product of the surface normal and the solar vector.
///
/// Positive when the sun is in front of the panel; can be negative or exceed
/// the cosine of the physical incidence angle projection at grazing
/// geometries, which some transposition models rely on.
pub fn aoi_projection(
    surface_tilt: f64,
    surface_azimuth: f64,
    solar_zenith: f64,
    solar_azimuth: f64,
) -> f64 {
    cosd(surface_tilt) * cosd(solar_zenith)
        + sind(surface_tilt) * sind(solar_zenith) * cosd(solar_azimuth - surface_azimuth)
}

/// Angle of incidence in degrees between the sun and the panel normal.
pub fn aoi(surface_tilt: f64, surface_azimuth: f64, solar_zenith: f64, solar_azimuth: f64) -> f64 {
    aoi_projection(surface_tilt, surface_azimuth, solar_zenith, solar_azimuth)
        .clamp(-1.0, 1.0)
        .acos()
        .to_degrees()
}

/// Ground-reflected diffuse irradiance on a tilted surface.
///
/// Isotropic view-factor model: `ghi * albedo * (1 - cos(tilt)) / 2`.
pub fn get_ground_diffuse(surface_tilt: f64, ghi: f64, albedo: f64) -> f64 {
    ghi * albedo * (1.0 - cosd(surface_tilt)) * 0.5
}

/// Composes plane-of-array components from beam and diffuse pieces.
///
/// The beam contribution is `dni * cos(aoi)` floored at zero so that
/// back-of-panel sun positions contribute nothing.
pub fn poa_components(aoi: f64, dni: f64, sky_diffuse: f64, ground_diffuse: f64) -> PoaIrradiance {
    let direct = (dni * cosd(aoi)).max(0.0);
    let diffuse = sky_diffuse + ground_diffuse;
    PoaIrradiance {
        global: direct + diffuse,
        direct,
        diffuse,
        sky_diffuse,
        ground_diffuse,
    }
}

/// Full transposition: horizontal components to plane-of-array irradiance.
///
/// # Arguments
///
/// * `surface_tilt`, `surface_azimuth` - Panel orientation in degrees
/// * `solar_zenith`, `solar_azimuth` - Apparent sun position in degrees
/// * `irrad` - Measured or modeled GHI/DNI/DHI
/// * `dni_extra` - Extraterrestrial DNI (Hay-Davies, Reindl, Perez)
/// * `airmass` - Relative airmass, `NaN` at night (Perez)
/// * `albedo` - Broadband ground albedo
/// * `model` - Sky-diffuse transposition model
pub fn get_total_irradiance(
    surface_tilt: f64,
    surface_azimuth: f64,
    solar_zenith: f64,
    solar_azimuth: f64,
    irrad: IrradianceComponents,
    dni_extra: f64,
    airmass: f64,
    albedo: f64,
    model: SkyDiffuseModel,
) -> PoaIrradiance {
    let sky_diffuse = transposition::sky_diffuse(
        surface_tilt,
        surface_azimuth,
        solar_zenith,
        solar_azimuth,
        irrad,
        dni_extra,
        airmass,
        model,
    );
    let ground_diffuse = get_ground_diffuse(surface_tilt, irrad.ghi, albedo);
    let incidence = aoi(surface_tilt, surface_azimuth, solar_zenith, solar_azimuth);
    poa_components(incidence, irrad.dni, sky_diffuse, ground_diffuse)
}

/// Liu-Jordan component irradiance from zenith angle and atmospheric
/// transmittance.
///
/// Used to synthesize GHI/DNI/DHI for simulation scenarios without measured
/// weather. `transmittance` is the broadband atmospheric transmittance in
/// [0, 1]; `airmass` the absolute airmass.
pub fn liujordan(zenith: f64, transmittance: f64, airmass: f64, dni_extra: f64) -> IrradianceComponents {
    let tau_am = transmittance.powf(airmass);
    let dni = dni_extra * tau_am;
    let dhi = 0.3 * (1.0 - tau_am) * dni_extra * cosd(zenith);
    let ghi = dhi + dni * cosd(zenith);
    IrradianceComponents { ghi, dni, dhi }
}

pub(crate) fn cosd(angle: f64) -> f64 {
    angle.to_radians().cos()
}

pub(crate) fn sind(angle: f64) -> f64 {
    angle.to_radians().sin()
}
