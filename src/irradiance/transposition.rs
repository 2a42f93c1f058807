//! Sky-diffuse transposition models.
//!
//! Each model estimates the diffuse irradiance received by a tilted surface
//! from the sky dome. They range from the one-line isotropic view factor to
//! the anisotropic Perez model with its empirical brightness bins. All return
//! W/m² and clamp physically meaningless negative output to zero (except
//! Reindl, which propagates `NaN` when GHI is zero, matching the original
//! formulation).

use std::fmt;
use std::str::FromStr;

use super::{IrradianceComponents, aoi_projection, cosd, sind};

/// Selectable sky-diffuse model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkyDiffuseModel {
    Isotropic,
    Klucher,
    HayDavies,
    Reindl,
    King,
    Perez,
}

impl SkyDiffuseModel {
    /// All supported models, in documentation order.
    pub const ALL: [SkyDiffuseModel; 6] = [
        Self::Isotropic,
        Self::Klucher,
        Self::HayDavies,
        Self::Reindl,
        Self::King,
        Self::Perez,
    ];

    /// Model names accepted in scenario configuration.
    pub const NAMES: &[&str] = &[
        "isotropic",
        "klucher",
        "haydavies",
        "reindl",
        "king",
        "perez",
    ];
}

impl FromStr for SkyDiffuseModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "isotropic" => Ok(Self::Isotropic),
            "klucher" => Ok(Self::Klucher),
            "haydavies" => Ok(Self::HayDavies),
            "reindl" => Ok(Self::Reindl),
            "king" => Ok(Self::King),
            "perez" => Ok(Self::Perez),
            other => Err(format!(
                "unknown sky diffuse model \"{other}\", available: {}",
                Self::NAMES.join(", ")
            )),
        }
    }
}

impl fmt::Display for SkyDiffuseModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Isotropic => "isotropic",
            Self::Klucher => "klucher",
            Self::HayDavies => "haydavies",
            Self::Reindl => "reindl",
            Self::King => "king",
            Self::Perez => "perez",
        };
        f.write_str(name)
    }
}

/// Dispatches to the chosen sky-diffuse model.
#[expect(clippy::too_many_arguments)]
pub fn sky_diffuse(
    surface_tilt: f64,
    surface_azimuth: f64,
    solar_zenith: f64,
    solar_azimuth: f64,
    irrad: IrradianceComponents,
    dni_extra: f64,
    airmass: f64,
    model: SkyDiffuseModel,
) -> f64 {
    match model {
        SkyDiffuseModel::Isotropic => isotropic(surface_tilt, irrad.dhi),
        SkyDiffuseModel::Klucher => klucher(
            surface_tilt,
            surface_azimuth,
            irrad.dhi,
            irrad.ghi,
            solar_zenith,
            solar_azimuth,
        ),
        SkyDiffuseModel::HayDavies => haydavies(
            surface_tilt,
            surface_azimuth,
            irrad.dhi,
            irrad.dni,
            dni_extra,
            solar_zenith,
            solar_azimuth,
        ),
        SkyDiffuseModel::Reindl => reindl(
            surface_tilt,
            surface_azimuth,
            irrad.dhi,
            irrad.dni,
            irrad.ghi,
            dni_extra,
            solar_zenith,
            solar_azimuth,
        ),
        SkyDiffuseModel::King => king(surface_tilt, irrad.dhi, irrad.ghi, solar_zenith),
        SkyDiffuseModel::Perez => perez(
            surface_tilt,
            surface_azimuth,
            irrad.dhi,
            irrad.dni,
            dni_extra,
            solar_zenith,
            solar_azimuth,
            airmass,
        ),
    }
}

/// Isotropic sky: the tilted surface sees a uniform sky dome.
pub fn isotropic(surface_tilt: f64, dhi: f64) -> f64 {
    dhi * (1.0 + cosd(surface_tilt)) * 0.5
}

/// Klucher (1979) anisotropic model.
///
/// Adds horizon-brightening and circumsolar terms controlled by a clearness
/// modulating function `F = 1 - (DHI/GHI)^2`; `F` collapses to zero (the
/// isotropic limit) under fully overcast skies and at night.
pub fn klucher(
    surface_tilt: f64,
    surface_azimuth: f64,
    dhi: f64,
    ghi: f64,
    solar_zenith: f64,
    solar_azimuth: f64,
) -> f64 {
    let f = if ghi > 0.0 {
        1.0 - (dhi / ghi).powi(2)
    } else {
        0.0
    };
    let cos_tt = aoi_projection(surface_tilt, surface_azimuth, solar_zenith, solar_azimuth);
    let term1 = 0.5 * (1.0 + cosd(surface_tilt));
    let term2 = 1.0 + f * sind(0.5 * surface_tilt).powi(3);
    let term3 = 1.0 + f * cos_tt.powi(2) * sind(solar_zenith).powi(3);
    dhi * term1 * term2 * term3
}

/// Hay-Davies (1980) model: circumsolar fraction weighted by the anisotropy
/// index `AI = DNI / DNI_extra`, remainder isotropic.
pub fn haydavies(
    surface_tilt: f64,
    surface_azimuth: f64,
    dhi: f64,
    dni: f64,
    dni_extra: f64,
    solar_zenith: f64,
    solar_azimuth: f64,
) -> f64 {
    let cos_tt = aoi_projection(surface_tilt, surface_azimuth, solar_zenith, solar_azimuth);
    let rb = cos_tt / cosd(solar_zenith);
    let ai = dni / dni_extra;
    let sky_diffuse = dhi * (ai * rb + (1.0 - ai) * 0.5 * (1.0 + cosd(surface_tilt)));
    sky_diffuse.max(0.0)
}

/// Reindl (1990) model: Hay-Davies plus a horizon-brightening correction
/// driven by the beam fraction of GHI.
///
/// Returns `NaN` when GHI is zero, as the horizon term divides by it.
#[expect(clippy::too_many_arguments)]
pub fn reindl(
    surface_tilt: f64,
    surface_azimuth: f64,
    dhi: f64,
    dni: f64,
    ghi: f64,
    dni_extra: f64,
    solar_zenith: f64,
    solar_azimuth: f64,
) -> f64 {
    let cos_tt = aoi_projection(surface_tilt, surface_azimuth, solar_zenith, solar_azimuth);
    let cos_zen = cosd(solar_zenith);
    let rb = cos_tt / cos_zen;
    let ai = dni / dni_extra;
    let hb = (dni * cos_zen).max(0.0);
    let term2 = 0.5 * (1.0 + cosd(surface_tilt));
    let term3 = 1.0 + (hb / ghi).sqrt() * sind(0.5 * surface_tilt).powi(3);
    let sky_diffuse = dhi * (ai * rb + (1.0 - ai) * term2 * term3);
    // f64::max would swallow the zero-GHI NaN; keep it.
    if sky_diffuse.is_nan() {
        sky_diffuse
    } else {
        sky_diffuse.max(0.0)
    }
}

/// King model: empirical blend of isotropic diffuse and a GHI-dependent
/// zenith term developed at Sandia.
pub fn king(surface_tilt: f64, dhi: f64, ghi: f64, solar_zenith: f64) -> f64 {
    let sky_diffuse = dhi * (1.0 + cosd(surface_tilt)) / 2.0
        + ghi * (0.012 * solar_zenith - 0.04) * (1.0 - cosd(surface_tilt)) / 2.0;
    sky_diffuse.max(0.0)
}

/// Perez (1990) all-sites composite coefficients.
///
/// Rows are sky-clearness bins; columns `f11..f13, f21..f23`.
const PEREZ_ALLSITES_1990: [[f64; 6]; 8] = [
    [-0.0080, 0.5880, -0.0620, -0.0600, 0.0720, -0.0220],
    [0.1300, 0.6830, -0.1510, -0.0190, 0.0660, -0.0290],
    [0.3300, 0.4870, -0.2210, 0.0550, -0.0640, -0.0260],
    [0.5680, 0.1870, -0.2950, 0.1090, -0.1520, -0.0140],
    [0.8730, -0.3920, -0.3620, 0.2260, -0.4620, 0.0010],
    [1.1320, -1.2370, -0.4120, 0.2880, -0.8230, 0.0560],
    [1.0600, -1.6000, -0.3590, 0.2640, -1.1270, 0.1310],
    [0.6780, -0.3270, -0.2500, 0.1560, -1.3770, 0.2510],
];

/// Sky-clearness bin edges for the Perez model.
const PEREZ_CLEARNESS_BINS: [f64; 7] = [1.065, 1.23, 1.5, 1.95, 2.8, 4.5, 6.2];

/// Perez sky-diffuse split into isotropic, circumsolar, and horizon terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerezComponents {
    pub isotropic: f64,
    pub circumsolar: f64,
    pub horizon: f64,
}

impl PerezComponents {
    /// Total sky diffuse, floored at zero. `NaN` terms propagate.
    pub fn total(&self) -> f64 {
        let sum = self.isotropic + self.circumsolar + self.horizon;
        if sum.is_nan() { sum } else { sum.max(0.0) }
    }
}

/// Perez (1990) anisotropic sky-diffuse model.
///
/// Requires the relative airmass; samples with non-finite airmass (night)
/// yield zero. See [`perez_components`] for the term breakdown.
#[expect(clippy::too_many_arguments)]
pub fn perez(
    surface_tilt: f64,
    surface_azimuth: f64,
    dhi: f64,
    dni: f64,
    dni_extra: f64,
    solar_zenith: f64,
    solar_azimuth: f64,
    airmass: f64,
) -> f64 {
    perez_components(
        surface_tilt,
        surface_azimuth,
        dhi,
        dni,
        dni_extra,
        solar_zenith,
        solar_azimuth,
        airmass,
    )
    .map(|c| c.total())
    .unwrap_or(0.0)
}

/// Perez model term breakdown.
///
/// Returns `None` when the airmass is not finite (night), which the scalar
/// wrapper maps to zero. `NaN` DNI propagates through the clearness index
/// into `NaN` components.
#[expect(clippy::too_many_arguments)]
pub fn perez_components(
    surface_tilt: f64,
    surface_azimuth: f64,
    dhi: f64,
    dni: f64,
    dni_extra: f64,
    solar_zenith: f64,
    solar_azimuth: f64,
    airmass: f64,
) -> Option<PerezComponents> {
    if !airmass.is_finite() {
        return None;
    }

    const KAPPA: f64 = 1.041;
    let z = solar_zenith.to_radians();

    // Sky brightness and clearness (Perez eqns 1 and 2).
    let delta = dhi * airmass / dni_extra;
    let eps = ((dhi + dni) / dhi + KAPPA * z.powi(3)) / (1.0 + KAPPA * z.powi(3));
    if eps.is_nan() {
        // Unknown clearness (NaN DNI): the terms are undefined.
        return Some(PerezComponents {
            isotropic: f64::NAN,
            circumsolar: f64::NAN,
            horizon: f64::NAN,
        });
    }

    let bin = PEREZ_CLEARNESS_BINS.iter().filter(|edge| eps >= **edge).count();
    let c = &PEREZ_ALLSITES_1990[bin.min(7)];

    let f1 = (c[0] + c[1] * delta + c[2] * z).max(0.0);
    let f2 = c[3] + c[4] * delta + c[5] * z;

    // Circumsolar geometry: numerator floored at 0, denominator at cos(85).
    let a = aoi_projection(surface_tilt, surface_azimuth, solar_zenith, solar_azimuth).max(0.0);
    let b = cosd(solar_zenith).max(cosd(85.0));

    Some(PerezComponents {
        isotropic: dhi * 0.5 * (1.0 - f1) * (1.0 + cosd(surface_tilt)),
        circumsolar: dhi * f1 * a / b,
        horizon: dhi * f2 * sind(surface_tilt),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // Fixture series: Tucson, 2014-06-24, 6-hourly. Hard-coded sun position,
    // component irradiance, and airmass so the models are tested in
    // isolation.
    const APPARENT_ZENITH: [f64; 4] = [124.0390863, 82.85457044, 10.56413562, 72.41687122];
    const AZIMUTH: [f64; 4] = [352.69550699, 66.71410338, 144.76567754, 287.04104128];
    const GHI: [f64; 4] = [0.0, 79.73860422, 1042.48031487, 257.20751138];
    const DNI: [f64; 4] = [0.0, 316.1949056, 939.95469881, 646.22886049];
    const DHI: [f64; 4] = [0.0, 40.46149818, 118.45831879, 62.03376265];
    const DNI_ET: f64 = 1321.1655834833093;
    const AIRMASS: [f64; 4] = [f64::NAN, 7.58831596, 1.01688136, 3.27930443];

    #[test]
    fn isotropic_scalar_reference() {
        // tilt=40, dhi=100 -> 88.30222215594891.
        let r = isotropic(40.0, 100.0);
        assert!((r - 88.30222215594891).abs() < 1e-9);
    }

    #[test]
    fn isotropic_series_reference() {
        let expected = [0.0, 35.728402, 104.601328, 54.777191];
        for (dhi, e) in DHI.iter().zip(expected) {
            let r = isotropic(40.0, *dhi);
            assert!((r - e).abs() < 1e-4, "got {r}, expected {e}");
        }
    }

    #[test]
    fn klucher_scalar_reference() {
        // tilt=40, az=180, dhi=100, ghi=900, zen=20, sun az=180.
        let r = klucher(40.0, 180.0, 100.0, 900.0, 20.0, 180.0);
        assert!((r - 94.99429931664851).abs() < 1e-6, "got {r}");
    }

    #[test]
    fn klucher_series_reference() {
        let expected = [0.0, 37.446276, 109.209347, 56.965916];
        for i in 0..4 {
            let r = klucher(40.0, 180.0, DHI[i], GHI[i], APPARENT_ZENITH[i], AZIMUTH[i]);
            assert!((r - expected[i]).abs() < 1e-4, "i={i}: got {r}");
        }
    }

    #[test]
    fn haydavies_series_reference() {
        let expected = [0.0, 14.967008, 102.994862, 33.190865];
        for i in 0..4 {
            let r = haydavies(
                40.0,
                180.0,
                DHI[i],
                DNI[i],
                DNI_ET,
                APPARENT_ZENITH[i],
                AZIMUTH[i],
            );
            assert!((r - expected[i]).abs() < 1e-4, "i={i}: got {r}");
        }
    }

    #[test]
    fn reindl_series_reference() {
        let expected = [f64::NAN, 15.730664, 104.131724, 34.166258];
        for i in 0..4 {
            let r = reindl(
                40.0,
                180.0,
                DHI[i],
                DNI[i],
                GHI[i],
                DNI_ET,
                APPARENT_ZENITH[i],
                AZIMUTH[i],
            );
            if expected[i].is_nan() {
                assert!(r.is_nan(), "i={i}: expected NaN, got {r}");
            } else {
                assert!((r - expected[i]).abs() < 1e-4, "i={i}: got {r}");
            }
        }
    }

    #[test]
    fn king_series_reference() {
        let expected = [0.0, 44.629352, 115.182626, 79.719855];
        for i in 0..4 {
            let r = king(40.0, DHI[i], GHI[i], APPARENT_ZENITH[i]);
            assert!((r - expected[i]).abs() < 1e-4, "i={i}: got {r}");
        }
    }

    #[test]
    fn perez_series_reference() {
        // DNI at index 2 replaced by NaN in the reference series.
        let dni = [DNI[0], DNI[1], f64::NAN, DNI[3]];
        let expected = [0.0, 31.46046871, f64::NAN, 45.45539877];
        for i in 0..4 {
            let r = perez(
                40.0,
                180.0,
                DHI[i],
                dni[i],
                DNI_ET,
                APPARENT_ZENITH[i],
                AZIMUTH[i],
                AIRMASS[i],
            );
            if expected[i].is_nan() {
                assert!(r.is_nan(), "i={i}: expected NaN, got {r}");
            } else {
                assert!((r - expected[i]).abs() < 1e-2, "i={i}: got {r}");
            }
        }
    }

    #[test]
    fn perez_nan_airmass_is_zero() {
        let r = perez(40.0, 180.0, 0.0, 0.0, DNI_ET, 124.0, 352.7, f64::NAN);
        assert_eq!(r, 0.0);
    }

    #[test]
    fn perez_component_breakdown() {
        // Index 1 of the fixture: expected isotropic 26.84138589,
        // circumsolar 0, horizon 4.62212181.
        let c = perez_components(
            40.0,
            180.0,
            DHI[1],
            DNI[1],
            DNI_ET,
            APPARENT_ZENITH[1],
            AZIMUTH[1],
            AIRMASS[1],
        )
        .expect("finite airmass");
        assert!((c.isotropic - 26.84138589).abs() < 1e-2, "{}", c.isotropic);
        assert!(c.circumsolar.abs() < 1e-9, "{}", c.circumsolar);
        assert!((c.horizon - 4.62212181).abs() < 1e-2, "{}", c.horizon);
        assert!((c.total() - 31.46046871).abs() < 1e-2);
    }

    #[test]
    fn perez_component_sum_matches_total() {
        let c = perez_components(
            40.0,
            180.0,
            DHI[3],
            DNI[3],
            DNI_ET,
            APPARENT_ZENITH[3],
            AZIMUTH[3],
            AIRMASS[3],
        )
        .expect("finite airmass");
        let expected = PerezComponents {
            isotropic: 31.72696071,
            circumsolar: 4.47966439,
            horizon: 9.25316454,
        };
        assert!((c.isotropic - expected.isotropic).abs() < 1e-2);
        assert!((c.circumsolar - expected.circumsolar).abs() < 1e-2);
        assert!((c.horizon - expected.horizon).abs() < 1e-2);
    }

    #[test]
    fn model_names_parse_round_trip() {
        for &name in SkyDiffuseModel::NAMES {
            let model: SkyDiffuseModel = name.parse().expect("known model");
            assert_eq!(model.to_string(), name);
        }
        assert!("v3".parse::<SkyDiffuseModel>().is_err());
    }

    #[test]
    fn night_all_models_zero_or_nan() {
        let irrad = IrradianceComponents {
            ghi: 0.0,
            dni: 0.0,
            dhi: 0.0,
        };
        for model in SkyDiffuseModel::ALL {
            let r = sky_diffuse(40.0, 180.0, 124.04, 352.7, irrad, DNI_ET, f64::NAN, model);
            assert!(
                r == 0.0 || r.is_nan(),
                "{model:?} should be 0 or NaN at night, got {r}"
            );
        }
    }
}
