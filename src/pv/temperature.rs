//! SAPM cell-temperature model.

use std::fmt;
use std::str::FromStr;

/// Empirical SAPM thermal coefficients for a mounting configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SapmThermalParams {
    /// Irradiance coefficient (dimensionless).
    pub a: f64,
    /// Wind coefficient, s/m.
    pub b: f64,
    /// Module-to-cell temperature difference at 1000 W/m², C.
    pub delta_t: f64,
}

/// Standard SAPM mounting configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountType {
    OpenRackGlassGlass,
    CloseMountGlassGlass,
    OpenRackGlassPolymer,
    InsulatedBackGlassPolymer,
}

impl MountType {
    /// Mount names accepted in scenario configuration.
    pub const NAMES: &[&str] = &[
        "open_rack_glass_glass",
        "close_mount_glass_glass",
        "open_rack_glass_polymer",
        "insulated_back_glass_polymer",
    ];

    /// Thermal coefficients measured for this mounting configuration.
    pub fn params(&self) -> SapmThermalParams {
        match self {
            Self::OpenRackGlassGlass => SapmThermalParams {
                a: -3.47,
                b: -0.0594,
                delta_t: 3.0,
            },
            Self::CloseMountGlassGlass => SapmThermalParams {
                a: -2.98,
                b: -0.0471,
                delta_t: 1.0,
            },
            Self::OpenRackGlassPolymer => SapmThermalParams {
                a: -3.56,
                b: -0.075,
                delta_t: 3.0,
            },
            Self::InsulatedBackGlassPolymer => SapmThermalParams {
                a: -2.81,
                b: -0.0455,
                delta_t: 0.0,
            },
        }
    }
}

impl FromStr for MountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open_rack_glass_glass" => Ok(Self::OpenRackGlassGlass),
            "close_mount_glass_glass" => Ok(Self::CloseMountGlassGlass),
            "open_rack_glass_polymer" => Ok(Self::OpenRackGlassPolymer),
            "insulated_back_glass_polymer" => Ok(Self::InsulatedBackGlassPolymer),
            other => Err(format!(
                "unknown mount type \"{other}\", available: {}",
                Self::NAMES.join(", ")
            )),
        }
    }
}

impl fmt::Display for MountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::OpenRackGlassGlass => "open_rack_glass_glass",
            Self::CloseMountGlassGlass => "close_mount_glass_glass",
            Self::OpenRackGlassPolymer => "open_rack_glass_polymer",
            Self::InsulatedBackGlassPolymer => "insulated_back_glass_polymer",
        };
        f.write_str(name)
    }
}

/// SAPM back-of-module temperature in C.
///
/// `poa_global` in W/m², `temp_air` in C, `wind_speed` in m/s at 10 m.
pub fn sapm_module_temperature(
    poa_global: f64,
    temp_air: f64,
    wind_speed: f64,
    params: SapmThermalParams,
) -> f64 {
    poa_global * (params.a + params.b * wind_speed).exp() + temp_air
}

/// SAPM cell temperature in C: module temperature plus the irradiance-scaled
/// cell-to-module offset.
pub fn sapm_cell_temperature(
    poa_global: f64,
    temp_air: f64,
    wind_speed: f64,
    params: SapmThermalParams,
) -> f64 {
    sapm_module_temperature(poa_global, temp_air, wind_speed, params)
        + poa_global / 1000.0 * params.delta_t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_rack_reference() {
        // 900 W/m², 20 C air, 5 m/s wind.
        let p = MountType::OpenRackGlassGlass.params();
        let module = sapm_module_temperature(900.0, 20.0, 5.0, p);
        let cell = sapm_cell_temperature(900.0, 20.0, 5.0, p);
        assert!((module - 40.809).abs() < 1e-3, "module {module}");
        assert!((cell - 43.509).abs() < 1e-3, "cell {cell}");
    }

    #[test]
    fn night_cell_at_air_temperature() {
        for &name in MountType::NAMES {
            let mount: MountType = name.parse().expect("known mount");
            let cell = sapm_cell_temperature(0.0, 12.0, 2.0, mount.params());
            assert!((cell - 12.0).abs() < 1e-12, "{name}");
        }
    }

    #[test]
    fn wind_cools_the_module() {
        let p = MountType::OpenRackGlassPolymer.params();
        let calm = sapm_cell_temperature(1000.0, 25.0, 0.5, p);
        let windy = sapm_cell_temperature(1000.0, 25.0, 10.0, p);
        assert!(windy < calm);
    }

    #[test]
    fn insulated_back_runs_hottest() {
        let open = sapm_cell_temperature(1000.0, 25.0, 2.0, MountType::OpenRackGlassGlass.params());
        let insulated = sapm_cell_temperature(
            1000.0,
            25.0,
            2.0,
            MountType::InsulatedBackGlassPolymer.params(),
        );
        assert!(insulated > open + 5.0);
    }

    #[test]
    fn mount_names_parse_round_trip() {
        for &name in MountType::NAMES {
            let mount: MountType = name.parse().expect("known mount");
            assert_eq!(mount.to_string(), name);
        }
        assert!("roof".parse::<MountType>().is_err());
    }
}
