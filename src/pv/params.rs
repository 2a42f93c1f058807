//! Single-diode model parameters and the De Soto adjustment.

/// Boltzmann constant in eV/K.
const BOLTZMANN_EV: f64 = 8.617332478e-5;

/// Reference cell temperature in kelvin (25 C).
const T_REF: f64 = 298.15;

/// Reference (STC) parameters of a PV module for the De Soto model.
///
/// The defaults describe a generic 72-cell crystalline-silicon module of
/// roughly 330 W nameplate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModuleParams {
    /// Light-generated current at reference conditions, A.
    pub il_ref: f64,
    /// Diode saturation current at reference conditions, A.
    pub io_ref: f64,
    /// Series resistance, ohm.
    pub rs_ref: f64,
    /// Shunt resistance at reference conditions, ohm.
    pub rsh_ref: f64,
    /// Modified ideality factor `n * Ns * k * Tref / q`, V.
    pub a_ref: f64,
    /// Temperature coefficient of short-circuit current, A/C.
    pub alpha_sc: f64,
    /// Band gap at reference temperature, eV.
    pub eg_ref: f64,
    /// Relative temperature dependence of the band gap, 1/K.
    pub degdt: f64,
    /// Cells connected in series.
    pub cells_in_series: u32,
}

impl Default for ModuleParams {
    fn default() -> Self {
        Self {
            il_ref: 9.5,
            io_ref: 3.0e-10,
            rs_ref: 0.35,
            rsh_ref: 400.0,
            a_ref: 1.90,
            alpha_sc: 0.0045,
            eg_ref: 1.121,
            degdt: -0.0002677,
            cells_in_series: 72,
        }
    }
}

/// Single-diode equation parameters at one operating condition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiodeParams {
    /// Light-generated current, A.
    pub photocurrent: f64,
    /// Diode saturation current, A.
    pub saturation_current: f64,
    /// Series resistance, ohm.
    pub series_resistance: f64,
    /// Shunt resistance, ohm.
    pub shunt_resistance: f64,
    /// Product `n * Ns * Vth` at the cell temperature, V.
    pub nnsvth: f64,
}

/// De Soto et al. (2006) five-parameter adjustment from reference conditions
/// to the given effective irradiance (W/m²) and cell temperature (C).
///
/// The shunt resistance is inversely proportional to irradiance and becomes
/// infinite in the dark.
pub fn desoto(module: &ModuleParams, effective_irradiance: f64, temp_cell: f64) -> DiodeParams {
    let tc = temp_cell + 273.15;
    let band_gap = module.eg_ref * (1.0 + module.degdt * (tc - T_REF));

    let nnsvth = module.a_ref * tc / T_REF;
    let photocurrent = effective_irradiance / 1000.0
        * (module.il_ref + module.alpha_sc * (tc - T_REF));
    let saturation_current = module.io_ref
        * (tc / T_REF).powi(3)
        * (module.eg_ref / (BOLTZMANN_EV * T_REF) - band_gap / (BOLTZMANN_EV * tc)).exp();
    let shunt_resistance = if effective_irradiance > 0.0 {
        module.rsh_ref * 1000.0 / effective_irradiance
    } else {
        f64::INFINITY
    };

    DiodeParams {
        photocurrent,
        saturation_current,
        series_resistance: module.rs_ref,
        shunt_resistance,
        nnsvth,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stc_matches_reference_values() {
        let module = ModuleParams::default();
        let p = desoto(&module, 1000.0, 25.0);
        assert!((p.photocurrent - module.il_ref).abs() < 1e-12);
        assert!((p.saturation_current - module.io_ref).abs() < 1e-20);
        assert!((p.shunt_resistance - module.rsh_ref).abs() < 1e-9);
        assert!((p.nnsvth - module.a_ref).abs() < 1e-12);
        assert_eq!(p.series_resistance, module.rs_ref);
    }

    #[test]
    fn photocurrent_scales_with_irradiance() {
        let module = ModuleParams::default();
        let half = desoto(&module, 500.0, 25.0);
        assert!((half.photocurrent - module.il_ref / 2.0).abs() < 1e-12);
    }

    #[test]
    fn dark_module() {
        let p = desoto(&ModuleParams::default(), 0.0, 10.0);
        assert_eq!(p.photocurrent, 0.0);
        assert!(p.shunt_resistance.is_infinite());
    }

    #[test]
    fn hot_cell_raises_saturation_current() {
        let module = ModuleParams::default();
        let cold = desoto(&module, 1000.0, 25.0);
        let hot = desoto(&module, 1000.0, 60.0);
        assert!(hot.saturation_current > 10.0 * cold.saturation_current);
        assert!(hot.photocurrent > cold.photocurrent);
        assert!(hot.nnsvth > cold.nnsvth);
    }

    #[test]
    fn shunt_resistance_grows_at_low_light() {
        let module = ModuleParams::default();
        let dim = desoto(&module, 100.0, 25.0);
        assert!((dim.shunt_resistance - 4000.0).abs() < 1e-9);
    }
}
