//! PV module and array performance modeling.
//!
//! The chain runs plane-of-array irradiance and weather through the SAPM
//! cell-temperature model ([`temperature`]), adjusts the single-diode
//! parameters with the De Soto model ([`params`]), and solves the diode
//! equation for the operating point ([`diode`]).

pub mod diode;
pub mod params;
pub mod temperature;

pub use diode::{SingleDiodeResult, singlediode};
pub use params::{DiodeParams, ModuleParams, desoto};
pub use temperature::{MountType, sapm_cell_temperature};

/// Electrical layout of an array: series modules per string and parallel
/// strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayLayout {
    pub modules_per_string: u32,
    pub strings: u32,
}

impl ArrayLayout {
    pub fn total_modules(&self) -> u32 {
        self.modules_per_string * self.strings
    }

    /// Scales a single-module operating point to the array: voltages
    /// multiply along the string, currents across strings.
    pub fn scale(&self, module: SingleDiodeResult) -> SingleDiodeResult {
        let v = f64::from(self.modules_per_string);
        let i = f64::from(self.strings);
        SingleDiodeResult {
            i_sc: module.i_sc * i,
            v_oc: module.v_oc * v,
            i_mp: module.i_mp * i,
            v_mp: module.v_mp * v,
            p_mp: module.p_mp * v * i,
            i_x: module.i_x * i,
            i_xx: module.i_xx * i,
        }
    }
}

impl Default for ArrayLayout {
    fn default() -> Self {
        Self {
            modules_per_string: 1,
            strings: 1,
        }
    }
}
