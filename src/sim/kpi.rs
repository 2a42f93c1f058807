//! Post-hoc KPI computation from simulation results.

use std::fmt;

use super::types::StepRecord;

/// Aggregate key performance indicators derived from a complete run.
///
/// Computed post-hoc from `Vec<StepRecord>` so the reported metrics always
/// agree with the exported telemetry.
#[derive(Debug, Clone)]
pub struct KpiReport {
    /// Total DC energy yield (kWh).
    pub energy_kwh: f64,
    /// Energy yield divided by nameplate times elapsed time (%).
    pub capacity_factor_pct: f64,
    /// Energy yield per kW of nameplate (kWh/kWp).
    pub specific_yield_kwh_per_kwp: f64,
    /// Highest instantaneous DC power (W).
    pub peak_power_w: f64,
    /// Hours with nonzero generation.
    pub generation_hours: f64,
    /// Mean cell temperature over generating steps (C).
    pub mean_cell_temp_c: f64,
    /// Highest cell temperature (C).
    pub max_cell_temp_c: f64,
    /// Highest plane-of-array irradiance (W/m²).
    pub peak_poa_w_m2: f64,
}

impl KpiReport {
    /// Computes all KPIs from the complete step record vector.
    ///
    /// # Arguments
    ///
    /// * `results` - Complete simulation step records
    /// * `dt_hours` - Timestep duration in hours
    /// * `nameplate_w` - Array nameplate power at STC
    pub fn from_results(results: &[StepRecord], dt_hours: f64, nameplate_w: f64) -> Self {
        if results.is_empty() {
            return Self {
                energy_kwh: 0.0,
                capacity_factor_pct: 0.0,
                specific_yield_kwh_per_kwp: 0.0,
                peak_power_w: 0.0,
                generation_hours: 0.0,
                mean_cell_temp_c: 0.0,
                max_cell_temp_c: 0.0,
                peak_poa_w_m2: 0.0,
            };
        }

        let mut energy_wh = 0.0_f64;
        let mut peak_power = 0.0_f64;
        let mut generating_steps = 0_usize;
        let mut cell_temp_sum = 0.0_f64;
        let mut max_cell_temp = f64::NEG_INFINITY;
        let mut peak_poa = 0.0_f64;

        for r in results {
            energy_wh += r.dc_power_w * dt_hours;
            peak_power = peak_power.max(r.dc_power_w);
            peak_poa = peak_poa.max(r.poa_global);
            max_cell_temp = max_cell_temp.max(r.temp_cell);
            if r.dc_power_w > 0.0 {
                generating_steps += 1;
                cell_temp_sum += r.temp_cell;
            }
        }

        let energy_kwh = energy_wh / 1000.0;
        let elapsed_hours = results.len() as f64 * dt_hours;
        let nameplate_kw = nameplate_w / 1000.0;

        let capacity_factor_pct = if nameplate_kw > 0.0 && elapsed_hours > 0.0 {
            100.0 * energy_kwh / (nameplate_kw * elapsed_hours)
        } else {
            0.0
        };
        let specific_yield = if nameplate_kw > 0.0 {
            energy_kwh / nameplate_kw
        } else {
            0.0
        };
        let mean_cell_temp = if generating_steps > 0 {
            cell_temp_sum / generating_steps as f64
        } else {
            0.0
        };

        Self {
            energy_kwh,
            capacity_factor_pct,
            specific_yield_kwh_per_kwp: specific_yield,
            peak_power_w: peak_power,
            generation_hours: generating_steps as f64 * dt_hours,
            mean_cell_temp_c: mean_cell_temp,
            max_cell_temp_c: max_cell_temp,
            peak_poa_w_m2: peak_poa,
        }
    }
}

impl fmt::Display for KpiReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- KPI Report ---")?;
        writeln!(f, "Energy yield:        {:.2} kWh", self.energy_kwh)?;
        writeln!(f, "Capacity factor:     {:.1}%", self.capacity_factor_pct)?;
        writeln!(
            f,
            "Specific yield:      {:.2} kWh/kWp",
            self.specific_yield_kwh_per_kwp
        )?;
        writeln!(f, "Peak DC power:       {:.1} W", self.peak_power_w)?;
        writeln!(f, "Generation hours:    {:.1} h", self.generation_hours)?;
        writeln!(
            f,
            "Cell temperature:    mean {:.1} C, max {:.1} C",
            self.mean_cell_temp_c, self.max_cell_temp_c
        )?;
        write!(f, "Peak POA irradiance: {:.1} W/m²", self.peak_poa_w_m2)
    }
}
