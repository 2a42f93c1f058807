//! CSV export for simulation step records.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sim::types::StepRecord;

/// Schema v1 column header for CSV telemetry export.
const HEADER: &str = "timestep,time,apparent_zenith,azimuth,ghi,dni,dhi,\
                      poa_global,temp_air,wind_speed,temp_cell,dc_power_w,\
                      v_mp,i_mp";

/// Exports simulation records to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(results: &[StepRecord], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(results, buf)
}

/// Writes simulation records as CSV to any writer.
///
/// Writes a header row followed by one data row per step. Produces
/// deterministic output for identical inputs; timestamps are RFC 3339.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(results: &[StepRecord], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for r in results {
        wtr.write_record(&[
            r.timestep.to_string(),
            r.time.to_rfc3339(),
            format!("{:.4}", r.apparent_zenith),
            format!("{:.4}", r.azimuth),
            format!("{:.4}", r.ghi),
            format!("{:.4}", r.dni),
            format!("{:.4}", r.dhi),
            format!("{:.4}", r.poa_global),
            format!("{:.2}", r.temp_air),
            format!("{:.2}", r.wind_speed),
            format!("{:.2}", r.temp_cell),
            format!("{:.2}", r.dc_power_w),
            format!("{:.2}", r.v_mp),
            format!("{:.3}", r.i_mp),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
