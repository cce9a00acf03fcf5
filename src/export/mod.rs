//! Results output: CSV tables and the JSON parameter snapshot.
//!
//! Writers only format numbers the engine already produced; they never
//! recompute anything except the impedance column of the Bode table.

mod snapshot;

use std::io::Write;

pub use snapshot::{Snapshot, SNAPSHOT_VERSION};

use crate::analysis::{impedance_at, BodePoint, NyquistSweep, SpectralLine, WaveformSample};
use crate::circuit::{EffectiveParameters, Topology};
use crate::error::Result;

/// Write a Bode sweep as CSV, with the circuit impedance at each frequency.
///
/// Format:
/// ```csv
/// frequency_hz,magnitude_db,phase_deg,impedance_ohm,impedance_phase_deg
/// 10,-0.0001,89.9,1591.5,-86.4
/// ```
pub fn write_bode_csv<W: Write>(
    points: &[BodePoint],
    effective: &EffectiveParameters,
    topology: Topology,
    writer: &mut W,
) -> Result<()> {
    writeln!(writer, "frequency_hz,magnitude_db,phase_deg,impedance_ohm,impedance_phase_deg")?;
    for point in points {
        let z = impedance_at(effective, topology, point.frequency);
        writeln!(
            writer,
            "{},{},{},{},{}",
            point.frequency, point.magnitude_db, point.phase_degrees, z.magnitude, z.phase_degrees
        )?;
    }
    Ok(())
}

/// Write a Nyquist sweep as CSV.
///
/// Format:
/// ```csv
/// frequency_hz,real_ohm,imag_ohm
/// 10,100,-1591.0
/// ```
pub fn write_nyquist_csv<W: Write>(sweep: &NyquistSweep, writer: &mut W) -> Result<()> {
    writeln!(writer, "frequency_hz,real_ohm,imag_ohm")?;
    for point in &sweep.points {
        writeln!(writer, "{},{},{}", point.frequency, point.real, point.imaginary)?;
    }
    Ok(())
}

/// Write waveform samples as CSV.
///
/// Format:
/// ```csv
/// time_s,input_v,output_v
/// 0,0,0.30
/// ```
pub fn write_waveform_csv<W: Write>(samples: &[WaveformSample], writer: &mut W) -> Result<()> {
    writeln!(writer, "time_s,input_v,output_v")?;
    for sample in samples {
        writeln!(writer, "{},{},{}", sample.time, sample.input, sample.output)?;
    }
    Ok(())
}

/// Write harmonic spectrum lines as CSV.
pub fn write_spectrum_csv<W: Write>(lines: &[SpectralLine], writer: &mut W) -> Result<()> {
    writeln!(writer, "frequency_hz,input_v,output_v")?;
    for line in lines {
        writeln!(writer, "{},{},{}", line.frequency, line.input_amplitude, line.output_amplitude)?;
    }
    Ok(())
}
