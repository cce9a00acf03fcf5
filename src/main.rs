//! rlc - RLC circuit analyzer
//!
//! Reads a circuit description (or a JSON snapshot) and prints one view of
//! its analysis to stdout. Logs go to stderr; set `RUST_LOG=debug` to see
//! the pipeline.
//!
//! # Usage
//!
//! ```bash
//! rlc filter.rlc                       # summary
//! rlc filter.rlc --view bode --zoom 2  # Bode table as CSV
//! rlc filter.rlc --view snapshot > filter.json
//! rlc filter.json --view waveform --points 1000
//! ```

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use rlc_core::{
    analysis::{phasor_state, AnalysisReport, Phasor},
    circuit::{validate_parameters, CircuitParameters},
    dsl,
    error::{Result, RlcError},
    export::{self, Snapshot},
    AnalysisConfig, Analyzer,
};

/// Output view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum View {
    /// Resonance, damping and operating-point readouts
    Summary,
    /// Bode table (CSV)
    Bode,
    /// Series impedance in the complex plane (CSV)
    Nyquist,
    /// Input and output waveforms (CSV)
    Waveform,
    /// Phasors at one instant
    Phasor,
    /// Harmonic lines of a periodic excitation (CSV)
    Spectrum,
    /// Parameter snapshot (JSON)
    Snapshot,
}

/// RLC circuit analyzer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Circuit description file (.rlc), or a snapshot (.json)
    #[arg(value_name = "CIRCUIT_FILE")]
    circuit_file: PathBuf,

    /// What to print
    #[arg(short, long, value_enum, default_value_t = View::Summary)]
    view: View,

    /// Number of samples for sweeps and waveforms
    #[arg(short, long)]
    points: Option<usize>,

    /// Bode zoom factor (larger is narrower)
    #[arg(short, long, default_value_t = 1.0)]
    zoom: f64,

    /// Waveform window in seconds (automatic if omitted)
    #[arg(short, long)]
    window: Option<f64>,

    /// Instant for the phasor view, in seconds
    #[arg(short, long, default_value_t = 0.0)]
    time: f64,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let params = load_parameters(&args.circuit_file)?;

    let mut config = AnalysisConfig::new().with_zoom(args.zoom);
    if let Some(points) = args.points {
        config = config
            .with_sweep_points(points)
            .with_nyquist_points(points)
            .with_waveform_points(points);
    }
    if let Some(window) = args.window {
        config = config.with_time_window(window);
    }

    let report = Analyzer::with_config(config).analyze(&params);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.view {
        View::Summary => write_summary(&report, &mut out)?,
        View::Bode => export::write_bode_csv(
            &report.bode,
            &report.effective,
            params.topology,
            &mut out,
        )?,
        View::Nyquist => export::write_nyquist_csv(&report.nyquist, &mut out)?,
        View::Waveform => export::write_waveform_csv(&report.waveform, &mut out)?,
        View::Spectrum => export::write_spectrum_csv(&report.spectrum, &mut out)?,
        View::Phasor => {
            let state = phasor_state(
                args.time,
                &report.effective,
                params.source_frequency,
                params.source_amplitude,
            );
            writeln!(out, "t = {} s", args.time)?;
            for (label, phasor) in [
                ("V ", state.voltage),
                ("I ", state.current),
                ("VR", state.resistor),
                ("VL", state.inductor),
                ("VC", state.capacitor),
            ] {
                write_phasor(label, &phasor, &mut out)?;
            }
        }
        View::Snapshot => writeln!(out, "{}", Snapshot::capture(&params).to_json()?)?,
    }

    out.flush()?;
    Ok(())
}

/// Read parameters from a description file, or from a snapshot if the
/// extension is `.json`.
fn load_parameters(path: &Path) -> Result<CircuitParameters> {
    let is_snapshot = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_snapshot {
        let json = std::fs::read_to_string(path).map_err(|e| RlcError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        let params = Snapshot::from_json(&json)?.parameters;
        validate_parameters(&params)?;
        Ok(params)
    } else {
        let ast = dsl::parse_file(path)?;
        CircuitParameters::from_ast(&ast)
    }
}

fn write_summary<W: Write>(report: &AnalysisReport, out: &mut W) -> Result<()> {
    let p = &report.parameters;
    let e = &report.effective;
    let r = &report.resonance;
    let s = &report.steady_state;
    let d = &report.damping;

    writeln!(out, "Topology:        {}", p.topology)?;
    writeln!(out, "Preset:          {}", p.active_preset)?;
    writeln!(out, "Signal:          {} {} Hz, {} V", p.signal_type, p.source_frequency, p.source_amplitude)?;
    writeln!(out, "R / L / C:       {} ohm / {} H / {} F", e.resistance, e.inductance, e.capacitance)?;
    writeln!(out, "f0:              {:.4} Hz", r.f0)?;
    writeln!(out, "Q:               {:.4}", r.q)?;
    writeln!(out, "Bandwidth:       {:.4} Hz", r.bandwidth)?;
    writeln!(out, "Damping ratio:   {:.4} ({:?})", d.zeta, d.regime)?;
    writeln!(out, "|Z| at source:   {:.4} ohm", s.impedance_magnitude)?;
    writeln!(out, "Phase at source: {:.2} deg", s.phase_degrees)?;
    writeln!(out, "Gain at source:  {:.2} dB", s.gain_db)?;
    writeln!(out, "Nyquist scale:   {:.6} per ohm (unit half-extent)", report.nyquist.scale_for(1.0))?;
    Ok(())
}

fn write_phasor<W: Write>(label: &str, phasor: &Phasor, out: &mut W) -> Result<()> {
    writeln!(out, "{label}: {:.6} @ {:.2} deg", phasor.magnitude, phasor.angle_degrees)?;
    Ok(())
}
