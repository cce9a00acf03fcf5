//! End-to-end tests: description text -> analyzer -> export.

use approx::assert_relative_eq;
use rlc_core::analysis::{
    gain_db, impulse_response, resonance, step_response, waveform, Damping, DampingRegime,
};
use rlc_core::circuit::normalize;
use rlc_core::export::{write_bode_csv, write_waveform_csv, Snapshot};
use rlc_core::{AnalysisConfig, Analyzer, CircuitParameters, FilterPreset, RlcError, SignalType, Topology};

const REFERENCE: &str = "\
# Reference circuit
.topology series
.preset lowpass
.signal step
.source 1k 1
R1 100
L1 10m
C1 10u
";

#[test]
fn test_description_to_report() {
    let params = CircuitParameters::from_description(REFERENCE).unwrap();
    assert_eq!(params.topology, Topology::Series);
    assert_eq!(params.signal_type, SignalType::Step);

    let report = Analyzer::new().analyze(&params);
    assert_relative_eq!(report.resonance.f0, 503.292, max_relative = 1e-5);
    assert_relative_eq!(report.resonance.q, 0.316_227_766, max_relative = 1e-8);
    assert_relative_eq!(report.damping.zeta, 1.581_138_83, max_relative = 1e-8);
    assert_eq!(report.damping.regime, DampingRegime::Overdamped);
    assert!(report.waveform.iter().all(|s| s.output.is_finite()));
}

#[test]
fn test_resonance_scenario_159_hz() {
    let params = CircuitParameters::from_description("R1 100\nL1 10m\nC1 100u").unwrap();
    let series = resonance(&normalize(&params), Topology::Series);
    assert_relative_eq!(series.f0, 159.155, max_relative = 1e-5);
    assert_relative_eq!(series.q, 0.1, max_relative = 1e-9);
    assert_relative_eq!(series.bandwidth, 1591.55, max_relative = 1e-5);

    let parallel = resonance(&normalize(&params), Topology::Parallel);
    assert_relative_eq!(parallel.q, 10.0, max_relative = 1e-9);
    assert_relative_eq!(series.q * parallel.q, 1.0, max_relative = 1e-12);
}

#[test]
fn test_overdamped_step_at_one_millisecond() {
    let params = CircuitParameters::new(100.0, 10e-3, 10e-6).with_signal(SignalType::Step);
    let eff = normalize(&params);
    let res = resonance(&eff, params.topology);
    let w = waveform(&eff, SignalType::Step, 2.0, params.source_frequency, &res);

    let y = w.output(1e-3);
    assert!(y.is_finite() && y > 0.0 && y < 2.0);

    let mut previous = w.output(0.0);
    assert_eq!(previous, 0.0);
    for i in 1..=200 {
        let next = w.output(i as f64 * 1e-4);
        assert!(next >= previous);
        previous = next;
    }
}

#[test]
fn test_impulse_zero_when_heavily_damped() {
    let eff = normalize(&CircuitParameters::new(1e3, 10e-3, 10e-6));
    let damping = Damping::new(&eff, &resonance(&eff, Topology::Series));
    assert!(damping.alpha >= damping.omega0);
    for t in [0.0, 1e-6, 1e-3, 1.0, 1e3] {
        assert_eq!(impulse_response(&damping, eff.inductance, t), 0.0);
    }
}

#[test]
fn test_step_endpoints_in_all_regimes() {
    for r in [5.0, 2.0 * (10e-3_f64 / 10e-6).sqrt(), 500.0] {
        let eff = normalize(&CircuitParameters::new(r, 10e-3, 10e-6));
        let damping = Damping::new(&eff, &resonance(&eff, Topology::Series));
        assert_eq!(step_response(&damping, 0.0).abs(), 0.0);
        assert_relative_eq!(step_response(&damping, 10.0), 1.0, epsilon = 1e-9);
    }
}

#[test]
fn test_gain_at_resonance_scenarios() {
    let q = 2.5;
    assert_relative_eq!(gain_db(1.0, q, FilterPreset::LowPass), 20.0 * q.log10(), epsilon = 1e-12);
    assert!(gain_db(1.0, q, FilterPreset::BandPass).abs() < 1e-12);
    assert_relative_eq!(gain_db(1.0, q, FilterPreset::Notch), -200.0, epsilon = 1e-9);
}

#[test]
fn test_unknown_names_fall_back_to_defaults() {
    let params = CircuitParameters::from_description(
        ".topology delta\n.preset comb\n.signal sawtooth\nR1 1\nL1 1m\nC1 1u",
    )
    .unwrap();
    assert_eq!(params.topology, Topology::Series);
    assert_eq!(params.active_preset, FilterPreset::LowPass);
    assert_eq!(params.signal_type, SignalType::Sine);
}

#[test]
fn test_description_errors() {
    assert!(matches!(
        CircuitParameters::from_description("R1 100\nC1 10u"),
        Err(RlcError::MissingComponent { kind: 'L' })
    ));
    assert!(matches!(
        CircuitParameters::from_description("R1 100\nR2 50\nL1 1m\nC1 1u"),
        Err(RlcError::DuplicateComponent { .. })
    ));
    assert!(matches!(
        CircuitParameters::from_description("R1 -100\nL1 1m\nC1 1u"),
        Err(RlcError::InvalidParameter { .. })
    ));
}

#[test]
fn test_snapshot_round_trip_through_text() {
    let params = CircuitParameters::from_description(REFERENCE).unwrap();
    let original = Snapshot::capture(&params);
    let restored = Snapshot::from_json(&original.to_json().unwrap()).unwrap().reanalyze();

    assert_eq!(restored.effective.resistance.to_bits(), original.effective.resistance.to_bits());
    assert_eq!(restored.effective.inductance.to_bits(), original.effective.inductance.to_bits());
    assert_eq!(restored.effective.capacitance.to_bits(), original.effective.capacitance.to_bits());
    assert_eq!(restored.resonance.f0.to_bits(), original.resonance.f0.to_bits());
    assert_eq!(restored.resonance.q.to_bits(), original.resonance.q.to_bits());
    assert_eq!(restored.resonance.bandwidth.to_bits(), original.resonance.bandwidth.to_bits());
}

#[test]
fn test_report_exports() {
    let params = CircuitParameters::from_description(REFERENCE).unwrap();
    let config = AnalysisConfig::new().with_sweep_points(11).with_waveform_points(21);
    let report = Analyzer::with_config(config).analyze(&params);

    let mut bode = Vec::new();
    write_bode_csv(&report.bode, &report.effective, params.topology, &mut bode).unwrap();
    assert_eq!(String::from_utf8(bode).unwrap().lines().count(), 12);

    let mut wave = Vec::new();
    write_waveform_csv(&report.waveform, &mut wave).unwrap();
    let text = String::from_utf8(wave).unwrap();
    assert_eq!(text.lines().count(), 22);
    assert!(text.lines().skip(1).all(|l| l.split(',').all(|v| v.parse::<f64>().is_ok())));
}

#[test]
fn test_degenerate_inputs_never_produce_nan() {
    for signal in [SignalType::Sine, SignalType::Square, SignalType::Step, SignalType::Impulse] {
        for topology in [Topology::Series, Topology::Parallel] {
            let params = CircuitParameters::new(0.0, 0.0, 0.0)
                .with_source(0.0, 1.0)
                .with_signal(signal)
                .with_topology(topology);
            let report = Analyzer::with_config(AnalysisConfig::new().with_waveform_points(64)).analyze(&params);
            assert!(report.resonance.f0.is_finite());
            assert!(report.resonance.q.is_finite());
            assert!(report.steady_state.gain_db.is_finite());
            assert!(report.bode.iter().all(|p| p.magnitude_db.is_finite() && p.phase_degrees.is_finite()));
            assert!(report.waveform.iter().all(|s| s.input.is_finite() && s.output.is_finite()));
            assert!(report.nyquist.points.iter().all(|p| p.imaginary.is_finite()));
        }
    }
}
