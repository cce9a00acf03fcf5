//! Structured JSON snapshot of one parameter set and its derived figures.

use serde::{Deserialize, Serialize};

use crate::analysis::{resonance, steady_state, ResonanceResult, SteadyStateResult};
use crate::circuit::{normalize, CircuitParameters, EffectiveParameters};
use crate::error::{Result, RlcError};

/// Format version written into every snapshot.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Parameter snapshot plus the results derived from it.
///
/// Floats are written with enough digits to read back bit-identical, so
/// re-ingesting a snapshot reproduces the same effective parameters and
/// resonance figures. Non-finite values cannot be represented in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub parameters: CircuitParameters,
    pub effective: EffectiveParameters,
    pub resonance: ResonanceResult,
    pub steady_state: SteadyStateResult,
}

impl Snapshot {
    /// Run the steady-state part of the pipeline and record it.
    pub fn capture(params: &CircuitParameters) -> Self {
        let effective = normalize(params);
        let resonance = resonance(&effective, params.topology);
        let steady_state = steady_state(
            &effective,
            params.topology,
            &resonance,
            params.source_frequency,
            params.active_preset,
        );
        Self {
            version: SNAPSHOT_VERSION,
            parameters: *params,
            effective,
            resonance,
            steady_state,
        }
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a snapshot. Newer format versions are rejected.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        if snapshot.version > SNAPSHOT_VERSION {
            return Err(RlcError::invalid_parameter(
                "version",
                format!(
                    "snapshot format {} is newer than supported format {}",
                    snapshot.version, SNAPSHOT_VERSION
                ),
            ));
        }
        Ok(snapshot)
    }

    /// Recompute the derived figures from the stored parameters.
    ///
    /// Logs a warning if they differ from the stored ones.
    pub fn reanalyze(&self) -> Self {
        let fresh = Self::capture(&self.parameters);
        if fresh.effective != self.effective || fresh.resonance != self.resonance {
            log::warn!("snapshot results differ from a fresh analysis of its parameters");
        }
        fresh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{FilterPreset, Parasitics, SignalType, Topology};

    fn bits_eff(e: &EffectiveParameters) -> [u64; 3] {
        [e.resistance.to_bits(), e.inductance.to_bits(), e.capacitance.to_bits()]
    }

    fn bits_res(r: &ResonanceResult) -> [u64; 3] {
        [r.f0.to_bits(), r.q.to_bits(), r.bandwidth.to_bits()]
    }

    #[test]
    fn test_round_trip_is_bit_identical() {
        let cases = [
            CircuitParameters::new(100.0, 10e-3, 10e-6),
            CircuitParameters::new(0.1, 3.3e-7, 4.7e-11)
                .with_topology(Topology::Parallel)
                .with_preset(FilterPreset::Notch),
            CircuitParameters::new(1.0 / 3.0, 0.1 + 0.2, 1e-12 * 7.0)
                .with_parasitics(Parasitics::new(0.07, 1.1e-9, 0.013))
                .with_signal(SignalType::Impulse)
                .with_source(1234.5678, 0.333),
        ];

        for params in cases {
            let original = Snapshot::capture(&params);
            let json = original.to_json().unwrap();
            let restored = Snapshot::from_json(&json).unwrap();

            assert_eq!(restored, original);
            assert_eq!(bits_eff(&restored.effective), bits_eff(&original.effective));
            assert_eq!(bits_res(&restored.resonance), bits_res(&original.resonance));

            let fresh = restored.reanalyze();
            assert_eq!(bits_eff(&fresh.effective), bits_eff(&original.effective));
            assert_eq!(bits_res(&fresh.resonance), bits_res(&original.resonance));
        }
    }

    #[test]
    fn test_json_uses_lowercase_names() {
        let params = CircuitParameters::default().with_preset(FilterPreset::HighPass);
        let json = Snapshot::capture(&params).to_json().unwrap();
        assert!(json.contains("\"topology\": \"series\""));
        assert!(json.contains("\"active_preset\": \"highpass\""));
        assert!(json.contains("\"version\": 1"));
    }

    #[test]
    fn test_unknown_names_fall_back() {
        let mut value: serde_json::Value =
            serde_json::from_str(&Snapshot::capture(&CircuitParameters::default()).to_json().unwrap()).unwrap();
        value["parameters"]["topology"] = "delta".into();
        value["parameters"]["active_preset"] = "comb".into();
        let snapshot = Snapshot::from_json(&value.to_string()).unwrap();
        assert_eq!(snapshot.parameters.topology, Topology::Series);
        assert_eq!(snapshot.parameters.active_preset, FilterPreset::LowPass);
    }

    #[test]
    fn test_rejects_newer_version() {
        let mut snapshot = Snapshot::capture(&CircuitParameters::default());
        snapshot.version = SNAPSHOT_VERSION + 1;
        let json = snapshot.to_json().unwrap();
        assert!(matches!(Snapshot::from_json(&json), Err(RlcError::InvalidParameter { .. })));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(Snapshot::from_json("{ not json"), Err(RlcError::SnapshotError(_))));
    }
}
