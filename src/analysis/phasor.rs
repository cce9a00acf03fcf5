//! Rotating phasor state of the series loop.
//!
//! The caller's render loop decides when to call [`phasor_state`]; the
//! engine just evaluates the phasors at the instant it is given.

use num_complex::Complex64;
use serde::Serialize;

use super::angular_frequency;
use super::resonance::clamp_frequency;
use crate::circuit::EffectiveParameters;

/// A phasor in polar form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Phasor {
    /// Peak magnitude (V or A)
    pub magnitude: f64,
    /// Angle (degrees, in (−180, 180])
    pub angle_degrees: f64,
}

impl Phasor {
    /// Convert from rectangular form.
    pub fn from_complex(z: Complex64) -> Self {
        Self {
            magnitude: z.norm(),
            angle_degrees: z.arg().to_degrees(),
        }
    }

    /// Convert to rectangular form.
    pub fn to_complex(&self) -> Complex64 {
        Complex64::from_polar(self.magnitude, self.angle_degrees.to_radians())
    }

    /// Instantaneous value, the projection on the real axis.
    pub fn instantaneous(&self) -> f64 {
        self.to_complex().re
    }
}

/// Source, current and element phasors at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhasorState {
    /// Source voltage V
    pub voltage: Phasor,
    /// Loop current I
    pub current: Phasor,
    /// Resistor voltage VR, in phase with I
    pub resistor: Phasor,
    /// Inductor voltage VL, leading I by 90°
    pub inductor: Phasor,
    /// Capacitor voltage VC, lagging I by 90°
    pub capacitor: Phasor,
}

/// Evaluate the phasors at time `t` for a source of `amplitude` volts at
/// `frequency` hertz. All phasors rotate together by ωt.
///
/// The loop is treated as series, matching the time-domain divider, so
/// `V = VR + VL + VC` holds exactly in complex form.
pub fn phasor_state(
    t: f64,
    effective: &EffectiveParameters,
    frequency: f64,
    amplitude: f64,
) -> PhasorState {
    let omega = angular_frequency(clamp_frequency(frequency));
    let theta = if t.is_finite() { (omega * t) % std::f64::consts::TAU } else { 0.0 };
    let amplitude = if amplitude.is_finite() { amplitude } else { 0.0 };

    let z_r = Complex64::new(effective.resistance, 0.0);
    let z_l = Complex64::new(0.0, omega * effective.inductance);
    let z_c = Complex64::new(0.0, -1.0 / (omega * effective.capacitance));

    let v = Complex64::from_polar(amplitude, theta);
    let i = v / (z_r + z_l + z_c);

    PhasorState {
        voltage: Phasor::from_complex(v),
        current: Phasor::from_complex(i),
        resistor: Phasor::from_complex(i * z_r),
        inductor: Phasor::from_complex(i * z_l),
        capacitor: Phasor::from_complex(i * z_c),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn eff() -> EffectiveParameters {
        EffectiveParameters::new(100.0, 10e-3, 10e-6)
    }

    #[test]
    fn test_kirchhoff_voltage_law() {
        for t in [0.0, 1.3e-4, 7.7e-3] {
            let s = phasor_state(t, &eff(), 800.0, 5.0);
            let sum = s.resistor.to_complex() + s.inductor.to_complex() + s.capacitor.to_complex();
            let v = s.voltage.to_complex();
            assert_relative_eq!(sum.re, v.re, epsilon = 1e-9);
            assert_relative_eq!(sum.im, v.im, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_element_angles_relative_to_current() {
        let s = phasor_state(2e-4, &eff(), 300.0, 1.0);
        let wrap = |d: f64| (d + 540.0) % 360.0 - 180.0;
        assert!(wrap(s.resistor.angle_degrees - s.current.angle_degrees).abs() < 1e-9);
        assert_relative_eq!(wrap(s.inductor.angle_degrees - s.current.angle_degrees), 90.0, epsilon = 1e-9);
        assert_relative_eq!(wrap(s.capacitor.angle_degrees - s.current.angle_degrees), -90.0, epsilon = 1e-9);
    }

    #[test]
    fn test_phasors_rotate_with_time() {
        let f = 250.0;
        let quarter = 0.25 / f;
        let a = phasor_state(0.0, &eff(), f, 1.0);
        let b = phasor_state(quarter, &eff(), f, 1.0);
        assert_relative_eq!(a.voltage.angle_degrees, 0.0, epsilon = 1e-12);
        assert_relative_eq!(b.voltage.angle_degrees, 90.0, epsilon = 1e-9);
        assert_relative_eq!(a.current.magnitude, b.current.magnitude, max_relative = 1e-12);
    }

    #[test]
    fn test_current_at_resonance_is_v_over_r() {
        let e = eff();
        let f0 = 1.0 / (std::f64::consts::TAU * (e.inductance * e.capacitance).sqrt());
        let s = phasor_state(0.0, &e, f0, 2.0);
        assert_relative_eq!(s.current.magnitude, 0.02, max_relative = 1e-9);
        assert_relative_eq!(s.inductor.magnitude, s.capacitor.magnitude, max_relative = 1e-9);
    }

    #[test]
    fn test_instantaneous_projection() {
        let s = phasor_state(1e-3, &eff(), 100.0, 3.0);
        let expected = 3.0 * (std::f64::consts::TAU * 100.0 * 1e-3).cos();
        assert_relative_eq!(s.voltage.instantaneous(), expected, epsilon = 1e-12);
    }
}
