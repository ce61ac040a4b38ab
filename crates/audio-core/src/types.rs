//! Shared audio types

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

/// Realized parameters of one tone, as recorded in the call log
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ToneParameters {
    /// Fraction of full scale, 0.0..=1.0
    pub amplitude: f32,
    /// Angular frequency in radians per sample
    pub frequency: f32,
    /// Phase in radians
    pub phase: f32,
}

/// Wrap a finite phase into (-π, π]
pub fn wrap_phase(phase: f32) -> f32 {
    let mut wrapped = (phase + PI).rem_euclid(2.0 * PI) - PI;
    if wrapped <= -PI {
        wrapped += 2.0 * PI;
    }
    wrapped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_phase() {
        assert!((wrap_phase(0.5) - 0.5).abs() < 1e-6);
        assert!((wrap_phase(1.5 * PI) + 0.5 * PI).abs() < 1e-5);
        assert!((wrap_phase(-PI) - PI).abs() < 1e-5);
        assert!((wrap_phase(2.0 * PI + 0.25) - 0.25).abs() < 1e-5);
        for &p in &[-100.0f32, -7.0, 7.0, 1000.0] {
            let w = wrap_phase(p);
            assert!(w > -PI && w <= PI, "{} wrapped to {}", p, w);
        }
    }

    #[test]
    fn test_serialized_names() {
        let tone = ToneParameters {
            amplitude: 0.5,
            frequency: 1.0,
            phase: 0.0,
        };
        let json = serde_json::to_string(&tone).unwrap();
        assert_eq!(json, r#"{"Amplitude":0.5,"Frequency":1.0,"Phase":0.0}"#);
    }
}
