//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds the validated runtime settings:
//! - point mass, gravity magnitude and spring stiffness,
//! - energy regulator gain, decay and starting estimate

use crate::configuration::config::{ParametersConfig, RegulatorConfig};
use crate::error::{invalid, ClothResult};

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub mass: f64, // point mass
    pub gravity: f64, // gravity magnitude
    pub stiffness: f64, // spring constant
    pub alpha: f64, // estimate gain
    pub decay: f64, // target decay
    pub init_energy: f64, // starting estimate
}

impl Parameters {
    pub fn from_config(p: &ParametersConfig, r: &RegulatorConfig) -> ClothResult<Self> {
        if !(p.mass.is_finite() && p.mass > 0.0) {
            return Err(invalid(format!("mass must be positive and finite, got {}", p.mass)));
        }
        if !p.gravity.is_finite() {
            return Err(invalid(format!("gravity must be finite, got {}", p.gravity)));
        }
        if !p.stiffness.is_finite() {
            return Err(invalid(format!("stiffness must be finite, got {}", p.stiffness)));
        }
        if !(0.0..=1.0).contains(&r.alpha) {
            return Err(invalid(format!("alpha must be in [0, 1], got {}", r.alpha)));
        }
        if !(r.decay.is_finite() && r.decay >= 0.0) {
            return Err(invalid(format!("decay must be non-negative and finite, got {}", r.decay)));
        }
        if !(r.init_energy.is_finite() && r.init_energy >= 0.0) {
            return Err(invalid(format!(
                "init_energy must be non-negative and finite, got {}",
                r.init_energy
            )));
        }

        Ok(Self {
            mass: p.mass,
            gravity: p.gravity,
            stiffness: p.stiffness,
            alpha: r.alpha,
            decay: r.decay,
            init_energy: r.init_energy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClothError;

    #[test]
    fn rejects_non_positive_mass() {
        for mass in [0.0, -1.0, f64::NAN] {
            let p = ParametersConfig { mass, ..Default::default() };
            let err = Parameters::from_config(&p, &RegulatorConfig::default()).unwrap_err();
            assert!(matches!(err, ClothError::InvalidConfiguration(_)));
        }
    }

    #[test]
    fn rejects_alpha_outside_unit_interval() {
        let r = RegulatorConfig { alpha: 1.5, ..Default::default() };
        assert!(Parameters::from_config(&ParametersConfig::default(), &r).is_err());
    }

    #[test]
    fn defaults_are_valid() {
        let p = Parameters::from_config(&ParametersConfig::default(), &RegulatorConfig::default()).unwrap();
        assert_eq!(p.mass, 30.0);
        assert_eq!(p.init_energy, 1000.0);
    }
}
