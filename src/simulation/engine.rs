//! High-level runtime engine settings
//!
//! Selects the integration scheme and the baseline tick rate the time
//! step is calibrated to.

use std::fmt;
use std::str::FromStr;

use crate::configuration::config::EngineConfig;
use crate::error::{invalid, ClothError, ClothResult};

/// Numerical integration scheme, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scheme {
    #[default]
    /// Position Verlet: `x' = 2x - x_prev + a dt^2`. Carries its velocity
    /// implicitly in the previous-position grid.
    Verlet,
    /// Semi-implicit Euler: `v' = v + a dt`, `x' = x + v' dt`.
    Euler,
}

impl Scheme {
    /// How strongly the energy regulator pulls toward its clamped target.
    /// Verlet already loses some energy per step so part of the raw energy
    /// is kept; Euler has no damping of its own.
    pub fn blend_weight(self) -> f64 {
        match self {
            Scheme::Verlet => 0.8,
            Scheme::Euler => 1.0,
        }
    }
}

impl FromStr for Scheme {
    type Err = ClothError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "verlet" | "position" => Ok(Scheme::Verlet),
            "euler" | "velocity" => Ok(Scheme::Euler),
            other => Err(invalid(format!("unknown integration scheme {other:?}"))),
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scheme::Verlet => write!(f, "verlet"),
            Scheme::Euler => write!(f, "euler"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Engine {
    pub scheme: Scheme, // verlet or euler
    pub baseline_rate: f64, // ticks per second one time unit corresponds to
}

impl Engine {
    pub fn from_config(cfg: &EngineConfig) -> ClothResult<Self> {
        let scheme = cfg.integrator.parse::<Scheme>()?;
        if !(cfg.baseline_rate.is_finite() && cfg.baseline_rate > 0.0) {
            return Err(invalid(format!(
                "baseline_rate must be positive and finite, got {}",
                cfg.baseline_rate
            )));
        }
        Ok(Self {
            scheme,
            baseline_rate: cfg.baseline_rate,
        })
    }
}
