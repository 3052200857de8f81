//! Energy regulator
//!
//! A feedback controller that keeps the visible motion of the cloth inside a
//! slowly decaying energy band. Each tick it measures the energy of the raw
//! displacement proposed by the integrator, compares it with a smoothed
//! running estimate, and rescales every displacement by one uniform factor.
//!
//! The scale is computed once for the whole grid and then reapplied along each
//! point's own direction; there is no per-point energy budget.

use super::states::NVec2;

/// Guards the rescale against a zero raw energy.
pub const ENERGY_EPSILON: f64 = 1e-6;

/// Lower bound on the norm used when normalizing a displacement, so that a
/// zero displacement normalizes to zero.
const NORMALIZE_FLOOR: f64 = 1e-12;

/// Outcome of one regulation step.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Regulation {
    pub raw_energy: f64, // sum of squared raw displacements
    pub target: f64, // blended target energy
    pub scale: f64, // factor applied to every displacement magnitude
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnergyRegulator {
    estimate: f64,
    alpha: f64,
    decay: f64,
}

impl EnergyRegulator {
    pub fn new(init_energy: f64, alpha: f64, decay: f64) -> Self {
        Self {
            estimate: init_energy,
            alpha,
            decay,
        }
    }

    /// Current smoothed energy estimate.
    pub fn estimate(&self) -> f64 {
        self.estimate
    }

    /// Rescale `candidate` in place so its displacement from `current`
    /// tracks the running estimate, then update the estimate.
    ///
    /// `blend` is the integration scheme's weight on the clamped target
    /// (see [`super::engine::Scheme::blend_weight`]).
    pub fn regulate(&mut self, current: &[NVec2], candidate: &mut [NVec2], blend: f64) -> Regulation {
        assert_eq!(current.len(), candidate.len(), "candidate grid does not match current grid");

        let magnitudes: Vec<f64> = current
            .iter()
            .zip(candidate.iter())
            .map(|(x, x_new)| (x_new - x).norm())
            .collect();
        let raw_energy: f64 = magnitudes.iter().map(|m| m * m).sum();

        // Never release more than the running estimate, and bleed it slowly
        let clamped = raw_energy.min(self.estimate) * self.decay;
        let target = clamped * blend + raw_energy * (1.0 - blend);
        let scale = target / (raw_energy + ENERGY_EPSILON);

        for ((x, x_new), m) in current.iter().zip(candidate.iter_mut()).zip(&magnitudes) {
            let delta = *x_new - x;
            let dir = delta / delta.norm().max(NORMALIZE_FLOOR);
            *x_new = x + dir * (m * scale);
        }

        self.estimate = self.estimate * (1.0 - self.alpha) + target * self.alpha;

        Regulation {
            raw_energy,
            target,
            scale,
        }
    }
}
