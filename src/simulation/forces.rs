//! Force contributors for the cloth grid
//!
//! Defines the force-term trait, the set that sums terms into one force per
//! point, and the two terms the cloth uses: uniform gravity and linear
//! structural springs

use crate::simulation::states::{NVec2, PointGrid};
use crate::simulation::topology::{GridTopology, NEIGHBOR_OFFSETS};

/// Collection of force terms (gravity, springs, ...)
/// Each term implements [`ForceTerm`] and their contributions are summed
/// into a single force vector per point
pub struct ForceSet {
    terms: Vec<Box<dyn ForceTerm + Send + Sync>>,
}

impl ForceSet {
    /// Create an empty force set
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Add a force term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: ForceTerm + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Compute the net force on every point of `grid`
    /// - `out[i]` will be set to the sum of contributions from all terms
    pub fn accumulate(&self, grid: &PointGrid, out: &mut [NVec2]) {
        assert_eq!(out.len(), grid.len(), "force buffer does not match grid");
        // Zero buffer
        for f in out.iter_mut() {
            *f = NVec2::zeros();
        }
        for term in &self.terms {
            term.force(grid, out);
        }
    }
}

impl Default for ForceSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for force sources operating on a [`PointGrid`]
/// Implementations add their contribution into `out[i]` for each point
pub trait ForceTerm {
    fn force(&self, grid: &PointGrid, out: &mut [NVec2]);
}

/// Constant weight `-gravity * mass` along the row axis on every point
pub struct UniformGravity {
    pub gravity: f64,
    pub mass: f64,
}

impl ForceTerm for UniformGravity {
    fn force(&self, _grid: &PointGrid, out: &mut [NVec2]) {
        let weight = NVec2::new(-self.gravity * self.mass, 0.0);
        for f in out.iter_mut() {
            *f += weight;
        }
    }
}

/// Zero-rest-length linear springs between axis-adjacent points
///
/// For every point `p` and every neighbor `q` inside the grid this adds
/// `-(p - q) * stiffness`. Not normalized by distance; edge and corner points
/// simply see fewer neighbors
pub struct StructuralSprings {
    pub topology: GridTopology,
    pub stiffness: f64,
}

impl ForceTerm for StructuralSprings {
    fn force(&self, grid: &PointGrid, out: &mut [NVec2]) {
        if self.stiffness == 0.0 {
            return;
        }
        let points = grid.points();
        for &offset in NEIGHBOR_OFFSETS.iter() {
            for row in 0..grid.height() {
                for col in 0..grid.width() {
                    let Some(j) = self.topology.neighbor(row, col, offset) else {
                        continue;
                    };
                    let i = grid.index_of(row, col);
                    let diff = points[i] - points[j];
                    out[i] += -diff * self.stiffness;
                }
            }
        }
    }
}
