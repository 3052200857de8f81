//! Grid dimensions, rest lattice and structural-spring neighbor offsets.

use crate::configuration::config::GridConfig;
use crate::error::{invalid, ClothResult};
use crate::simulation::states::{NVec2, PointGrid};

/// Structural neighbors as `(row, col)` offsets. Both senses of each axis are
/// listed so every spring acts on both of its endpoints.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

#[derive(Debug, Clone, PartialEq)]
pub struct GridTopology {
    height: usize,
    width: usize,
    spacing: f64,
}

impl GridTopology {
    pub fn from_config(cfg: &GridConfig) -> ClothResult<Self> {
        if cfg.height <= 0 || cfg.width <= 0 {
            return Err(invalid(format!(
                "grid dimensions must be positive, got {}x{}",
                cfg.height, cfg.width
            )));
        }
        if !cfg.spacing.is_finite() {
            return Err(invalid(format!("spacing must be finite, got {}", cfg.spacing)));
        }
        Ok(Self {
            height: cfg.height as usize,
            width: cfg.width as usize,
            spacing: cfg.spacing,
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    pub fn point_count(&self) -> usize {
        self.height * self.width
    }

    /// Flat index of the neighbor of `(row, col)` at `offset`, if it lies
    /// inside the grid.
    pub fn neighbor(&self, row: usize, col: usize, (dr, dc): (isize, isize)) -> Option<usize> {
        let r = row.checked_add_signed(dr)?;
        let c = col.checked_add_signed(dc)?;
        (r < self.height && c < self.width).then(|| r * self.width + c)
    }

    /// Regular lattice: point `(r, c)` rests at `(r * spacing, c * spacing)`.
    pub fn rest_lattice(&self) -> PointGrid {
        let mut grid = PointGrid::zeros(self.height, self.width);
        for row in 0..self.height {
            for col in 0..self.width {
                grid[(row, col)] = NVec2::new(row as f64 * self.spacing, col as f64 * self.spacing);
            }
        }
        grid
    }
}
