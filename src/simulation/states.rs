//! Core state types for the cloth simulation.
//!
//! - `PointGrid`  – a row-major `height × width` grid of `NVec2`
//! - `ClothState` – current positions plus the auxiliary grids the two
//!   integration schemes need (previous positions, velocities)
//!
//! Component 0 of every vector is the row (vertical) axis, component 1 the
//! column axis. Gravity acts along component 0.

use std::ops::{Index, IndexMut};

use nalgebra::Vector2;
pub type NVec2 = Vector2<f64>;

/// Row-major grid of 2D vectors with fixed dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct PointGrid {
    height: usize,
    width: usize,
    points: Vec<NVec2>,
}

impl PointGrid {
    /// Grid with every cell set to `value`.
    pub fn filled(height: usize, width: usize, value: NVec2) -> Self {
        Self {
            height,
            width,
            points: vec![value; height * width],
        }
    }

    /// All-zero grid.
    pub fn zeros(height: usize, width: usize) -> Self {
        Self::filled(height, width, NVec2::zeros())
    }

    /// Wrap an existing buffer. Panics if the length does not match the shape.
    pub fn from_points(height: usize, width: usize, points: Vec<NVec2>) -> Self {
        assert_eq!(points.len(), height * width, "point buffer does not match {height}x{width}");
        Self { height, width, points }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Flat index of `(row, col)`.
    pub fn index_of(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    pub fn points(&self) -> &[NVec2] {
        &self.points
    }

    pub fn points_mut(&mut self) -> &mut [NVec2] {
        &mut self.points
    }

    /// Replace the contents with a buffer of the same length.
    pub fn replace_points(&mut self, points: Vec<NVec2>) {
        assert_eq!(points.len(), self.points.len(), "grid shape changed during a tick");
        self.points = points;
    }

    pub fn same_shape(&self, other: &PointGrid) -> bool {
        self.height == other.height && self.width == other.width
    }
}

impl Index<(usize, usize)> for PointGrid {
    type Output = NVec2;

    fn index(&self, (row, col): (usize, usize)) -> &NVec2 {
        &self.points[row * self.width + col]
    }
}

impl IndexMut<(usize, usize)> for PointGrid {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut NVec2 {
        &mut self.points[row * self.width + col]
    }
}

/// Everything that moves during a tick.
#[derive(Debug, Clone, PartialEq)]
pub struct ClothState {
    pub pos: PointGrid,      // current positions
    pub prev_pos: PointGrid, // positions one tick ago (position-based scheme)
    pub velocity: PointGrid, // per-point velocity (velocity-based scheme)
}

impl ClothState {
    /// State at rest on `lattice`: previous positions equal the lattice and
    /// velocities are zero.
    pub fn at_rest(lattice: PointGrid) -> Self {
        let velocity = PointGrid::zeros(lattice.height(), lattice.width());
        Self {
            prev_pos: lattice.clone(),
            pos: lattice,
            velocity,
        }
    }

    /// Panics if the three grids ever disagree in shape.
    pub fn assert_consistent(&self) {
        assert!(
            self.pos.same_shape(&self.prev_pos) && self.pos.same_shape(&self.velocity),
            "cloth grids out of sync: pos {}x{}, prev {}x{}, velocity {}x{}",
            self.pos.height(),
            self.pos.width(),
            self.prev_pos.height(),
            self.prev_pos.width(),
            self.velocity.height(),
            self.velocity.width(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexing_is_row_major() {
        let mut grid = PointGrid::zeros(2, 3);
        grid[(1, 2)] = NVec2::new(4.0, 5.0);
        assert_eq!(grid.index_of(1, 2), 5);
        assert_eq!(grid.points()[5], NVec2::new(4.0, 5.0));
    }

    #[test]
    fn at_rest_mirrors_lattice() {
        let lattice = PointGrid::filled(2, 2, NVec2::new(1.0, 2.0));
        let state = ClothState::at_rest(lattice.clone());
        assert_eq!(state.pos, lattice);
        assert_eq!(state.prev_pos, lattice);
        assert!(state.velocity.points().iter().all(|v| *v == NVec2::zeros()));
        state.assert_consistent();
    }

    #[test]
    #[should_panic]
    fn mismatched_buffer_panics() {
        PointGrid::from_points(2, 2, vec![NVec2::zeros(); 3]);
    }
}
