//! Point-occupancy rasterization.
//!
//! Maps each grid point into a fixed-size pixel buffer. The two position
//! components are scaled independently: component 1 (columns) by the grid
//! width into the column pixel range, component 0 (rows) by the grid height
//! into the row pixel range. Pixel coordinates are clamped to the buffer and
//! truncated, then a margin is cropped from every side.
//!
//! The defaults reproduce the cloth viewer's 804×804 frame cropped to
//! 800×800, with the cloth drawn near the bottom of the frame.

use serde::Deserialize;

use crate::error::{invalid, ClothResult};
use crate::simulation::states::PointGrid;

/// Linear pixel mapping `pixel = fraction * span + start`.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct PixelRange {
    pub start: f64,
    pub span: f64,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RasterConfig {
    pub rows: usize, // full buffer height before cropping
    pub cols: usize, // full buffer width before cropping
    pub row_range: PixelRange,
    pub col_range: PixelRange,
    pub margin: usize, // pixels cropped from each side
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            rows: 804,
            cols: 804,
            row_range: PixelRange { start: 690.0, span: 104.0 },
            col_range: PixelRange { start: 10.0, span: 784.0 },
            margin: 2,
        }
    }
}

/// Boolean pixel buffer, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct OccupancyBuffer {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl OccupancyBuffer {
    fn empty(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![false; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_set(&self, row: usize, col: usize) -> bool {
        self.cells[row * self.cols + col]
    }

    /// Number of occupied pixels.
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    pub fn cells(&self) -> &[bool] {
        &self.cells
    }
}

/// Projects a cloth of fixed grid dimensions into an [`OccupancyBuffer`].
#[derive(Debug, Clone, PartialEq)]
pub struct Rasterizer {
    config: RasterConfig,
    grid_height: f64,
    grid_width: f64,
}

impl Rasterizer {
    pub fn new(config: RasterConfig, grid_height: usize, grid_width: usize) -> ClothResult<Self> {
        if config.rows <= 2 * config.margin || config.cols <= 2 * config.margin {
            return Err(invalid(format!(
                "raster {}x{} is too small for a margin of {}",
                config.rows, config.cols, config.margin
            )));
        }
        let ranges = [config.row_range, config.col_range];
        if ranges.iter().any(|r| !(r.start.is_finite() && r.span.is_finite())) {
            return Err(invalid("raster pixel ranges must be finite"));
        }
        if grid_height == 0 || grid_width == 0 {
            return Err(invalid("raster needs a non-empty grid"));
        }
        Ok(Self {
            config,
            grid_height: grid_height as f64,
            grid_width: grid_width as f64,
        })
    }

    /// Size of the cropped output as `(rows, cols)`.
    pub fn output_size(&self) -> (usize, usize) {
        let m = 2 * self.config.margin;
        (self.config.rows - m, self.config.cols - m)
    }

    /// Pixel `(row, col)` in the uncropped buffer for a position.
    pub fn pixel_of(&self, row_coord: f64, col_coord: f64) -> (usize, usize) {
        let c = &self.config;
        let y = row_coord / self.grid_height * c.row_range.span + c.row_range.start;
        let x = col_coord / self.grid_width * c.col_range.span + c.col_range.start;
        (clamp_pixel(y, c.rows), clamp_pixel(x, c.cols))
    }

    pub fn rasterize(&self, grid: &PointGrid) -> OccupancyBuffer {
        let (rows, cols) = self.output_size();
        let m = self.config.margin;
        let mut buffer = OccupancyBuffer::empty(rows, cols);
        for p in grid.points() {
            let (y, x) = self.pixel_of(p[0], p[1]);
            // cropped away
            if y < m || x < m || y - m >= rows || x - m >= cols {
                continue;
            }
            buffer.cells[(y - m) * cols + (x - m)] = true;
        }
        buffer
    }
}

/// Clamp to `[0, len - 1]` and truncate. NaN lands on 0.
fn clamp_pixel(v: f64, len: usize) -> usize {
    let max = (len - 1) as f64;
    if v >= max {
        len - 1
    } else if v > 0.0 {
        v as usize
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::states::NVec2;

    #[test]
    fn default_frame_is_cropped_to_800() {
        let r = Rasterizer::new(RasterConfig::default(), 80, 160).unwrap();
        assert_eq!(r.output_size(), (800, 800));
    }

    #[test]
    fn origin_maps_to_range_start() {
        let r = Rasterizer::new(RasterConfig::default(), 80, 160).unwrap();
        assert_eq!(r.pixel_of(0.0, 0.0), (690, 10));
        // far corner of the lattice
        assert_eq!(r.pixel_of(80.0, 160.0), (794, 794));
    }

    #[test]
    fn out_of_range_positions_are_clamped() {
        let r = Rasterizer::new(RasterConfig::default(), 10, 10).unwrap();
        assert_eq!(r.pixel_of(-1e9, 1e9), (0, 803));
        assert_eq!(r.pixel_of(f64::NAN, 0.0).0, 0);
    }

    #[test]
    fn rasterize_marks_points_and_drops_margin() {
        let cfg = RasterConfig {
            rows: 10,
            cols: 10,
            row_range: PixelRange { start: 0.0, span: 10.0 },
            col_range: PixelRange { start: 0.0, span: 10.0 },
            margin: 1,
        };
        let r = Rasterizer::new(cfg, 1, 2).unwrap();
        // col coords 0.0 and 1.0 over a width of 2 -> pixels 0 and 5
        let grid = PointGrid::from_points(1, 2, vec![NVec2::new(0.5, 0.0), NVec2::new(0.5, 1.0)]);
        let buf = r.rasterize(&grid);
        assert_eq!((buf.rows(), buf.cols()), (8, 8));
        // pixel (5, 0) is in the cropped margin, pixel (5, 5) lands at (4, 4)
        assert_eq!(buf.occupied(), 1);
        assert!(buf.is_set(4, 4));
        assert_eq!(buf.cells().len(), 64);
        assert!(buf.cells()[4 * 8 + 4]);
    }

    #[test]
    fn margin_larger_than_buffer_is_rejected() {
        let cfg = RasterConfig { rows: 4, cols: 4, margin: 2, ..Default::default() };
        assert!(Rasterizer::new(cfg, 2, 2).is_err());
    }
}
