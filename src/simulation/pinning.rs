//! Anchor points whose net force is zeroed every tick.
//!
//! Anchors sit on the top row (row 0) and the bottom row (last row). Each row
//! pins every `stride`-th column, starting at column 0, within the leading
//! `span` fraction of the row.

use crate::configuration::config::{AnchorRowConfig, PinningConfig};
use crate::error::{invalid, ClothResult};
use crate::simulation::states::NVec2;
use crate::simulation::topology::GridTopology;

#[derive(Debug, Clone, PartialEq)]
pub struct PinningPolicy {
    indices: Vec<usize>,
}

impl PinningPolicy {
    pub fn from_config(cfg: &PinningConfig, topology: &GridTopology) -> ClothResult<Self> {
        let mut indices = Vec::new();
        if let Some(top) = &cfg.top {
            anchor_row(top, 0, topology, &mut indices)?;
        }
        if let Some(bottom) = &cfg.bottom {
            anchor_row(bottom, topology.height() - 1, topology, &mut indices)?;
        }
        indices.sort_unstable();
        indices.dedup();
        Ok(Self { indices })
    }

    /// Sorted flat indices of the anchored points.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn is_pinned(&self, index: usize) -> bool {
        self.indices.binary_search(&index).is_ok()
    }

    /// Zero the force on every anchor.
    pub fn apply(&self, force: &mut [NVec2]) {
        for &i in &self.indices {
            force[i] = NVec2::zeros();
        }
    }
}

fn anchor_row(
    row_cfg: &AnchorRowConfig,
    row: usize,
    topology: &GridTopology,
    out: &mut Vec<usize>,
) -> ClothResult<()> {
    if row_cfg.stride == 0 {
        return Err(invalid("pin stride must be at least 1"));
    }
    if !(0.0..=1.0).contains(&row_cfg.span) {
        return Err(invalid(format!("pin span must be in [0, 1], got {}", row_cfg.span)));
    }
    let extent = (topology.width() as f64 * row_cfg.span).floor() as usize;
    let extent = extent.min(topology.width());
    out.extend((0..extent).step_by(row_cfg.stride).map(|col| row * topology.width() + col));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::config::GridConfig;

    fn topology(height: i64, width: i64) -> GridTopology {
        GridTopology::from_config(&GridConfig { height, width, spacing: 1.0 }).unwrap()
    }

    #[test]
    fn default_rows_match_stride_and_span() {
        let t = topology(4, 20);
        let policy = PinningPolicy::from_config(&PinningConfig::default(), &t).unwrap();
        // top: columns 0, 9, 18; bottom: first 10 columns -> 0, 9
        assert_eq!(policy.indices(), &[0, 9, 18, 60, 69]);
    }

    #[test]
    fn apply_zeroes_only_anchors() {
        let t = topology(2, 3);
        let cfg = PinningConfig {
            top: Some(AnchorRowConfig { stride: 2, span: 1.0 }),
            bottom: None,
        };
        let policy = PinningPolicy::from_config(&cfg, &t).unwrap();
        let mut force = vec![NVec2::new(1.0, 1.0); 6];
        policy.apply(&mut force);
        assert_eq!(force[0], NVec2::zeros());
        assert_eq!(force[2], NVec2::zeros());
        assert_eq!(force[1], NVec2::new(1.0, 1.0));
        assert!(policy.is_pinned(2) && !policy.is_pinned(1));
        assert!(force[3..].iter().all(|f| *f == NVec2::new(1.0, 1.0)));
    }

    #[test]
    fn single_row_grid_deduplicates() {
        let t = topology(1, 5);
        let policy = PinningPolicy::from_config(&PinningConfig::default(), &t).unwrap();
        assert_eq!(policy.indices(), &[0]);
    }

    #[test]
    fn zero_stride_is_rejected() {
        let t = topology(2, 2);
        let cfg = PinningConfig {
            top: Some(AnchorRowConfig { stride: 0, span: 1.0 }),
            bottom: None,
        };
        assert!(PinningPolicy::from_config(&cfg, &t).is_err());
    }
}
