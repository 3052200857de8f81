//! Configuration types for loading cloth scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! cloth scenario. A scenario consists of:
//!
//! - [`GridConfig`]       – lattice dimensions and rest spacing
//! - [`EngineConfig`]     – integration scheme and tick baseline rate
//! - [`ParametersConfig`] – point mass, gravity and spring stiffness
//! - [`RegulatorConfig`]  – energy regulator gain, decay and starting estimate
//! - [`PinningConfig`]    – which points of the top/bottom rows are anchored
//! - [`RasterConfig`]     – optional occupancy-buffer projection
//! - [`ClothConfig`]      – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! Every section is optional and falls back to its `Default`:
//!
//! ```yaml
//! grid:
//!   height: 80
//!   width: 160
//!   spacing: 1.0
//!
//! engine:
//!   integrator: "verlet"     # or "euler"
//!   baseline_rate: 150.0     # ticks per second the step size is calibrated to
//!
//! parameters:
//!   mass: 30.0
//!   gravity: 0.01
//!   stiffness: 4.0
//!
//! regulator:
//!   alpha: 0.003
//!   decay: 0.99997
//!   init_energy: 1000.0
//!
//! pinning:
//!   top:    { stride: 9, span: 1.0 }
//!   bottom: { stride: 9, span: 0.5 }
//! ```
//!
//! The simulation maps this configuration into its validated runtime
//! representation in [`crate::simulation::scenario::Cloth::build`].

use serde::Deserialize;

use crate::visualization::raster::RasterConfig;

/// Lattice shape. Signed so that non-positive sizes can be reported
/// instead of failing inside the YAML parser.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GridConfig {
    pub height: i64,  // number of rows
    pub width: i64,   // number of columns
    pub spacing: f64, // rest distance between neighbors on both axes
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            height: 80,
            width: 160,
            spacing: 1.0,
        }
    }
}

/// Engine-level settings.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Integration scheme selector: `"verlet"`/`"position"` or `"euler"`/`"velocity"`.
    /// Kept as text so an unknown selector is a configuration error, not a parse error.
    pub integrator: String,
    /// Tick rate the step size is calibrated to. One tick at this rate advances
    /// the simulation by one time unit.
    pub baseline_rate: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            integrator: "verlet".to_string(),
            baseline_rate: 150.0,
        }
    }
}

/// Physical parameters shared by every point.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ParametersConfig {
    pub mass: f64,      // point mass, must be positive
    pub gravity: f64,   // gravity magnitude along the row axis
    pub stiffness: f64, // linear spring constant
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            mass: 30.0,
            gravity: 0.01,
            stiffness: 4.0,
        }
    }
}

/// Energy regulator tuning.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RegulatorConfig {
    pub alpha: f64,       // gain of the running estimate, in [0, 1]
    pub decay: f64,       // multiplicative decay applied to the clamped target
    pub init_energy: f64, // starting energy estimate
}

impl Default for RegulatorConfig {
    fn default() -> Self {
        Self {
            alpha: 0.003,
            decay: 0.99997,
            init_energy: 1000.0,
        }
    }
}

/// One anchored row: every `stride`-th column within the leading `span`
/// fraction of the row is pinned.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct AnchorRowConfig {
    pub stride: usize,
    #[serde(default = "full_span")]
    pub span: f64,
}

fn full_span() -> f64 {
    1.0
}

/// Anchors on the top row (row 0) and bottom row (last row).
/// An omitted row keeps its default; `~` disables it.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PinningConfig {
    pub top: Option<AnchorRowConfig>,
    pub bottom: Option<AnchorRowConfig>,
}

impl PinningConfig {
    /// No anchors at all.
    pub fn none() -> Self {
        Self { top: None, bottom: None }
    }
}

impl Default for PinningConfig {
    fn default() -> Self {
        Self {
            top: Some(AnchorRowConfig { stride: 9, span: 1.0 }),
            bottom: Some(AnchorRowConfig { stride: 9, span: 0.5 }),
        }
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ClothConfig {
    pub grid: GridConfig,
    pub engine: EngineConfig,
    pub parameters: ParametersConfig,
    pub regulator: RegulatorConfig,
    pub pinning: PinningConfig,
    pub raster: Option<RasterConfig>,
}

impl ClothConfig {
    /// Parse a scenario from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }
}
