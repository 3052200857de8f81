pub mod error;
pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use error::{ClothError, ClothResult};

pub use simulation::states::{NVec2, PointGrid, ClothState};
pub use simulation::engine::{Engine, Scheme};
pub use simulation::topology::{GridTopology, NEIGHBOR_OFFSETS};
pub use simulation::forces::{ForceSet, ForceTerm, UniformGravity, StructuralSprings};
pub use simulation::pinning::PinningPolicy;
pub use simulation::regulator::{EnergyRegulator, Regulation};
pub use simulation::clock::{TimeSource, SystemClock, FixedClock, ScriptedClock, TickClock};
pub use simulation::scenario::{Cloth, TickReport};

pub use configuration::config::{
    ClothConfig, GridConfig, EngineConfig, ParametersConfig, RegulatorConfig, PinningConfig, AnchorRowConfig,
};

pub use visualization::raster::{Rasterizer, RasterConfig, PixelRange, OccupancyBuffer};

pub use benchmark::benchmark::{bench_tick, bench_tick_curve};
