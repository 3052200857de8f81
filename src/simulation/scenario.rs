//! Build a fully-initialized cloth simulation from configuration
//!
//! Takes a `ClothConfig` (YAML-facing) and produces the runtime bundle
//! [`Cloth`] containing:
//! - engine settings (`Engine`)
//! - validated parameters (`Parameters`)
//! - grid topology, current state and rest lattice
//! - active force set (`ForceSet`), anchors (`PinningPolicy`)
//! - the energy regulator and the tick clock
//!
//! Each call to [`Cloth::tick`] advances the whole grid by exactly one step:
//! clock -> forces -> pinning -> integrator candidate -> regulator -> commit

use tracing::{debug, info, trace};

use crate::configuration::config::ClothConfig;
use crate::error::ClothResult;
use crate::simulation::clock::{SystemClock, TickClock, TimeSource};
use crate::simulation::engine::{Engine, Scheme};
use crate::simulation::forces::{ForceSet, StructuralSprings, UniformGravity};
use crate::simulation::integrator;
use crate::simulation::params::Parameters;
use crate::simulation::pinning::PinningPolicy;
use crate::simulation::regulator::EnergyRegulator;
use crate::simulation::states::{ClothState, NVec2, PointGrid};
use crate::simulation::topology::GridTopology;
use crate::visualization::raster::{OccupancyBuffer, Rasterizer};

/// Diagnostics for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickReport {
    pub tick: u64, // 1-based tick number since construction or reset
    pub dt: f64, // scaled step used
    pub raw_energy: f64, // energy of the integrator's proposal
    pub target: f64, // energy the regulator aimed for
    pub scale: f64, // uniform displacement scale
    pub estimate: f64, // running estimate after the update
}

/// A single cloth simulation instance. Owns every grid exclusively; ticks
/// must be applied one after another.
pub struct Cloth {
    engine: Engine,
    configured_scheme: Scheme,
    parameters: Parameters,
    topology: GridTopology,
    lattice: PointGrid,
    state: ClothState,
    forces: ForceSet,
    pinning: PinningPolicy,
    regulator: EnergyRegulator,
    clock: TickClock,
    rasterizer: Rasterizer,
    force_buf: Vec<NVec2>,
    ticks: u64,
    last_report: Option<TickReport>,
}

impl Cloth {
    /// Build a cloth driven by the wall clock.
    pub fn build(cfg: &ClothConfig) -> ClothResult<Self> {
        Self::with_clock(cfg, Box::new(SystemClock::new()))
    }

    /// Build a cloth driven by an arbitrary time source.
    pub fn with_clock(cfg: &ClothConfig, source: Box<dyn TimeSource + Send>) -> ClothResult<Self> {
        // Validate everything before allocating any grid
        let topology = GridTopology::from_config(&cfg.grid)?;
        let engine = Engine::from_config(&cfg.engine)?;
        let parameters = Parameters::from_config(&cfg.parameters, &cfg.regulator)?;
        let pinning = PinningPolicy::from_config(&cfg.pinning, &topology)?;
        let rasterizer = Rasterizer::new(
            cfg.raster.clone().unwrap_or_default(),
            topology.height(),
            topology.width(),
        )?;

        let forces = ForceSet::new()
            .with(UniformGravity {
                gravity: parameters.gravity,
                mass: parameters.mass,
            })
            .with(StructuralSprings {
                topology: topology.clone(),
                stiffness: parameters.stiffness,
            });

        let lattice = topology.rest_lattice();
        let state = ClothState::at_rest(lattice.clone());
        let regulator = EnergyRegulator::new(parameters.init_energy, parameters.alpha, parameters.decay);
        let clock = TickClock::new(source, engine.baseline_rate);

        info!(
            height = topology.height(),
            width = topology.width(),
            scheme = %engine.scheme,
            anchors = pinning.indices().len(),
            force_terms = forces.len(),
            "cloth built"
        );

        Ok(Self {
            configured_scheme: engine.scheme,
            force_buf: vec![NVec2::zeros(); topology.point_count()],
            engine,
            parameters,
            topology,
            lattice,
            state,
            forces,
            pinning,
            regulator,
            clock,
            rasterizer,
            ticks: 0,
            last_report: None,
        })
    }

    /// Advance one tick and return a snapshot of the positions.
    pub fn tick(&mut self) -> PointGrid {
        self.advance();
        self.state.pos.clone()
    }

    /// Advance one tick and return the occupancy buffer of the new positions.
    /// Uses the configured raster, or the default frame when none is set.
    pub fn tick_frame(&mut self) -> OccupancyBuffer {
        self.advance();
        self.rasterizer.rasterize(&self.state.pos)
    }

    fn advance(&mut self) -> TickReport {
        let scheme = self.engine.scheme;
        let dt = self.clock.next_dt();

        self.forces.accumulate(&self.state.pos, &mut self.force_buf);
        self.pinning.apply(&mut self.force_buf);
        trace!(
            max_force = self.force_buf.iter().map(|f| f.norm()).fold(0.0, f64::max),
            "forces accumulated"
        );

        let mut next = integrator::candidate(scheme, &mut self.state, &self.force_buf, self.parameters.mass, dt);
        let regulation = self
            .regulator
            .regulate(self.state.pos.points(), &mut next, scheme.blend_weight());
        integrator::commit(scheme, &mut self.state, next);
        self.state.assert_consistent();

        self.ticks += 1;
        let report = TickReport {
            tick: self.ticks,
            dt,
            raw_energy: regulation.raw_energy,
            target: regulation.target,
            scale: regulation.scale,
            estimate: self.regulator.estimate(),
        };
        debug!(
            tick = report.tick,
            dt = report.dt,
            energy = report.raw_energy,
            target = report.target,
            estimate = report.estimate,
            "tick"
        );
        self.last_report = Some(report);
        report
    }

    /// Rebuild every grid from the rest lattice, restore the configured
    /// energy estimate and scheme, and forget the last tick time.
    pub fn reset(&mut self) {
        self.state = ClothState::at_rest(self.lattice.clone());
        self.regulator = EnergyRegulator::new(
            self.parameters.init_energy,
            self.parameters.alpha,
            self.parameters.decay,
        );
        self.clock.reset();
        self.engine.scheme = self.configured_scheme;
        self.ticks = 0;
        self.last_report = None;
        info!("cloth reset");
    }

    /// Switch integration scheme. The newly active scheme starts without
    /// history: Verlet sees zero implied velocity, Euler zero velocity.
    pub fn set_scheme(&mut self, scheme: Scheme) {
        if scheme == self.engine.scheme {
            return;
        }
        match scheme {
            Scheme::Verlet => self.state.prev_pos = self.state.pos.clone(),
            Scheme::Euler => {
                self.state.velocity = PointGrid::zeros(self.topology.height(), self.topology.width())
            }
        }
        info!(from = %self.engine.scheme, to = %scheme, "scheme switched");
        self.engine.scheme = scheme;
    }

    pub fn scheme(&self) -> Scheme {
        self.engine.scheme
    }

    pub fn positions(&self) -> &PointGrid {
        &self.state.pos
    }

    pub fn previous_positions(&self) -> &PointGrid {
        &self.state.prev_pos
    }

    pub fn velocities(&self) -> &PointGrid {
        &self.state.velocity
    }

    pub fn energy_estimate(&self) -> f64 {
        self.regulator.estimate()
    }

    pub fn rest_lattice(&self) -> &PointGrid {
        &self.lattice
    }

    pub fn rasterizer(&self) -> &Rasterizer {
        &self.rasterizer
    }

    pub fn pinning(&self) -> &PinningPolicy {
        &self.pinning
    }

    pub fn topology(&self) -> &GridTopology {
        &self.topology
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn last_report(&self) -> Option<TickReport> {
        self.last_report
    }

    /// Net force on every point for the current positions, after pinning.
    pub fn current_forces(&self) -> Vec<NVec2> {
        let mut out = vec![NVec2::zeros(); self.topology.point_count()];
        self.forces.accumulate(&self.state.pos, &mut out);
        self.pinning.apply(&mut out);
        out
    }
}
