pub mod states;
pub mod params;
pub mod engine;
pub mod topology;
pub mod forces;
pub mod pinning;
pub mod integrator;
pub mod regulator;
pub mod clock;
pub mod scenario;
