use std::time::Instant;

use crate::configuration::config::{ClothConfig, EngineConfig, GridConfig};
use crate::error::ClothResult;
use crate::simulation::clock::FixedClock;
use crate::simulation::engine::Scheme;
use crate::simulation::scenario::Cloth;

/// Helper to build a cloth of `height x width` with a deterministic clock
fn make_cloth(height: i64, width: i64, scheme: Scheme) -> ClothResult<Cloth> {
    let cfg = ClothConfig {
        grid: GridConfig { height, width, spacing: 1.0 },
        engine: EngineConfig {
            integrator: scheme.to_string(),
            ..Default::default()
        },
        ..Default::default()
    };
    // one tick per baseline interval
    let step = 1.0 / cfg.engine.baseline_rate;
    Cloth::with_clock(&cfg, Box::new(FixedClock::new(step)))
}

/// Time per tick for both schemes over a range of grid sizes
pub fn bench_tick() -> ClothResult<()> {
    let sizes = [(20, 40), (40, 80), (80, 160), (160, 320), (320, 640)];
    let steps = 20; // ticks per measurement

    for (h, w) in sizes {
        let mut per_scheme = Vec::new();

        for scheme in [Scheme::Verlet, Scheme::Euler] {
            let mut cloth = make_cloth(h, w, scheme)?;

            // Warm up
            cloth.tick();

            let t0 = Instant::now();
            for _ in 0..steps {
                cloth.tick();
            }
            per_scheme.push(t0.elapsed().as_secs_f64() / steps as f64);
        }

        println!(
            "{:4}x{:<4} ({:6} pts), verlet tick = {:8.6} s, euler tick = {:8.6} s",
            h,
            w,
            h * w,
            per_scheme[0],
            per_scheme[1]
        );
    }
    Ok(())
}

/// Tick cost against point count for the default scheme
/// Paste output directly into a spreadsheet to graph
pub fn bench_tick_curve() -> ClothResult<()> {
    println!("points,tick_ms,frame_ms");

    // 1:2 aspect grids, the default cloth shape
    for k in 1..=8 {
        let h = 10 * k;
        let w = 20 * k;
        // Small grids: average over more ticks to smooth noise
        let steps = if h * w <= 3200 { 50 } else { 10 };

        let mut cloth = make_cloth(h, w, Scheme::Verlet)?;
        let t0 = Instant::now();
        for _ in 0..steps {
            cloth.tick();
        }
        let ms_tick = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        let t1 = Instant::now();
        for _ in 0..steps {
            cloth.tick_frame();
        }
        let ms_frame = t1.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{},{:.6},{:.6}", h * w, ms_tick, ms_frame);
    }
    Ok(())
}
