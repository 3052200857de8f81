use clothsim::{
    Cloth, ClothConfig, EngineConfig, GridConfig, ParametersConfig, PinningConfig, RegulatorConfig,
    Scheme, ScriptedClock,
};

use proptest::prelude::*;

fn scheme_strategy() -> impl Strategy<Value = Scheme> {
    prop_oneof![Just(Scheme::Verlet), Just(Scheme::Euler)]
}

fn config(
    height: i64,
    width: i64,
    scheme: Scheme,
    parameters: ParametersConfig,
    regulator: RegulatorConfig,
) -> ClothConfig {
    ClothConfig {
        grid: GridConfig { height, width, spacing: 1.0 },
        engine: EngineConfig {
            integrator: scheme.to_string(),
            baseline_rate: 150.0,
        },
        parameters,
        regulator,
        pinning: PinningConfig::none(),
        raster: None,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn estimate_stays_non_negative(
        height in 1i64..6,
        width in 1i64..6,
        scheme in scheme_strategy(),
        mass in 5.0f64..50.0,
        gravity in 0.0f64..1.0,
        stiffness in 0.0f64..2.0,
        alpha in 0.0f64..=1.0,
        decay in 0.0f64..1.0,
        init_energy in 0.0f64..2000.0,
        intervals in prop::collection::vec(0.0f64..0.01, 1..10),
        ticks in 1usize..30,
    ) {
        let cfg = config(
            height,
            width,
            scheme,
            ParametersConfig { mass, gravity, stiffness },
            RegulatorConfig { alpha, decay, init_energy },
        );
        let mut cloth = Cloth::with_clock(&cfg, Box::new(ScriptedClock::new(intervals))).unwrap();
        for _ in 0..ticks {
            let grid = cloth.tick();
            prop_assert!(cloth.energy_estimate() >= 0.0);
            prop_assert!(grid.points().iter().all(|p| p.x.is_finite() && p.y.is_finite()));
            let report = cloth.last_report().unwrap();
            prop_assert!(report.raw_energy >= 0.0);
            prop_assert!(report.dt >= 0.0);
        }
    }

    #[test]
    fn no_forces_means_no_motion(
        height in 1i64..6,
        width in 1i64..6,
        scheme in scheme_strategy(),
        intervals in prop::collection::vec(0.0f64..0.05, 1..10),
        ticks in 1usize..30,
    ) {
        let cfg = config(
            height,
            width,
            scheme,
            ParametersConfig { mass: 1.0, gravity: 0.0, stiffness: 0.0 },
            RegulatorConfig::default(),
        );
        let mut cloth = Cloth::with_clock(&cfg, Box::new(ScriptedClock::new(intervals))).unwrap();
        let rest = cloth.rest_lattice().clone();
        for _ in 0..ticks {
            prop_assert_eq!(&cloth.tick(), &rest);
        }
    }

    #[test]
    fn zero_gain_never_moves_the_estimate(
        height in 1i64..5,
        width in 1i64..5,
        scheme in scheme_strategy(),
        gravity in 0.0f64..1.0,
        init_energy in 0.0f64..100.0,
        ticks in 1usize..20,
    ) {
        let cfg = config(
            height,
            width,
            scheme,
            ParametersConfig { mass: 1.0, gravity, stiffness: 1.0 },
            RegulatorConfig { alpha: 0.0, decay: 0.99, init_energy },
        );
        let mut cloth = Cloth::with_clock(&cfg, Box::new(ScriptedClock::new(vec![0.01]))).unwrap();
        for _ in 0..ticks {
            cloth.tick();
            prop_assert_eq!(cloth.energy_estimate(), init_energy);
        }
    }
}
