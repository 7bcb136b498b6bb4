//! Integration tests for the full ocean surface pipeline
//!
//! These tests run the whole spectrum → propagation → inverse FFT → sampling
//! chain and validate the externally observable guarantees: determinism,
//! per-frame idempotence, exact animation looping, toroidal tiling and the
//! cell-center sampling identity.

use ocean_sim_core::{CascadeParams, OceanConfig, OceanSimulation, Vec3, NUM_CASCADES};

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn simulation_at(config: OceanConfig, time: f32) -> OceanSimulation {
    let mut sim = OceanSimulation::new(config);
    sim.initialize();
    sim.calculate(time);
    sim
}

/// Configuration whose UV arithmetic is exact in f32: every patch spans
/// 8 × 128 = 1024 world units, a power of two, so sample points placed on
/// cell centers hit grid cells with zero interpolation error.
fn exact_sampling_config() -> OceanConfig {
    let mut config = OceanConfig {
        units_per_meter: 128.0,
        ..OceanConfig::default()
    };
    for cascade in &mut config.cascades {
        *cascade = CascadeParams {
            patch_length: 8.0,
            ..*cascade
        };
    }
    config
}

#[test]
fn identical_configurations_produce_identical_surfaces() {
    let a = simulation_at(OceanConfig::default(), 17.25);
    let b = simulation_at(OceanConfig::default(), 17.25);

    let n = a.config().grid_size;
    for cascade in 0..NUM_CASCADES {
        for y in 0..n {
            for x in 0..n {
                let va = a.displacement_at_cell(x, y, cascade);
                let vb = b.displacement_at_cell(x, y, cascade);
                assert_eq!(
                    va.x.to_bits(),
                    vb.x.to_bits(),
                    "x diverged at ({x}, {y}) cascade {cascade}"
                );
                assert_eq!(va.y.to_bits(), vb.y.to_bits());
                assert_eq!(va.z.to_bits(), vb.z.to_bits());
            }
        }
    }
}

#[test]
fn batch_partitioning_does_not_change_results() {
    let reference = simulation_at(
        OceanConfig {
            batch_count: 32,
            ..OceanConfig::default()
        },
        9.25,
    );
    let n = reference.config().grid_size;

    // Any batch count that divides the grid evenly must produce the same
    // surface to the bit; the partitioning is a scheduling detail only.
    for batch_count in [1usize, 16, 64] {
        let other = simulation_at(
            OceanConfig {
                batch_count,
                ..OceanConfig::default()
            },
            9.25,
        );
        for cascade in 0..NUM_CASCADES {
            for y in 0..n {
                for x in 0..n {
                    let a = reference.displacement_at_cell(x, y, cascade);
                    let b = other.displacement_at_cell(x, y, cascade);
                    assert_eq!(
                        a.z.to_bits(),
                        b.z.to_bits(),
                        "batch count {batch_count} diverged at ({x}, {y}) cascade {cascade}"
                    );
                    assert_eq!(a.x.to_bits(), b.x.to_bits());
                    assert_eq!(a.y.to_bits(), b.y.to_bits());
                }
            }
        }
    }
}

#[test]
fn repeated_calculate_within_a_frame_is_free() {
    let mut sim = simulation_at(OceanConfig::default(), 5.0);
    let point = Vec3::new(250.0, 760.0, 0.0);
    let before = sim.displacement_at_point(point);

    for _ in 0..10 {
        sim.calculate(5.0);
    }
    assert_eq!(sim.frames_computed(), 1);
    assert_eq!(sim.displacement_at_point(point), before);
}

#[test]
fn animation_repeats_exactly_after_the_repeat_period() {
    let config = OceanConfig::default();
    let period = config.repeat_period;

    // 0.5 and period + 0.5 reduce to the same animation time, so the
    // surfaces must match to the bit, not merely approximately.
    let a = simulation_at(config.clone(), 0.5);
    let b = simulation_at(config, period + 0.5);

    let n = a.config().grid_size;
    for cascade in 0..NUM_CASCADES {
        for y in 0..n {
            for x in 0..n {
                let va = a.displacement_at_cell(x, y, cascade);
                let vb = b.displacement_at_cell(x, y, cascade);
                assert_eq!(va.z.to_bits(), vb.z.to_bits(), "loop seam at ({x}, {y})");
            }
        }
    }
}

#[test]
fn sampling_at_cell_centers_matches_stored_grid_values() {
    let sim = simulation_at(exact_sampling_config(), 3.0);
    let n = sim.config().grid_size;
    let world_cell = 1024.0 / n as f32;

    for (x, y) in [(0usize, 0usize), (7, 3), (31, 31), (63, 1), (12, 60)] {
        let point = Vec3::new(
            world_cell * (x as f32 + 0.5),
            world_cell * (y as f32 + 0.5),
            0.0,
        );
        let mut expected = Vec3::zeros();
        for cascade in 0..NUM_CASCADES {
            expected += sim.displacement_at_cell(x, y, cascade);
        }
        assert_eq!(sim.displacement_at_point(point), expected);
    }
}

#[test]
fn surface_tiles_toroidally() {
    let sim = simulation_at(exact_sampling_config(), 7.5);
    let tile = 1024.0;

    for (px, py) in [(136.0, 72.0), (8.0, 1016.0), (500.0, 500.0)] {
        let base = sim.displacement_at_point(Vec3::new(px, py, 0.0));
        let shifted = sim.displacement_at_point(Vec3::new(px + tile, py - tile, 0.0));
        assert_eq!(base, shifted, "tile seam at ({px}, {py})");
    }
}

#[test]
fn zero_wind_leaves_the_surface_flat() {
    let config = OceanConfig {
        wind_speed: 0.0,
        ..OceanConfig::default()
    };
    let sim = simulation_at(config, 12.0);

    let n = sim.config().grid_size;
    for cascade in 0..NUM_CASCADES {
        for y in 0..n {
            for x in 0..n {
                let v = sim.displacement_at_cell(x, y, cascade);
                assert_eq!(v, Vec3::zeros(), "non-flat cell ({x}, {y})");
            }
        }
    }
    assert_eq!(
        sim.displacement_at_point(Vec3::new(333.0, -21.0, 0.0)),
        Vec3::zeros()
    );
}

#[test]
fn default_configuration_stays_finite_and_bounded() {
    let mut sim = simulation_at(OceanConfig::default(), 0.0);
    // Sum of the default cascade amplitudes; a loose physical ceiling the
    // normalized transform cannot exceed.
    let bound = 118_120.0;

    for step in 0..8 {
        sim.calculate(step as f32 * 33.7);
        let n = sim.config().grid_size;
        for cascade in 0..NUM_CASCADES {
            for y in 0..n {
                for x in 0..n {
                    let v = sim.displacement_at_cell(x, y, cascade);
                    assert!(
                        v.x.is_finite() && v.y.is_finite() && v.z.is_finite(),
                        "non-finite displacement at ({x}, {y}) cascade {cascade}"
                    );
                    assert!(
                        v.norm() < bound,
                        "displacement {v:?} exceeds physical bound at ({x}, {y})"
                    );
                }
            }
        }
    }
}

#[test]
fn clamped_sampling_matches_wrapped_away_from_edges() {
    let sim = simulation_at(exact_sampling_config(), 2.0);
    // Interior points never touch an edge cell, so both index policies see
    // the same four corners.
    let point = Vec3::new(512.0, 480.0, 0.0);
    assert_eq!(
        sim.displacement_at_point(point),
        sim.displacement_at_point_clamped(point)
    );
}
