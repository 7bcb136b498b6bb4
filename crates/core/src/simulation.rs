//! Ocean surface simulation facade.
//!
//! Owns the spectrum, frequency-domain field and displacement grids and
//! drives the per-frame pipeline: propagate the spectrum to the current
//! time, run the separable inverse transform, cache the result. Any number
//! of sampling calls per frame read the cached displacement.

use nalgebra::Vector2;

use crate::config::{OceanConfig, NUM_CASCADES};
use crate::grid::{DisplacementGrids, FrequencyFields, SpectrumTables, Vec3};
use crate::{fft, propagate, sampler, spectrum};

/// Side length of the debug sampling grid.
pub const DEBUG_GRID_SIZE: usize = 10;
/// Spacing of debug sample points, world units.
pub const DEBUG_GRID_CELL_SIZE: f32 = 200.0;

/// Multi-cascade FFT ocean simulation.
///
/// Lifecycle: [`OceanSimulation::new`] allocates, [`initialize`] builds the
/// static spectrum exactly once, [`calculate`] advances the surface at most
/// once per distinct frame time, and [`displacement_at_point`] reads the
/// cached result.
///
/// [`initialize`]: OceanSimulation::initialize
/// [`calculate`]: OceanSimulation::calculate
/// [`displacement_at_point`]: OceanSimulation::displacement_at_point
pub struct OceanSimulation {
    config: OceanConfig,
    wind_dir: Vector2<f32>,
    spectrum: SpectrumTables,
    fields: FrequencyFields,
    displacement: DisplacementGrids,
    initialized: bool,
    calculated_time: f32,
    frames_computed: u64,
}

impl OceanSimulation {
    /// Allocate a simulation for `config`. Grids are zeroed; the spectrum is
    /// not built until [`OceanSimulation::initialize`].
    pub fn new(config: OceanConfig) -> Self {
        let n = config.grid_size;
        Self {
            spectrum: SpectrumTables::new(n, NUM_CASCADES),
            fields: FrequencyFields::new(n, NUM_CASCADES),
            displacement: DisplacementGrids::new(n, NUM_CASCADES),
            wind_dir: Vector2::zeros(),
            initialized: false,
            calculated_time: -1.0,
            frames_computed: 0,
            config,
        }
    }

    /// Build the static spectrum. Must be called exactly once before any
    /// other call.
    ///
    /// # Panics
    ///
    /// Panics if called twice, if the grid size is not a power of two, or if
    /// the grid size is not evenly divisible by the batch count. These are
    /// structural misconfigurations, not runtime conditions.
    pub fn initialize(&mut self) {
        assert!(!self.initialized, "Initialize must be called exactly once");
        let n = self.config.grid_size;
        assert!(n.is_power_of_two(), "Grid size must be a power of two");
        assert!(
            self.config.batch_count > 0 && n % self.config.batch_count == 0,
            "Grid size should be evenly divisible by the batch count"
        );

        let radians = self.config.wind_direction.to_radians();
        self.wind_dir = Vector2::new(radians.sin(), radians.cos());

        spectrum::build(&self.config, self.wind_dir, &mut self.spectrum);
        self.initialized = true;

        tracing::info!(
            grid_size = n,
            cascades = NUM_CASCADES,
            batch_count = self.config.batch_count,
            wind_speed = self.config.wind_speed,
            wind_direction = self.config.wind_direction,
            "ocean spectrum initialized"
        );
    }

    /// Advance the surface to `current_time` (seconds).
    ///
    /// Idempotent within a frame: if the time has not advanced past the last
    /// computed value this is a no-op, so every consumer in a frame observes
    /// the same surface. Time is taken modulo the repeat period, making the
    /// animation loop seamlessly.
    ///
    /// # Panics
    ///
    /// Panics if the simulation was not initialized.
    pub fn calculate(&mut self, current_time: f32) {
        assert!(self.initialized, "Calculate requires Initialize first");
        if self.calculated_time >= current_time {
            return;
        }

        let animation_time = current_time % self.config.repeat_period;
        propagate::step_time(&self.config, animation_time, &self.spectrum, &mut self.fields);
        fft::transform(
            &mut self.fields,
            &mut self.displacement,
            self.config.batch_size(),
            self.config.displacement_scale,
        );

        self.calculated_time = current_time;
        self.frames_computed += 1;
        tracing::debug!(
            time = current_time,
            animation_time,
            frame = self.frames_computed,
            "ocean surface recomputed"
        );
    }

    /// Total displacement at a world-space point: the bilinear sample of
    /// every cascade, summed. Pure read; callable any number of times per
    /// frame.
    ///
    /// Before the first [`OceanSimulation::calculate`] the surface is flat
    /// and this benignly returns zero.
    ///
    /// # Panics
    ///
    /// Panics if the simulation was not initialized.
    pub fn displacement_at_point(&self, point: Vec3) -> Vec3 {
        self.sample(point, true)
    }

    /// Non-periodic variant of [`OceanSimulation::displacement_at_point`]:
    /// grid indices saturate at the patch edge instead of wrapping.
    pub fn displacement_at_point_clamped(&self, point: Vec3) -> Vec3 {
        self.sample(point, false)
    }

    fn sample(&self, point: Vec3, wrap: bool) -> Vec3 {
        assert!(self.initialized, "Displacement query requires Initialize first");
        if self.calculated_time < 0.0 {
            tracing::debug!("displacement queried before first Calculate; returning zero");
            return Vec3::zeros();
        }
        let mut total = Vec3::zeros();
        for cascade in 0..NUM_CASCADES {
            total += sampler::cascade_displacement(
                &self.displacement,
                &self.config,
                cascade,
                point,
                wrap,
            );
        }
        total
    }

    /// World position of the displaced surface under `point`; what buoyancy
    /// consumers apply directly.
    pub fn surface_point(&self, point: Vec3) -> Vec3 {
        point + self.displacement_at_point(point)
    }

    /// Stored displacement of one grid cell of one cascade, without
    /// interpolation. Mesh-deformation consumers read the grid this way.
    pub fn displacement_at_cell(&self, x: usize, y: usize, cascade: usize) -> Vec3 {
        self.displacement.vector_at(x, y, cascade)
    }

    /// Sample a `DEBUG_GRID_SIZE`² grid of points around `center` (snapped
    /// to the debug cell spacing) and return each point with its
    /// displacement. Debug visualization hook; not needed for correctness.
    pub fn debug_sample_grid(&self, center: Vec3) -> Vec<(Vec3, Vec3)> {
        let snapped = Vec3::new(
            (center.x / DEBUG_GRID_CELL_SIZE).round() * DEBUG_GRID_CELL_SIZE,
            (center.y / DEBUG_GRID_CELL_SIZE).round() * DEBUG_GRID_CELL_SIZE,
            0.0,
        );
        let half = DEBUG_GRID_SIZE as f32 / 2.0;

        let mut samples = Vec::with_capacity(DEBUG_GRID_SIZE * DEBUG_GRID_SIZE);
        for y in 0..DEBUG_GRID_SIZE {
            for x in 0..DEBUG_GRID_SIZE {
                let point = Vec3::new(
                    snapped.x + (x as f32 - half) * DEBUG_GRID_CELL_SIZE,
                    snapped.y + (y as f32 - half) * DEBUG_GRID_CELL_SIZE,
                    0.0,
                );
                samples.push((point, self.displacement_at_point(point)));
            }
        }
        samples
    }

    /// The configuration this simulation was built with.
    pub fn config(&self) -> &OceanConfig {
        &self.config
    }

    /// Whether [`OceanSimulation::initialize`] has run.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Last frame time the surface was computed for (-1 before the first).
    pub fn calculated_time(&self) -> f32 {
        self.calculated_time
    }

    /// Number of distinct frame recomputations performed.
    pub fn frames_computed(&self) -> u64 {
        self.frames_computed
    }
}
