//! Simulation configuration.
//!
//! All parameters are fixed at construction; nothing here is runtime-tunable
//! once the spectrum has been initialized. Defaults reproduce the reference
//! data set used to validate the simulation.

use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Number of superimposed wave bands. Fixed at construction.
pub const NUM_CASCADES: usize = 4;

/// Physical parameters of one wave cascade.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CascadeParams {
    /// Phillips spectrum amplitude scale.
    pub amplitude: f32,
    /// 0..1; 1 fully suppresses waves travelling against the wind.
    pub wind_directionality: f32,
    /// Lateral displacement strength (wave sharpness).
    pub choppiness: f32,
    /// Spatial period of the cascade tile in meters.
    pub patch_length: f32,
    /// Exponential damping coefficient for short wavelengths.
    pub short_wave_cutoff: f32,
    /// Wavenumbers below this are zeroed outright.
    pub long_wave_cutoff: f32,
    /// Exponent sharpening the wind-alignment factor.
    pub wind_tighten: f32,
}

/// Full ocean simulation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OceanConfig {
    /// Grid side length N. Must be a power of two.
    pub grid_size: usize,
    /// Number of parallel batches; must divide `grid_size` evenly.
    pub batch_count: usize,
    /// Per-cascade physical parameters.
    pub cascades: [CascadeParams; NUM_CASCADES],
    /// Wind speed in m/s.
    pub wind_speed: f32,
    /// Wind direction in degrees (0 points along +Y, 90 along +X).
    pub wind_direction: f32,
    /// Animation loop period in seconds; the surface repeats seamlessly.
    pub repeat_period: f32,
    /// Gravitational acceleration, m/s².
    pub gravity: f32,
    /// World units per meter (100 for centimeter worlds).
    pub units_per_meter: f32,
    /// Final scale applied to sampled displacement. Unit calibration knob;
    /// leave at 1.0 unless matching an external rendering path.
    pub displacement_scale: f32,
}

impl Default for OceanConfig {
    fn default() -> Self {
        let base = CascadeParams {
            amplitude: 0.0,
            wind_directionality: 1.0,
            choppiness: 1.5,
            patch_length: 0.0,
            short_wave_cutoff: 0.0,
            long_wave_cutoff: 0.0,
            wind_tighten: 1.0,
        };
        Self {
            grid_size: 64,
            batch_count: 32,
            cascades: [
                CascadeParams {
                    amplitude: 84000.0,
                    patch_length: 10.0,
                    short_wave_cutoff: 0.0001,
                    long_wave_cutoff: 1.0,
                    ..base
                },
                CascadeParams {
                    amplitude: 32000.0,
                    patch_length: 28.0,
                    short_wave_cutoff: 0.002,
                    long_wave_cutoff: 0.25,
                    ..base
                },
                CascadeParams {
                    amplitude: 2000.0,
                    patch_length: 432.0,
                    short_wave_cutoff: 2.0,
                    long_wave_cutoff: 0.125,
                    ..base
                },
                CascadeParams {
                    amplitude: 120.0,
                    patch_length: 2000.0,
                    short_wave_cutoff: 30.0,
                    long_wave_cutoff: 0.04,
                    ..base
                },
            ],
            wind_speed: 44.0,
            wind_direction: 90.0,
            repeat_period: 1000.0,
            gravity: 9.8,
            units_per_meter: 100.0,
            displacement_scale: 1.0,
        }
    }
}

impl OceanConfig {
    /// Rows per parallel batch.
    #[inline]
    pub fn batch_size(&self) -> usize {
        self.grid_size / self.batch_count
    }

    /// Angular frequency of the repeat period; every wave mode's frequency
    /// is quantized to a multiple of this so the animation loops exactly.
    #[inline]
    pub fn base_frequency(&self) -> f32 {
        TAU / self.repeat_period
    }
}
