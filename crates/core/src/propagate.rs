//! Time-domain propagation of the static spectrum.
//!
//! Each frame the static coefficients are phase-rotated by the deep-water
//! dispersion relation and summed into the instantaneous frequency-domain
//! field that feeds the inverse transform. The angular frequency of every
//! mode is quantized to a multiple of the base repeat frequency, so the
//! whole animation is exactly periodic in `repeat_period`.

use nalgebra::Vector2;
use rayon::prelude::*;
use std::f32::consts::TAU;

use crate::config::OceanConfig;
use crate::grid::{Complex, FrequencyFields, SpectrumTables};
use crate::spectrum::WAVENUMBER_EPSILON;

/// Quantized deep-water angular frequency for wavenumber `k`.
///
/// `ω₀ = sqrt(g·k)` rounded down to a multiple of `base_frequency`
/// (`2π / repeat_period`), which makes `e^{iωt}` periodic in the repeat
/// period for every mode simultaneously.
#[inline]
pub(crate) fn dispersion(k: f32, gravity: f32, base_frequency: f32) -> f32 {
    ((gravity * k).sqrt() / base_frequency).floor() * base_frequency
}

/// Advance the frequency-domain field to `animation_time`.
///
/// Writes all three displacement axes: Z carries the height field directly,
/// X and Y carry the choppy lateral displacement `-i·k̂·choppiness·h̃`.
pub(crate) fn step_time(
    config: &OceanConfig,
    animation_time: f32,
    spectrum: &SpectrumTables,
    fields: &mut FrequencyFields,
) {
    let n = config.grid_size;
    let half = (n / 2) as i32;
    let chunk = config.batch_size() * n;
    let base_frequency = config.base_frequency();
    let positive = spectrum.positive.as_slice();
    let negative = spectrum.negative.as_slice();

    fields
        .x
        .as_mut_slice()
        .par_chunks_mut(chunk)
        .zip(fields.y.as_mut_slice().par_chunks_mut(chunk))
        .zip(fields.z.as_mut_slice().par_chunks_mut(chunk))
        .enumerate()
        .for_each(|(batch, ((fx, fy), fz))| {
            let rows = fz.len() / n;
            for row in 0..rows {
                let global_row = batch * rows + row;
                let cascade = global_row / n;
                let y = global_row % n;
                let params = &config.cascades[cascade];
                let plane = global_row * n;

                for x in 0..n {
                    let wave_vector =
                        Vector2::new((x as i32 - half) as f32, (y as i32 - half) as f32) * TAU
                            / params.patch_length;
                    let k = wave_vector.norm();
                    let omega = dispersion(k, config.gravity, base_frequency);

                    let (sin, cos) = (omega * animation_time).sin_cos();
                    let rotation = Complex::new(cos, sin);

                    let h0_pos = positive[plane + x];
                    let h0_neg = negative[plane + x];
                    let field = h0_pos * rotation + h0_neg * rotation.conj();

                    let local = row * n + x;
                    fz[local] = field;
                    if k > WAVENUMBER_EPSILON {
                        let k_dir = wave_vector / k;
                        // -i·h̃, scaled per axis by the unit wave direction.
                        let lateral = Complex::new(field.im, -field.re) * params.choppiness;
                        fx[local] = lateral * k_dir.x;
                        fy[local] = lateral * k_dir.y;
                    } else {
                        fx[local] = Complex::new(0.0, 0.0);
                        fy[local] = Complex::new(0.0, 0.0);
                    }
                }
            }
        });
}
