//! Static Phillips spectrum construction.
//!
//! Runs once at initialization: every cell of every cascade gets a pair of
//! complex spectral coefficients (positive frequency and the conjugated
//! negative frequency) derived from the wind parameters and four
//! deterministic random draws. The work is partitioned into row batches and
//! executed in parallel; the result depends only on the configuration, never
//! on the batch layout.

use nalgebra::Vector2;
use rayon::prelude::*;
use std::f32::consts::{FRAC_1_SQRT_2, TAU};

use crate::config::OceanConfig;
use crate::grid::{Complex, SpectrumTables};
use crate::noise::RandomSeries;

/// Side length of the reference GPU dispatch grid. The random seed layout is
/// tied to this constant, not to the configured grid size.
const GPU_EMULATION_GRID: i32 = 64;

/// Smallest wavenumber treated as non-zero; guards the DC term.
pub(crate) const WAVENUMBER_EPSILON: f32 = 1e-4;

/// Populate `tables` with the static spectrum for every cascade and cell.
pub(crate) fn build(config: &OceanConfig, wind_dir: Vector2<f32>, tables: &mut SpectrumTables) {
    let n = config.grid_size;
    let chunk = config.batch_size() * n;

    tables
        .positive
        .as_mut_slice()
        .par_chunks_mut(chunk)
        .zip(tables.negative.as_mut_slice().par_chunks_mut(chunk))
        .enumerate()
        .for_each(|(batch, (positive, negative))| {
            let rows = positive.len() / n;
            for row in 0..rows {
                let global_row = batch * rows + row;
                let cascade = global_row / n;
                let y = global_row % n;
                for x in 0..n {
                    let (h0_pos, h0_neg) = spectrum_cell(config, wind_dir, x, y, cascade);
                    positive[row * n + x] = h0_pos;
                    negative[row * n + x] = h0_neg;
                }
            }
        });
}

/// Spectral coefficients for one cell.
///
/// Follows the Phillips model: directional wind factor, `A·exp(-1/(kL)²)/k⁴`
/// with `L = windSpeed²/g`, exponential short-wave damping and a hard
/// long-wave cutoff. The positive and negative magnitudes differ only in the
/// wind factor; each is scaled by `1/√2` and multiplied by an independently
/// drawn complex magnitude/phase pair. The negative coefficient is returned
/// already conjugated so the propagated field sums to a real surface.
fn spectrum_cell(
    config: &OceanConfig,
    wind_dir: Vector2<f32>,
    x: usize,
    y: usize,
    cascade: usize,
) -> (Complex, Complex) {
    let half = (config.grid_size / 2) as i32;
    let params = &config.cascades[cascade];

    // Seed layout matches the GPU dispatch: signed spectral coordinates
    // flattened over the fixed emulation grid.
    let seed = (x as i32 - half)
        + (y as i32 - half) * GPU_EMULATION_GRID
        + cascade as i32 * GPU_EMULATION_GRID * GPU_EMULATION_GRID;
    let mut series = RandomSeries::new(seed);
    let r1 = series.next_value() * TAU;
    let r2 = series.next_value() * TAU;
    let r3 = series.next_value() * TAU;
    let r4 = series.next_value() * TAU;
    let amp_pos = Complex::new(r1 * r3.sin(), r1 * r3.cos());
    let amp_neg = Complex::new(r2 * r4.sin(), r2 * r4.cos());

    let wave_vector = Vector2::new((x as i32 - half) as f32, (y as i32 - half) as f32) * TAU
        / params.patch_length;
    let k = wave_vector.norm();

    let (mag_pos, mag_neg) = if k > WAVENUMBER_EPSILON && config.wind_speed > 0.0 {
        let k_dir = wave_vector / k;

        // Positive spectrum follows the wind, negative travels against it;
        // the against-wind branch is damped by (1 - directionality).
        let dot = k_dir.dot(&wind_dir);
        let mut wind_pos = dot.abs().powf(params.wind_tighten);
        let mut wind_neg = wind_pos;
        if dot <= 0.0 {
            wind_pos *= 1.0 - params.wind_directionality;
        }
        if dot >= 0.0 {
            wind_neg *= 1.0 - params.wind_directionality;
        }

        let l = config.wind_speed * config.wind_speed / config.gravity;
        let kl = k * l;
        let mut spectrum = params.amplitude * (-1.0 / (kl * kl)).exp() / (k * k * k * k);
        spectrum *= (-(k * k) * params.short_wave_cutoff).exp();
        if k < params.long_wave_cutoff {
            spectrum = 0.0;
        }

        (
            (spectrum * wind_pos).sqrt() * FRAC_1_SQRT_2,
            (spectrum * wind_neg).sqrt() * FRAC_1_SQRT_2,
        )
    } else {
        (0.0, 0.0)
    };

    let h0_pos = amp_pos * mag_pos;
    let mut h0_neg = amp_neg * mag_neg;
    h0_neg.im = -h0_neg.im;
    (h0_pos, h0_neg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NUM_CASCADES;

    fn build_tables(config: &OceanConfig) -> SpectrumTables {
        let rad = config.wind_direction.to_radians();
        let wind = Vector2::new(rad.sin(), rad.cos());
        let mut tables = SpectrumTables::new(config.grid_size, NUM_CASCADES);
        build(config, wind, &mut tables);
        tables
    }

    #[test]
    fn spectrum_is_deterministic() {
        let config = OceanConfig::default();
        let a = build_tables(&config);
        let b = build_tables(&config);
        for (va, vb) in a.positive.as_slice().iter().zip(b.positive.as_slice()) {
            assert_eq!(va.re.to_bits(), vb.re.to_bits());
            assert_eq!(va.im.to_bits(), vb.im.to_bits());
        }
    }

    #[test]
    fn dc_term_is_zero() {
        let config = OceanConfig::default();
        let tables = build_tables(&config);
        let half = config.grid_size / 2;
        for cascade in 0..NUM_CASCADES {
            let v = tables.positive.get(half, half, cascade);
            assert_eq!(v, Complex::new(0.0, 0.0), "cascade {cascade} DC not zero");
        }
    }

    #[test]
    fn zero_wind_speed_zeroes_the_spectrum() {
        let config = OceanConfig {
            wind_speed: 0.0,
            ..OceanConfig::default()
        };
        let tables = build_tables(&config);
        for v in tables.positive.as_slice().iter().chain(tables.negative.as_slice()) {
            assert!(v.re.is_finite() && v.im.is_finite());
            assert_eq!(*v, Complex::new(0.0, 0.0));
        }
    }

    #[test]
    fn long_wave_cutoff_zeroes_low_wavenumbers() {
        // Cutoff above every representable wavenumber kills the cascade.
        let mut config = OceanConfig::default();
        config.cascades[0].long_wave_cutoff = f32::MAX;
        let tables = build_tables(&config);
        let n = config.grid_size;
        for y in 0..n {
            for x in 0..n {
                assert_eq!(tables.positive.get(x, y, 0), Complex::new(0.0, 0.0));
            }
        }
    }

    #[test]
    fn negative_coefficient_is_conjugated() {
        let config = OceanConfig::default();
        let tables = build_tables(&config);
        let half = (config.grid_size / 2) as i32;
        let n = config.grid_size;

        // Re-derive the raw complex amplitude for each cell; the stored
        // negative coefficient must be that amplitude scaled by a
        // non-negative magnitude with its imaginary part negated.
        let mut checked = 0;
        for y in 0..n {
            for x in 0..n {
                let seed = (x as i32 - half) + (y as i32 - half) * GPU_EMULATION_GRID;
                let mut series = RandomSeries::new(seed);
                let _r1 = series.next_value();
                let r2 = series.next_value() * TAU;
                let _r3 = series.next_value();
                let r4 = series.next_value() * TAU;
                let raw = Complex::new(r2 * r4.sin(), r2 * r4.cos());

                let stored = tables.negative.get(x, y, 0);
                if stored == Complex::new(0.0, 0.0) {
                    continue;
                }
                assert!(stored.re * raw.re >= 0.0, "real part sign changed at ({x}, {y})");
                assert!(stored.im * raw.im <= 0.0, "imaginary part not negated at ({x}, {y})");
                checked += 1;
            }
        }
        assert!(checked > 100, "too few active cells exercised: {checked}");
    }

    #[test]
    fn all_coefficients_finite() {
        let config = OceanConfig::default();
        let tables = build_tables(&config);
        for v in tables.positive.as_slice().iter().chain(tables.negative.as_slice()) {
            assert!(v.re.is_finite() && v.im.is_finite(), "non-finite coefficient {v}");
        }
    }
}
