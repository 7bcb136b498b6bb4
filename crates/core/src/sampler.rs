//! Point sampling of the cached displacement grids.
//!
//! World positions map to fractional per-cascade UVs; the four bounding
//! cells are fetched with toroidal wraparound (or saturating clamp for the
//! non-periodic variant) and bilinearly interpolated. Sample points sit on
//! cell centers, hence the half-cell offset in the index math.

use crate::config::OceanConfig;
use crate::grid::{DisplacementGrids, Vec3};

/// Fractional part, always in `[0, 1)`.
#[inline]
pub(crate) fn frac(value: f32) -> f32 {
    value - value.floor()
}

/// Toroidal index wrap: one step past either edge lands on the other edge.
#[inline]
pub fn wrap_index(index: i32, size: i32) -> i32 {
    if index < 0 {
        size - 1
    } else if index >= size {
        0
    } else {
        index
    }
}

/// Saturating index clamp to `[0, size - 1]` for non-periodic sampling.
#[inline]
pub fn clamp_index(index: i32, size: i32) -> i32 {
    if index < 0 {
        0
    } else if index >= size {
        size - 1
    } else {
        index
    }
}

/// The four grid cells bounding a fractional UV position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingCells {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

/// Locate the bounding cells for `(u, v)` on a grid of side `size`.
///
/// The half-cell offset centers sample points on cell centers rather than
/// corners. `wrap` selects toroidal wraparound; otherwise indices saturate.
pub fn bounding_cells(u: f32, v: f32, size: usize, wrap: bool) -> BoundingCells {
    let size_i = size as i32;
    let x = u * size as f32 - 0.5;
    let y = v * size as f32 - 0.5;

    let adjust = if wrap { wrap_index } else { clamp_index };
    BoundingCells {
        x0: adjust(x.floor() as i32, size_i) as usize,
        y0: adjust(y.floor() as i32, size_i) as usize,
        x1: adjust((x + 1.0).floor() as i32, size_i) as usize,
        y1: adjust((y + 1.0).floor() as i32, size_i) as usize,
    }
}

/// Bilinear interpolation of four cell values with the half-cell offset.
pub fn bilinear(u: f32, v: f32, v00: Vec3, v01: Vec3, v10: Vec3, v11: Vec3, size: usize) -> Vec3 {
    let fx = frac(u * size as f32 - 0.5);
    let fy = frac(v * size as f32 - 0.5);
    v00 * ((1.0 - fx) * (1.0 - fy))
        + v01 * ((1.0 - fx) * fy)
        + v10 * (fx * (1.0 - fy))
        + v11 * (fx * fy)
}

/// Interpolated displacement of a single cascade at a world-space point.
pub(crate) fn cascade_displacement(
    displacement: &DisplacementGrids,
    config: &OceanConfig,
    cascade: usize,
    point: Vec3,
    wrap: bool,
) -> Vec3 {
    let params = &config.cascades[cascade];
    let n = config.grid_size;
    let u = frac(point.x / params.patch_length / config.units_per_meter);
    let v = frac(point.y / params.patch_length / config.units_per_meter);
    let cells = bounding_cells(u, v, n, wrap);

    bilinear(
        u,
        v,
        displacement.vector_at(cells.x0, cells.y0, cascade),
        displacement.vector_at(cells.x0, cells.y1, cascade),
        displacement.vector_at(cells.x1, cells.y0, cascade),
        displacement.vector_at(cells.x1, cells.y1, cascade),
        n,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn wrap_index_is_toroidal() {
        assert_eq!(wrap_index(-1, 64), 63);
        assert_eq!(wrap_index(64, 64), 0);
        assert_eq!(wrap_index(0, 64), 0);
        assert_eq!(wrap_index(63, 64), 63);
    }

    #[test]
    fn clamp_index_saturates() {
        assert_eq!(clamp_index(-5, 64), 0);
        assert_eq!(clamp_index(64, 64), 63);
        assert_eq!(clamp_index(70, 64), 63);
        assert_eq!(clamp_index(31, 64), 31);
    }

    #[test]
    fn bounding_cells_wrap_at_edges() {
        // u slightly above zero puts the lower bound one cell below zero.
        let cells = bounding_cells(0.001, 0.001, 64, true);
        assert_eq!(cells.x0, 63);
        assert_eq!(cells.x1, 0);
        assert_eq!(cells.y0, 63);
        assert_eq!(cells.y1, 0);

        let clamped = bounding_cells(0.001, 0.001, 64, false);
        assert_eq!(clamped.x0, 0);
        assert_eq!(clamped.x1, 0);
    }

    #[test]
    fn bilinear_at_cell_center_returns_corner_value() {
        let n = 64;
        // u such that u*N - 0.5 is exactly integral: zero interpolation.
        let u = 10.5 / n as f32;
        let v = 20.5 / n as f32;
        let v00 = Vec3::new(1.0, 2.0, 3.0);
        let other = Vec3::new(9.0, 9.0, 9.0);
        let out = bilinear(u, v, v00, other, other, other, n);
        assert_abs_diff_eq!(out.x, 1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(out.y, 2.0, epsilon = 1e-5);
        assert_abs_diff_eq!(out.z, 3.0, epsilon = 1e-5);
    }

    #[test]
    fn bilinear_midpoint_averages() {
        let n = 4;
        // fx = fy = 0.5 exactly.
        let u = 1.0 / n as f32;
        let v = 1.0 / n as f32;
        let out = bilinear(
            u,
            v,
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 4.0),
            Vec3::new(0.0, 0.0, 8.0),
            Vec3::new(0.0, 0.0, 12.0),
            n,
        );
        assert_abs_diff_eq!(out.z, 6.0, epsilon = 1e-5);
    }

    #[test]
    fn frac_handles_negative_inputs() {
        assert_abs_diff_eq!(frac(-0.25), 0.75, epsilon = 1e-6);
        assert_abs_diff_eq!(frac(3.25), 0.25, epsilon = 1e-6);
    }
}
