//! Separable inverse Fourier transform engine.
//!
//! Converts the complex frequency-domain field into real spatial
//! displacement via a 2D inverse DFT, computed as two 1D passes: every row,
//! then every column (realized as a parallel transpose followed by a second
//! row pass, so both passes write contiguous, disjoint chunks). Each 1D line
//! is a radix-2 Stockham butterfly, O(N log N). The formulation is
//! autosorting, with no bit-reversal step, which is what makes the
//! ping-pong scratch pair necessary.
//!
//! # Concurrency
//!
//! Rows are partitioned into contiguous batches executed under rayon's
//! fork-join. Each worker initializes a private [`PingPong`] scratch and
//! reuses it for every line it processes; the grids are written disjointly
//! by row chunk. The row pass joins completely before the transpose, and
//! the transpose before the column pass; both are true data dependencies.
//!
//! # Normalization
//!
//! Each 1D pass scales by `1/N`, so the full 2D transform applies the exact
//! inverse-DFT constant `1/N²` and displacement keeps the spectrum's
//! physical amplitude units. Because wave vectors are stored offset by N/2,
//! the spatial result carries a `(-1)^(x+y)` shift factor; it is folded into
//! the final write-out.

use rayon::prelude::*;
use std::f32::consts::TAU;

use crate::grid::{CascadeGrid, Complex, DisplacementGrids, FrequencyFields};

/// Worker-local scratch pair for the Stockham butterfly stages.
///
/// Allocated once per worker via `for_each_init` and never shared between
/// concurrently executing workers; contents are fully overwritten on every
/// line, so reuse across lines needs no reset.
#[derive(Debug)]
pub struct PingPong {
    ping: Vec<Complex>,
    pong: Vec<Complex>,
}

impl PingPong {
    /// Scratch sized for lines of length `n`.
    pub fn new(n: usize) -> Self {
        Self {
            ping: vec![Complex::new(0.0, 0.0); n],
            pong: vec![Complex::new(0.0, 0.0); n],
        }
    }
}

/// In-place inverse DFT of one line, scaled by `1/N`.
///
/// Radix-2 decimation Stockham formulation: every butterfly stage reads one
/// scratch buffer and writes the other, halving the sub-transform length and
/// doubling the stride, with the positive-sign twiddle of the inverse
/// transform. Output is in natural order.
///
/// # Panics
///
/// Panics (debug) if the line length is not a power of two.
pub fn inverse_fft_line(line: &mut [Complex], scratch: &mut PingPong) {
    let n = line.len();
    debug_assert!(n.is_power_of_two(), "line length must be a power of two");

    scratch.ping[..n].copy_from_slice(line);
    let mut src: &mut [Complex] = &mut scratch.ping;
    let mut dst: &mut [Complex] = &mut scratch.pong;

    let mut len = n;
    let mut stride = 1;
    while len > 1 {
        let half = len / 2;
        let theta = TAU / len as f32;
        for p in 0..half {
            let (sin, cos) = (theta * p as f32).sin_cos();
            let twiddle = Complex::new(cos, sin);
            for q in 0..stride {
                let a = src[q + stride * p];
                let b = src[q + stride * (p + half)];
                dst[q + stride * 2 * p] = a + b;
                dst[q + stride * (2 * p + 1)] = (a - b) * twiddle;
            }
        }
        len = half;
        stride *= 2;
        std::mem::swap(&mut src, &mut dst);
    }

    let norm = 1.0 / n as f32;
    for (out, value) in line.iter_mut().zip(src.iter()) {
        *out = *value * norm;
    }
}

/// One full 1D pass: inverse-transform every row of all three axis grids.
fn row_pass(fields: &mut FrequencyFields, n: usize, batch_rows: usize) {
    let chunk = batch_rows * n;
    fields
        .x
        .as_mut_slice()
        .par_chunks_mut(chunk)
        .zip(fields.y.as_mut_slice().par_chunks_mut(chunk))
        .zip(fields.z.as_mut_slice().par_chunks_mut(chunk))
        .for_each_init(
            || PingPong::new(n),
            |scratch, ((batch_x, batch_y), batch_z)| {
                for batch in [batch_x, batch_y, batch_z] {
                    for line in batch.chunks_mut(n) {
                        inverse_fft_line(line, scratch);
                    }
                }
            },
        );
}

/// Transpose each cascade plane of `src` into `dst` (rows become columns).
fn transpose_into(src: &CascadeGrid<Complex>, dst: &mut CascadeGrid<Complex>, batch_rows: usize) {
    let n = src.size();
    let chunk = batch_rows * n;
    let data = src.as_slice();
    dst.as_mut_slice()
        .par_chunks_mut(chunk)
        .enumerate()
        .for_each(|(batch, out)| {
            for (row, line) in out.chunks_mut(n).enumerate() {
                let global_row = batch * batch_rows + row;
                let cascade = global_row / n;
                let column = global_row % n;
                let plane = cascade * n * n;
                for (j, cell) in line.iter_mut().enumerate() {
                    *cell = data[plane + j * n + column];
                }
            }
        });
}

/// Final write-out: take real parts into the displacement grids, applying
/// the `(-1)^(x+y)` spectrum-shift sign and the configured unit scale.
///
/// After the transpose the column-transformed value for spatial cell
/// `(x, y)` sits at transposed index `y + x·N`, which this pass reads back
/// into row-major displacement order.
fn write_displacement(
    fields: &FrequencyFields,
    displacement: &mut DisplacementGrids,
    batch_rows: usize,
    scale: f32,
) {
    let n = fields.z.size();
    let chunk = batch_rows * n;
    let src_x = fields.x.as_slice();
    let src_y = fields.y.as_slice();
    let src_z = fields.z.as_slice();

    displacement
        .x
        .as_mut_slice()
        .par_chunks_mut(chunk)
        .zip(displacement.y.as_mut_slice().par_chunks_mut(chunk))
        .zip(displacement.z.as_mut_slice().par_chunks_mut(chunk))
        .enumerate()
        .for_each(|(batch, ((out_x, out_y), out_z))| {
            for row in 0..batch_rows {
                let global_row = batch * batch_rows + row;
                let cascade = global_row / n;
                let y = global_row % n;
                let plane = cascade * n * n;
                for x in 0..n {
                    let src = plane + y + x * n;
                    let sign = if (x + y) & 1 == 1 { -scale } else { scale };
                    let local = row * n + x;
                    out_x[local] = src_x[src].re * sign;
                    out_y[local] = src_y[src].re * sign;
                    out_z[local] = src_z[src].re * sign;
                }
            }
        });
}

/// Run the full separable 2D inverse transform for every cascade.
///
/// Consumes the frequency-domain field in `fields` (it is left in the
/// transposed intermediate state) and writes spatial displacement.
pub(crate) fn transform(
    fields: &mut FrequencyFields,
    displacement: &mut DisplacementGrids,
    batch_rows: usize,
    scale: f32,
) {
    let n = fields.z.size();
    row_pass(fields, n, batch_rows);

    transpose_into(&fields.x, &mut fields.back_x, batch_rows);
    transpose_into(&fields.y, &mut fields.back_y, batch_rows);
    transpose_into(&fields.z, &mut fields.back_z, batch_rows);
    fields.swap();

    // Second row pass over the transposed layout is the column transform.
    row_pass(fields, n, batch_rows);

    write_displacement(fields, displacement, batch_rows, scale);
}
