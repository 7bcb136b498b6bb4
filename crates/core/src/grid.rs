//! Fixed-size multi-cascade grid storage.
//!
//! Every grid in the simulation is a square of side N per cascade, stored as
//! one contiguous allocation indexed `x + y * N + cascade * N * N`. Nothing
//! here is resized after construction; the per-frame passes mutate cells in
//! place.

use num_complex::Complex32;

/// World-space vector, `f32` components.
pub type Vec3 = nalgebra::Vector3<f32>;

/// Complex spectral value.
pub type Complex = Complex32;

/// Square per-cascade grid with a flat backing allocation.
#[derive(Debug, Clone)]
pub struct CascadeGrid<T> {
    data: Vec<T>,
    size: usize,
    cascades: usize,
}

impl<T: Copy + Default> CascadeGrid<T> {
    /// Create a grid of `size * size * cascades` default-valued cells.
    pub fn new(size: usize, cascades: usize) -> Self {
        Self {
            data: vec![T::default(); size * size * cascades],
            size,
            cascades,
        }
    }

    /// Grid side length N.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of cascades stacked in this grid.
    #[inline]
    pub fn cascades(&self) -> usize {
        self.cascades
    }

    /// Number of length-N rows across all cascades.
    #[inline]
    pub fn row_count(&self) -> usize {
        self.size * self.cascades
    }

    /// Flat index of cell `(x, y)` in `cascade`.
    ///
    /// # Panics
    ///
    /// Panics if any coordinate is out of bounds.
    #[inline]
    pub fn index(&self, x: usize, y: usize, cascade: usize) -> usize {
        assert!(
            x < self.size && y < self.size && cascade < self.cascades,
            "Grid coordinates out of bounds"
        );
        x + y * self.size + cascade * self.size * self.size
    }

    /// Value at cell `(x, y)` in `cascade`.
    #[inline]
    pub fn get(&self, x: usize, y: usize, cascade: usize) -> T {
        self.data[self.index(x, y, cascade)]
    }

    /// Set cell `(x, y)` in `cascade`.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, cascade: usize, value: T) {
        let idx = self.index(x, y, cascade);
        self.data[idx] = value;
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Overwrite every cell with `value`.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }
}

/// Static complex wave spectrum, populated once at initialization.
///
/// `positive` holds the positive-frequency coefficient h0(k); `negative`
/// holds the already-conjugated negative-frequency coefficient, so the
/// per-frame propagator only has to phase-rotate and sum the two.
#[derive(Debug, Clone)]
pub struct SpectrumTables {
    pub(crate) positive: CascadeGrid<Complex>,
    pub(crate) negative: CascadeGrid<Complex>,
}

impl SpectrumTables {
    pub fn new(size: usize, cascades: usize) -> Self {
        Self {
            positive: CascadeGrid::new(size, cascades),
            negative: CascadeGrid::new(size, cascades),
        }
    }
}

/// Time-evolved frequency-domain field, one complex grid per displacement
/// axis, plus back buffers used by the transform's transpose step.
#[derive(Debug, Clone)]
pub struct FrequencyFields {
    pub(crate) x: CascadeGrid<Complex>,
    pub(crate) y: CascadeGrid<Complex>,
    pub(crate) z: CascadeGrid<Complex>,
    pub(crate) back_x: CascadeGrid<Complex>,
    pub(crate) back_y: CascadeGrid<Complex>,
    pub(crate) back_z: CascadeGrid<Complex>,
}

impl FrequencyFields {
    pub fn new(size: usize, cascades: usize) -> Self {
        Self {
            x: CascadeGrid::new(size, cascades),
            y: CascadeGrid::new(size, cascades),
            z: CascadeGrid::new(size, cascades),
            back_x: CascadeGrid::new(size, cascades),
            back_y: CascadeGrid::new(size, cascades),
            back_z: CascadeGrid::new(size, cascades),
        }
    }

    /// Swap the front grids with their back buffers.
    pub(crate) fn swap(&mut self) {
        std::mem::swap(&mut self.x, &mut self.back_x);
        std::mem::swap(&mut self.y, &mut self.back_y);
        std::mem::swap(&mut self.z, &mut self.back_z);
    }
}

/// Real-valued spatial displacement result, one scalar grid per axis.
#[derive(Debug, Clone)]
pub struct DisplacementGrids {
    pub(crate) x: CascadeGrid<f32>,
    pub(crate) y: CascadeGrid<f32>,
    pub(crate) z: CascadeGrid<f32>,
}

impl DisplacementGrids {
    pub fn new(size: usize, cascades: usize) -> Self {
        Self {
            x: CascadeGrid::new(size, cascades),
            y: CascadeGrid::new(size, cascades),
            z: CascadeGrid::new(size, cascades),
        }
    }

    /// Displacement vector stored at cell `(x, y)` in `cascade`.
    #[inline]
    pub fn vector_at(&self, x: usize, y: usize, cascade: usize) -> Vec3 {
        Vec3::new(
            self.x.get(x, y, cascade),
            self.y.get(x, y, cascade),
            self.z.get(x, y, cascade),
        )
    }
}
