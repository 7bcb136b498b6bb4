//! Ocean Simulation Core Library
//!
//! A deterministic CPU implementation of FFT ocean surface synthesis.
//! Four wave cascades share one spectral grid size; each frame the static
//! Phillips spectrum is phase-rotated to the current time and run through a
//! separable inverse FFT to produce world-space displacement fields that can
//! be sampled anywhere on an endlessly tiling, exactly looping surface.
//!
//! ## Pipeline
//!
//! - Static spectrum built once from wind and cascade parameters
//! - Per-frame dispersion-based propagation, quantized for seamless looping
//! - Batch-parallel row/column inverse FFT over all cascades
//! - Bilinear wrap-around point sampling of the cached displacement

// Configuration and shared grid storage
pub mod config;
pub mod grid;

// Deterministic random source for spectrum generation
pub mod noise;

// Frequency-domain pipeline stages
pub mod fft;
mod propagate;
mod spectrum;

// Surface queries and the top-level facade
pub mod sampler;
pub mod simulation;

// Re-export the primary API surface
pub use config::{CascadeParams, OceanConfig, NUM_CASCADES};
pub use grid::{CascadeGrid, Vec3};
pub use noise::RandomSeries;
pub use simulation::OceanSimulation;
