//! # Noise Field
//!
//! A seeded wrapper around coherent noise sources. Every lookup is a pure
//! function of its inputs and the seed; there is no state to mutate after
//! construction, so two fields built from the same settings always agree.

use noise::{Fbm, MultiFractal, NoiseFn, Perlin, Simplex};

/// Base frequency applied to every lookup before the caller's multipliers.
pub const DEFAULT_NOISE_FREQUENCY: f64 = 0.01;
/// Octaves summed by [`NoiseField::sample_fractal_3d`] unless configured otherwise.
pub const DEFAULT_FRACTAL_OCTAVES: usize = 3;

/// Seeded 2D / 3D coherent noise returning values in `[-1, 1]`.
#[derive(Clone)]
pub struct NoiseField {
    frequency: f64,
    simplex: Simplex,
    fractal: Fbm<Perlin>,
}

impl NoiseField {
    /// Creates a field with the default frequency and fractal octave count.
    pub fn new(seed: u32) -> Self {
        Self::with_settings(seed, DEFAULT_NOISE_FREQUENCY, DEFAULT_FRACTAL_OCTAVES)
    }

    /// Creates a field with an explicit base frequency and fractal octave count.
    pub fn with_settings(seed: u32, frequency: f64, fractal_octaves: usize) -> Self {
        NoiseField {
            frequency,
            simplex: Simplex::new(seed),
            fractal: Fbm::<Perlin>::new(seed).set_octaves(fractal_octaves),
        }
    }

    /// Simplex noise at `(x, z)`.
    pub fn sample_2d(&self, x: f64, z: f64) -> f64 {
        let f = self.frequency;
        sanitize(self.simplex.get([x * f, z * f]))
    }

    /// Simplex noise at `(x, y, z)`.
    pub fn sample_3d(&self, x: f64, y: f64, z: f64) -> f64 {
        let f = self.frequency;
        sanitize(self.simplex.get([x * f, y * f, z * f]))
    }

    /// Fractal Brownian motion over Perlin noise at `(x, y, z)`, for rougher detail.
    pub fn sample_fractal_3d(&self, x: f64, y: f64, z: f64) -> f64 {
        let f = self.frequency;
        sanitize(self.fractal.get([x * f, y * f, z * f]))
    }
}

/// Clamps into `[-1, 1]` and maps non-finite output to zero.
#[inline]
fn sanitize(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}
