use noise::{NoiseFn, Perlin};
use super::error::ConfigError;
use super::offsets::NoiseOffset;
use super::stroke_transform::Point;

/// Largest displacement, in pixels, a noise sample can push a point on each axis.
pub const DISPLACEMENT: f64 = 10.0;

// Perlin output is nominally [-1, 1]; samples are remapped into [0, MAX_SAMPLE].
const MAX_SAMPLE: f64 = 1.0 - f64::EPSILON;

// Perlin hashes lattice corners modulo 256, so folding inputs into one period
// leaves the field unchanged and keeps the corner index inside `isize`.
const PERIOD: f64 = 256.0;

/// Per-axis factors converting canvas pixels into noise space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScaleFactors {
    pub x: f64,
    pub y: f64,
}

impl Default for ScaleFactors {
    fn default() -> Self {
        Self { x: 0.015, y: 0.02 }
    }
}

impl ScaleFactors {
    pub fn new(x: f64, y: f64) -> Result<Self, ConfigError> {
        if !(x.is_finite() && y.is_finite() && x > 0.0 && y > 0.0) {
            return Err(ConfigError::Scale([x, y]));
        }
        Ok(Self { x, y })
    }
}

/// Coherent 2D noise in [0, 1).
///
/// The Perlin permutation table is built from `seed` once and is read-only
/// afterwards, so a given field returns identical values for identical input
/// for as long as it lives.
#[derive(Clone, Debug)]
pub struct NoiseField {
    seed: u32,
    perlin: Perlin,
}

impl Default for NoiseField {
    fn default() -> Self {
        Self::new(1232)
    }
}

impl NoiseField {
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            perlin: Perlin::new(seed),
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Raw sample at noise-space coordinates.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        if !(x.is_finite() && y.is_finite()) {
            return 0.5;
        }
        let v = self.perlin.get([x.rem_euclid(PERIOD), y.rem_euclid(PERIOD)]);
        let n = if v.is_finite() { 0.5 * (v + 1.0) } else { 0.5 };
        n.clamp(0.0, MAX_SAMPLE)
    }

    /// Sample at a canvas point. The offset is added before scaling:
    /// `noise((x + offset) * sx, (y + offset) * sy)`.
    pub fn sample_at(&self, p: Point, offset: NoiseOffset, scale: ScaleFactors) -> f64 {
        let o = offset.value();
        self.sample((p.x + o) * scale.x, (p.y + o) * scale.y)
    }
}

/// Re-maps `value` from `[start1, stop1]` onto `[start2, stop2]` without clamping.
pub fn lerp(value: f64, start1: f64, stop1: f64, start2: f64, stop2: f64) -> f64 {
    start2 + (stop2 - start2) * ((value - start1) / (stop1 - start1))
}

/// Displacement applied to both axes of a point whose noise sample is `n`.
pub fn displacement(n: f64) -> f64 {
    lerp(n, 0.0, 1.0, -DISPLACEMENT, DISPLACEMENT).clamp(-DISPLACEMENT, DISPLACEMENT)
}
