// Noise Sources
// Random perturbation used by the heuristic scorers, kept behind a trait so
// callers choose between deterministic and randomized scoring.

use rand::Rng;

/// Supplies uniform draws in `[0, 1)`.
pub trait NoiseSource: Send + Sync {
    fn unit(&self) -> f64;

    /// Uniform draw in `[-half_width, half_width)`.
    fn symmetric(&self, half_width: f64) -> f64 {
        (self.unit() - 0.5) * 2.0 * half_width
    }

    /// Uniform draw in `[lo, hi)`.
    fn range(&self, lo: f64, hi: f64) -> f64 {
        lo + self.unit() * (hi - lo)
    }
}

/// Deterministic source: every draw lands on the midpoint of its range.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoNoise;

impl NoiseSource for NoNoise {
    fn unit(&self) -> f64 {
        0.5
    }
}

/// Thread-local RNG backed source.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomNoise;

impl NoiseSource for RandomNoise {
    fn unit(&self) -> f64 {
        rand::rng().random::<f64>()
    }
}

/// Pins every draw to one value. Used to probe the edges of a noise band.
#[derive(Debug, Clone, Copy)]
pub struct FixedNoise(pub f64);

impl NoiseSource for FixedNoise {
    fn unit(&self) -> f64 {
        // Keep the draw inside [0, 1)
        self.0.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

pub fn noise_for(jitter: bool) -> std::sync::Arc<dyn NoiseSource> {
    if jitter {
        std::sync::Arc::new(RandomNoise)
    } else {
        std::sync::Arc::new(NoNoise)
    }
}
