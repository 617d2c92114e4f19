//! Random sources used by the wiring generator
//!
//! Each worker draws from its own stream. With a fixed base seed and a fixed
//! worker count the edge set is bit-reproducible; changing the worker count
//! changes which stream serves which target, and therefore the edge set.

use crate::error::{ConnectError, Result};
use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};

/// Source of uniform random draws
pub trait RandomSource {
    /// Uniform integer in `[0, n)`; `n` must be non-zero
    fn draw_index(&mut self, n: usize) -> usize;

    /// Uniform float in `[0, 1)`
    fn draw_unit(&mut self) -> f64;

    /// Uniform float in `[low, high)` for finite `low <= high`
    ///
    /// Consumes exactly one [`draw_unit`](Self::draw_unit). Stays finite for
    /// bounds whose difference overflows; returns `low` when `low == high`.
    fn draw_uniform(&mut self, low: f64, high: f64) -> f64 {
        let u = self.draw_unit();
        let value = low * (1.0 - u) + high * u;
        if value < high {
            value.max(low)
        } else {
            low
        }
    }
}

impl<R: RngCore> RandomSource for R {
    fn draw_index(&mut self, n: usize) -> usize {
        self.gen_range(0..n)
    }

    fn draw_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// One random stream per worker
#[derive(Debug, Clone)]
pub struct RandomStreams<R> {
    streams: Vec<R>,
}

impl<R: RandomSource> RandomStreams<R> {
    /// Wrap caller-provided streams, one per worker in worker order
    pub fn from_streams(streams: Vec<R>) -> Self {
        Self { streams }
    }

    /// Number of streams
    pub fn len(&self) -> usize {
        self.streams.len()
    }

    /// True if there are no streams
    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }

    /// Stream of worker `index`
    pub fn stream_mut(&mut self, index: usize) -> Option<&mut R> {
        self.streams.get_mut(index)
    }

    pub(crate) fn check_workers(&self, num_workers: usize) -> Result<()> {
        if self.streams.len() != num_workers {
            return Err(ConnectError::invalid_config(format!(
                "{} random streams for {} workers",
                self.streams.len(),
                num_workers
            )));
        }
        Ok(())
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [R] {
        &mut self.streams
    }
}

impl RandomStreams<StdRng> {
    /// Seed worker `w`'s stream with `seed + w`
    pub fn seeded(seed: u64, num_workers: usize) -> Self {
        let streams = (0..num_workers as u64)
            .map(|w| StdRng::seed_from_u64(seed.wrapping_add(w)))
            .collect();
        Self { streams }
    }
}
