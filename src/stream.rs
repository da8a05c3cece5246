//! Per-island pseudorandom streams.
//!
//! Island `r` of a run with seed `s` and width `w` walks the counter values
//! `i32::MIN + s + r + k*w`. Distinct ranks fall in distinct residue classes
//! mod `w`, so two islands never draw from the same counter value.

use fastrand::Rng;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RngStream {
    counter: i64,
    origin: i64,
    stride: i64,
}

impl RngStream {
    pub fn new(run_seed: i32, flat_rank: usize, width: usize) -> Self {
        let island_seed = run_seed as i64 + flat_rank as i64;
        let origin = i32::MIN as i64 + island_seed;
        Self {
            counter: origin,
            origin,
            stride: width.max(1) as i64,
        }
    }

    #[inline]
    pub fn counter(&self) -> i64 {
        self.counter
    }

    /// Generator for the current counter value, then steps the counter.
    pub fn draw(&mut self) -> Rng {
        let rng = Rng::with_seed(self.counter as u64);
        self.advance();
        rng
    }

    /// Steps by the run width; past `i32::MAX` the counter restarts at the origin.
    pub fn advance(&mut self) {
        self.counter += self.stride;
        if self.counter > i32::MAX as i64 {
            self.counter = self.origin;
        }
    }
}
