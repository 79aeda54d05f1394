//! Random sources for the non-deterministic instruction family.
//!
//! The machine draws uniform values in `[0, 1)` from a [`RandomSource`]
//! trait object, so tests can swap the default seeded generator for a
//! scripted sequence and make randomized instructions fully deterministic.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A sequential stream of uniform draws in `[0, 1)`.
pub trait RandomSource {
    /// The next uniform value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;
}

/// The default source, backed by a seedable PRNG.
pub struct SeededSource {
    rng: StdRng,
}

impl SeededSource {
    /// A source with a fixed seed, for reproducible runs.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// A source seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl RandomSource for SeededSource {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen()
    }
}

/// A source that replays a fixed sequence of values, cycling when it runs
/// out. Intended for tests that pin exactly which branch a randomized
/// instruction takes.
pub struct ScriptedSource {
    values: Vec<f64>,
    next: usize,
}

impl ScriptedSource {
    /// Replay `values` in order, cycling. An empty script replays zero.
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, next: 0 }
    }
}

impl RandomSource for ScriptedSource {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        value
    }
}
