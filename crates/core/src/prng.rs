//! Random sources for pattern generation.
//!
//! [`Mulberry32`] is the deterministic source: a 32-bit state advanced with
//! wrapping `u32` arithmetic, so the same seed yields the same sequence of
//! `f64` values on every platform. [`ThreadRandom`] is the fallback used when
//! no seed is supplied. Both sit behind the [`RandomSource`] trait, which is
//! all the generator ever sees.

use rand::rngs::ThreadRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A stream of uniformly distributed `f64` values in [0, 1).
///
/// Draws take `&mut self`: a source has exactly one cursor and cannot be
/// advanced from two places at once.
pub trait RandomSource {
    /// Advances the stream and returns the next value in [0, 1).
    fn next_f64(&mut self) -> f64;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

/// Mulberry32 deterministic PRNG. Same seed always produces the same sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    /// Weyl increment added to the state on every draw.
    const INCREMENT: u32 = 0x6D2B_79F5;

    /// Creates a new PRNG whose state starts at `seed`.
    ///
    /// Unlike xorshift generators, zero is a valid seed: the state is
    /// incremented before mixing.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Creates a PRNG from any integer seed, keeping its low 32 bits.
    ///
    /// Two's-complement truncation is `seed mod 2^32`, so wide seeds such as
    /// millisecond timestamps and negative seeds map onto the same stream
    /// they would produce in 32-bit integer arithmetic.
    pub fn from_seed(seed: i64) -> Self {
        Self::new(seed as u32)
    }

    /// Advances the state and returns the next 32-bit output.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(Self::INCREMENT);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Returns a uniformly distributed f64 in [0, 1).
    ///
    /// The 32-bit output divided by 2^32; every value is exactly
    /// representable, so the result is bit-identical across platforms.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }
}

impl RandomSource for Mulberry32 {
    fn next_f64(&mut self) -> f64 {
        Mulberry32::next_f64(self)
    }
}

/// Non-deterministic source backed by the thread-local OS-seeded RNG.
///
/// Not `Send`: it is bound to the thread that created it.
#[derive(Debug, Clone, Default)]
pub struct ThreadRandom {
    rng: ThreadRng,
}

impl ThreadRandom {
    pub fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }
}

impl RandomSource for ThreadRandom {
    fn next_f64(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Picks the source for a generation call: seeded [`Mulberry32`] when a seed
/// is given, [`ThreadRandom`] otherwise.
pub fn random_source(seed: Option<i64>) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => Box::new(Mulberry32::from_seed(seed)),
        None => Box::new(ThreadRandom::new()),
    }
}
