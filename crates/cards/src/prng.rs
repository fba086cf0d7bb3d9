// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Seedable pseudo random number generator.
//!
//! [Prng] is a JKISS generator (see David Jones, "Good Practice in (Pseudo)
//! Random Number Generation for Bioinformatics Applications") that sums a
//! linear congruential, a xorshift and a multiply with carry generator. It is
//! fast, has a period of about 2^127, and a given seed always produces the
//! same sequence.
//!
//! Use a [Prng] instance where reproducibility matters, or the process wide
//! generator through [seed], [rand], [next_double] and [with_global]:
//!
//! ```
//! # use deckhand_cards::prng::{self, Prng};
//! let mut rng = Prng::new(42);
//! let v = rng.rand(6);
//! assert!(v < 6);
//! assert_eq!(Prng::new(42).rand(6), v);
//!
//! prng::seed(7);
//! assert!(prng::rand(52) < 52);
//! ```
use log::debug;
use parking_lot::Mutex;
use rand::{RngCore, SeedableRng};
use std::sync::LazyLock;

const DEFAULT_X: u32 = 123_456_789;
const DEFAULT_Y: u32 = 987_654_321;
const DEFAULT_Z: u32 = 43_219_876;
const DEFAULT_C: u32 = 6_543_217;

/// A JKISS pseudo random number generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prng {
    x: u32,
    y: u32,
    z: u32,
    c: u32,
}

impl Prng {
    /// Creates a generator with the given seed.
    ///
    /// A zero seed gets a seed from system entropy, any other value gives a
    /// reproducible sequence.
    pub fn new(seed: u32) -> Self {
        if seed == 0 {
            return Self::from_entropy();
        }

        Self {
            x: DEFAULT_X ^ (0x5A5A_5A5A & seed),
            y: DEFAULT_Y,
            z: DEFAULT_Z ^ (0xA5A5_A5A5 & seed),
            c: DEFAULT_C,
        }
    }

    /// Creates a generator seeded from system entropy.
    pub fn from_entropy() -> Self {
        let mut os = rand::rng();
        let words = [os.next_u32(), os.next_u32(), os.next_u32(), os.next_u32()];
        debug!("Seeded generator from system entropy");
        Self::from_words(words)
    }

    fn from_words([x, y, z, c]: [u32; 4]) -> Self {
        Self {
            x,
            // The xorshift state must never be zero.
            y: if y == 0 { DEFAULT_Y } else { y },
            z,
            // The carry must stay below the multiplier for a full period.
            c: c % 698_769_068 + 1,
        }
    }

    /// Returns a uniform integer in `[0, limit)`.
    ///
    /// Panics if `limit` is zero.
    pub fn rand(&mut self, limit: u32) -> u32 {
        below(self, limit)
    }

    /// Returns a uniform integer in `[0, limit)`.
    ///
    /// Panics if `limit` is zero.
    pub fn rand64(&mut self, limit: u64) -> u64 {
        below64(self, limit)
    }

    /// Returns a uniform double in `[0, 1)`.
    pub fn next_double(&mut self) -> f64 {
        // 52 random mantissa bits with the exponent of 1.0 give [1, 2).
        let bits = (self.next_u64() >> 12) | 0x3FF0_0000_0000_0000;
        f64::from_bits(bits) - 1.0
    }

    #[inline]
    fn step(&mut self) -> u32 {
        self.x = self.x.wrapping_mul(314_527_869).wrapping_add(1_234_567);

        self.y ^= self.y << 5;
        self.y ^= self.y >> 7;
        self.y ^= self.y << 22;

        let t = 4_294_584_393u64 * self.z as u64 + self.c as u64;
        self.c = (t >> 32) as u32;
        self.z = t as u32;

        self.x.wrapping_add(self.y).wrapping_add(self.z)
    }
}

impl Default for Prng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RngCore for Prng {
    fn next_u32(&mut self) -> u32 {
        self.step()
    }

    fn next_u64(&mut self) -> u64 {
        let hi = self.step() as u64;
        let lo = self.step() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(4) {
            let bytes = self.step().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

impl SeedableRng for Prng {
    type Seed = [u8; 16];

    fn from_seed(seed: Self::Seed) -> Self {
        let mut words = [0u32; 4];
        for (word, bytes) in words.iter_mut().zip(seed.chunks_exact(4)) {
            *word = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        }

        Self::from_words(words)
    }
}

/// Returns a uniform integer in `[0, limit)` from any generator.
///
/// Values are drawn from the smallest power of two range covering `limit`
/// and rejected until one falls below `limit`, so there is no modulo bias.
///
/// Panics if `limit` is zero.
pub fn below<R: RngCore + ?Sized>(rng: &mut R, limit: u32) -> u32 {
    assert!(limit > 0, "limit must be positive");

    let max = limit - 1;
    if max == 0 {
        return 0;
    }

    let mask = u32::MAX >> max.leading_zeros();
    loop {
        let v = rng.next_u32() & mask;
        if v < limit {
            return v;
        }
    }
}

/// Returns a uniform integer in `[0, limit)` from any generator.
///
/// Panics if `limit` is zero.
pub fn below64<R: RngCore + ?Sized>(rng: &mut R, limit: u64) -> u64 {
    assert!(limit > 0, "limit must be positive");

    let max = limit - 1;
    if max == 0 {
        return 0;
    }

    let mask = u64::MAX >> max.leading_zeros();
    loop {
        let v = rng.next_u64() & mask;
        if v < limit {
            return v;
        }
    }
}

static GLOBAL: LazyLock<Mutex<Prng>> = LazyLock::new(|| Mutex::new(Prng::from_entropy()));

/// Reseeds the process wide generator, zero seeds from system entropy.
pub fn seed(value: u32) {
    *GLOBAL.lock() = Prng::new(value);
}

/// Returns a uniform integer in `[0, limit)` from the process wide generator.
///
/// Panics if `limit` is zero.
pub fn rand(limit: u32) -> u32 {
    GLOBAL.lock().rand(limit)
}

/// Returns a uniform double in `[0, 1)` from the process wide generator.
pub fn next_double() -> f64 {
    GLOBAL.lock().next_double()
}

/// Calls `f` with exclusive access to the process wide generator.
pub fn with_global<T, F>(f: F) -> T
where
    F: FnOnce(&mut Prng) -> T,
{
    f(&mut GLOBAL.lock())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Prng::new(1234);
        let mut b = Prng::new(1234);
        let mut c = Prng::new(4321);

        let va = (0..100).map(|_| a.next_u32()).collect::<Vec<_>>();
        let vb = (0..100).map(|_| b.next_u32()).collect::<Vec<_>>();
        let vc = (0..100).map(|_| c.next_u32()).collect::<Vec<_>>();

        assert_eq!(va, vb);
        assert_ne!(va, vc);
    }

    #[test]
    fn rand_in_range() {
        let mut rng = Prng::new(99);
        for limit in [1, 2, 3, 7, 52, 1000, 65_537, u32::MAX] {
            for _ in 0..1000 {
                assert!(rng.rand(limit) < limit);
            }
        }

        for limit in [1u64, 5, 2_598_960, 133_784_560, u64::MAX] {
            for _ in 0..1000 {
                assert!(rng.rand64(limit) < limit);
            }
        }

        assert_eq!(rng.rand(1), 0);
    }

    #[test]
    #[should_panic]
    fn rand_zero_limit() {
        Prng::new(1).rand(0);
    }

    #[test]
    fn rand_is_balanced() {
        // Chi-square over 10 buckets with 9 degrees of freedom, 27.88 is the
        // critical value at p = 0.001.
        const BUCKETS: usize = 10;
        const SAMPLES: usize = 100_000;

        let mut rng = Prng::new(2025);
        let mut counts = [0usize; BUCKETS];
        for _ in 0..SAMPLES {
            counts[rng.rand(BUCKETS as u32) as usize] += 1;
        }

        let expected = (SAMPLES / BUCKETS) as f64;
        let chi2 = counts
            .iter()
            .map(|&c| (c as f64 - expected).powi(2) / expected)
            .sum::<f64>();
        assert!(chi2 < 27.88, "chi2 = {chi2}");
    }

    #[test]
    fn next_double_in_unit_interval() {
        let mut rng = Prng::new(5);
        let mut sum = 0.0;
        for _ in 0..10_000 {
            let d = rng.next_double();
            assert!((0.0..1.0).contains(&d));
            sum += d;
        }

        let mean = sum / 10_000.0;
        assert!((mean - 0.5).abs() < 0.02, "mean = {mean}");
    }

    #[test]
    fn seeded_from_bytes() {
        let mut a = Prng::from_seed([7; 16]);
        let mut b = Prng::from_seed([7; 16]);
        assert_eq!(a.next_u64(), b.next_u64());

        let mut buf = [0u8; 7];
        a.fill_bytes(&mut buf);
        let mut other = [0u8; 7];
        b.fill_bytes(&mut other);
        assert_eq!(buf, other);

        // A zero xorshift word is replaced so the generator keeps running.
        let mut z = Prng::from_seed([0; 16]);
        let v = (0..4).map(|_| z.next_u32()).collect::<Vec<_>>();
        assert!(v.iter().any(|&x| x != 0));
    }

    #[test]
    fn global_generator() {
        with_global(|rng| {
            *rng = Prng::new(77);
            let v = rng.rand(100);
            *rng = Prng::new(77);
            assert_eq!(rng.rand(100), v);
        });

        assert!(rand(10) < 10);
        assert!((0.0..1.0).contains(&next_double()));
    }
}
