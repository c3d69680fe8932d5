//! Random number sources split by role.
//!
//! `CosmeticRng` feeds anything allowed to vary run to run (league
//! sampling, stat noise, tournament byes). `ReproducibleRng` is seeded from
//! a stable identity key and drives anything whose output must repeat
//! exactly. The two are distinct types so one instance can never serve both
//! roles.

use hmac::{Hmac, Mac};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sha2::Sha256;

const FNV32_OFFSET: u32 = 0x811c_9dc5;
const FNV32_PRIME: u32 = 0x0100_0193;
const XORSHIFT_FALLBACK_STATE: u32 = 0x9e37_79b9;

/// 32-bit FNV-1a hash used to seed reproducible matchups.
#[must_use]
pub fn fnv1a32(bytes: &[u8]) -> u32 {
    let mut hash = FNV32_OFFSET;
    for b in bytes {
        hash = (hash ^ u32::from(*b)).wrapping_mul(FNV32_PRIME);
    }
    hash
}

/// Approximate standard normal draw via a sum of six uniforms, recentred and
/// scaled to unit variance.
pub fn gaussian<R: RngCore + ?Sized>(rng: &mut R) -> f64 {
    let sum: f64 = (0..6).map(|_| unit_f64(rng.next_u32())).sum();
    (sum - 3.0) * std::f64::consts::SQRT_2
}

/// Uniform draw in `[low, high)`.
pub fn uniform<R: RngCore + ?Sized>(rng: &mut R, low: f64, high: f64) -> f64 {
    (high - low).mul_add(unit_f64(rng.next_u32()), low)
}

/// Uniform index in `0..len`; returns 0 when `len` is 0.
pub fn index_below<R: RngCore + ?Sized>(rng: &mut R, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let len_u64 = u64::try_from(len).unwrap_or(u64::MAX);
    usize::try_from(u64::from(rng.next_u32()) % len_u64).unwrap_or(0)
}

fn unit_f64(sample: u32) -> f64 {
    f64::from(sample) / (f64::from(u32::MAX) + 1.0)
}

/// Generator for cosmetic variety; may differ between runs.
#[derive(Debug, Clone)]
pub struct CosmeticRng {
    rng: ChaCha8Rng,
    draws: u64,
}

impl CosmeticRng {
    /// Seed from operating-system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
            draws: 0,
        }
    }

    /// Construct from a user-visible seed so test runs and CLI sessions can
    /// replay the same cosmetic stream.
    #[must_use]
    pub fn from_user_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(derive_stream_seed(seed, b"cosmetic")),
            draws: 0,
        }
    }

    /// Number of draw calls performed against this stream.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }
}

impl RngCore for CosmeticRng {
    fn next_u32(&mut self) -> u32 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.draws = self.draws.saturating_add(1);
        self.rng.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// xorshift32 generator keyed by a stable identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReproducibleRng {
    state: u32,
}

impl ReproducibleRng {
    /// Seed directly from a 32-bit value. A zero seed would lock xorshift at
    /// zero forever, so it is replaced by a fixed non-zero state.
    #[must_use]
    pub const fn from_seed_u32(seed: u32) -> Self {
        let state = if seed == 0 {
            XORSHIFT_FALLBACK_STATE
        } else {
            seed
        };
        Self { state }
    }

    /// Seed from the FNV-1a hash of an identity key.
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        Self::from_seed_u32(fnv1a32(key.as_bytes()))
    }

    /// Seed for the ordered pair `a::b`.
    #[must_use]
    pub fn for_pair(a: &str, b: &str) -> Self {
        Self::from_key(&format!(
            "{a}{}{b}",
            crate::constants::MATCH_SEED_SEPARATOR
        ))
    }
}

impl RngCore for ReproducibleRng {
    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    fn next_u64(&mut self) -> u64 {
        let hi = u64::from(self.next_u32());
        let lo = u64::from(self.next_u32());
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

fn derive_stream_seed(user_seed: u64, domain_tag: &[u8]) -> u64 {
    // HMAC takes keys of any length, so the fallback is unreachable
    let Ok(mut mac) = Hmac::<Sha256>::new_from_slice(&user_seed.to_le_bytes()) else {
        return user_seed;
    };
    mac.update(domain_tag);
    let digest = mac.finalize().into_bytes();
    let mut seed_bytes = [0u8; 8];
    seed_bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(seed_bytes)
}
