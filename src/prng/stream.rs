use hmac::{Hmac, Mac};
use sha2::Sha512;

type HmacSha512 = Hmac<Sha512>;

/// Seed used when the caller supplies none. Public by construction.
pub const PUBLIC_SEED: &[u8] = b"";

const WORDS_PER_POOL: usize = 8;

/// Deterministic, keyed, infinite stream of `u64` values.
///
/// The stream starts from `pool = HMAC-SHA512(key = seed, message = input)` and yields the eight
/// little-endian words of the pool in order. Once they are consumed the pool is re-derived as
/// `HMAC-SHA512(key = seed, message = pool)`.
///
/// Identical `(input, seed)` pairs always produce the identical sequence. This is an expansion
/// function for picking parts, not a general purpose or cryptographically secure RNG.
#[derive(Clone)]
pub struct RandomStream {
    keyed: HmacSha512,
    pool: [u8; 64],
    cursor: usize,
}

impl RandomStream {
    /// Create a stream from raw input bytes and a seed.
    pub fn new(input: &[u8], seed: &[u8]) -> Self {
        let keyed = HmacSha512::new_from_slice(seed).expect("HMAC accepts keys of any length");
        let mut out = Self {
            keyed,
            pool: [0u8; 64],
            cursor: 0,
        };
        out.pool = out.digest(input);
        out
    }

    /// Create a stream keyed with [`PUBLIC_SEED`].
    pub fn with_public_seed(input: &[u8]) -> Self {
        Self::new(input, PUBLIC_SEED)
    }

    /// Produce the next value of the stream.
    pub fn next_u64(&mut self) -> u64 {
        if self.cursor == WORDS_PER_POOL {
            self.pool = self.digest(&self.pool);
            self.cursor = 0;
        }
        let start = self.cursor * 8;
        let mut word = [0u8; 8];
        word.copy_from_slice(&self.pool[start..start + 8]);
        self.cursor += 1;
        u64::from_le_bytes(word)
    }

    fn digest(&self, message: &[u8]) -> [u8; 64] {
        let mut mac = self.keyed.clone();
        mac.update(message);
        let mut out = [0u8; 64];
        out.copy_from_slice(&mac.finalize().into_bytes());
        out
    }
}

impl std::fmt::Debug for RandomStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RandomStream")
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}

impl Iterator for RandomStream {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        Some(self.next_u64())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/prng/stream.rs"]
mod tests;
