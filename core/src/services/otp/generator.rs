//! Passcode generation
//!
//! Every digit is drawn independently and uniformly from a cryptographically
//! secure source. `gen_range` uses rejection sampling, so no digit is favoured
//! the way `u32 % 10` would favour low digits.

use rand::rngs::{OsRng, StdRng};
use rand::{CryptoRng, Rng, RngCore, SeedableRng};
use std::sync::{Mutex, PoisonError};

/// Produce `length` decimal digits from `rng`
pub fn generate_code<R: RngCore + CryptoRng>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

/// Source of new passcodes
pub trait CodeGenerator: Send + Sync {
    fn generate(&self, length: usize) -> String;
}

/// Draws from the operating system CSPRNG on every call
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRngCodeGenerator;

impl CodeGenerator for OsRngCodeGenerator {
    fn generate(&self, length: usize) -> String {
        generate_code(&mut OsRng, length)
    }
}

/// ChaCha-backed generator with an explicit seed
///
/// Produces the same sequence for the same seed. Never use it for codes that
/// leave the process.
pub struct SeededCodeGenerator {
    rng: Mutex<StdRng>,
}

impl SeededCodeGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl CodeGenerator for SeededCodeGenerator {
    fn generate(&self, length: usize) -> String {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        generate_code(&mut *rng, length)
    }
}
