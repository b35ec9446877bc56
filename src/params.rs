// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! Key chain parameters and diagnostics on them.

use std::fmt;

use crate::sequence::{self, KeySequence};

/// Default diffusion parameter.
pub const DEFAULT_P: u64 = 19;
/// Default multiplier parameter (2**64 - 83, prime).
pub const DEFAULT_Q: u64 = 18446744073709551533;
/// Default seed.
pub const DEFAULT_SEED: u64 = 12345678901234567890;

/// Diffusion parameter `p` and multiplier parameter `q` of a key chain.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct KeyParams {
    pub p: u64,
    pub q: u64,
}

impl Default for KeyParams {
    fn default() -> Self {
        KeyParams {
            p: DEFAULT_P,
            q: DEFAULT_Q,
        }
    }
}

/// Properties of a parameter pair that weaken the chain.
/// Generation still works with any of these present.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ParamWarning {
    /// `q` is even, the multiply step uses `q | 1` instead.
    EvenMultiplier,
    /// `q | 1 == 1`, the multiply step is the identity.
    IdentityMultiplier,
    /// `p == 0`, scramble reduces to rotations of the seed.
    ZeroDiffusion,
}

impl fmt::Display for ParamWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamWarning::EvenMultiplier => write!(f, "q is even, multiplier forced to q | 1"),
            ParamWarning::IdentityMultiplier => {
                write!(f, "multiplier q | 1 is 1, multiply step has no effect")
            }
            ParamWarning::ZeroDiffusion => write!(f, "p is 0, scramble only rotates the seed"),
        }
    }
}

impl KeyParams {
    pub fn new(p: u64, q: u64) -> Self {
        KeyParams { p, q }
    }

    /// The multiplier actually applied by generate and mutate.
    pub fn multiplier(&self) -> u64 {
        self.q | 1
    }

    /// Check for weak parameter choices and log each one.
    pub fn check(&self) -> Vec<ParamWarning> {
        let mut warnings = vec![];
        if self.q & 1 == 0 {
            warnings.push(ParamWarning::EvenMultiplier);
        }
        if self.multiplier() == 1 {
            warnings.push(ParamWarning::IdentityMultiplier);
        }
        if self.p == 0 {
            warnings.push(ParamWarning::ZeroDiffusion);
        }
        for warning in &warnings {
            log::warn!("weak parameters (p={:#x}, q={:#x}): {}", self.p, self.q, warning);
        }
        warnings
    }

    /// Key stream starting at `seed`.
    pub fn sequence(&self, seed: u64) -> KeySequence {
        KeySequence::new(*self, seed)
    }

    /// First `n` keys of the stream starting at `seed`.
    pub fn batch(&self, seed: u64, n: u32) -> Vec<u64> {
        sequence::generate_batch(self.p, self.q, seed, n)
    }
}

/// Modular multiplication without overflow.
fn mul_mod(a: u64, b: u64, m: u64) -> u64 {
    ((a as u128 * b as u128) % m as u128) as u64
}

fn pow_mod(mut base: u64, mut exp: u64, m: u64) -> u64 {
    let mut result = 1u64;
    base %= m;
    while exp > 0 {
        if exp & 1 == 1 {
            result = mul_mod(result, base, m);
        }
        base = mul_mod(base, base, m);
        exp >>= 1;
    }
    result
}

/// Deterministic Miller-Rabin primality test.
/// The first 12 primes as witnesses are sufficient for every u64.
/// Informational only, the key chain never requires a prime `q`.
pub fn is_prime(n: u64) -> bool {
    const WITNESSES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];
    if n < 2 {
        return false;
    }
    for &w in WITNESSES.iter() {
        if n % w == 0 {
            return n == w;
        }
    }
    let s = (n - 1).trailing_zeros();
    let d = (n - 1) >> s;
    'witness: for &a in WITNESSES.iter() {
        let mut x = pow_mod(a, d, n);
        if x == 1 || x == n - 1 {
            continue;
        }
        for _ in 1..s {
            x = mul_mod(x, x, n);
            if x == n - 1 {
                continue 'witness;
            }
        }
        return false;
    }
    true
}
