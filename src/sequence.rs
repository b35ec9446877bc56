// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! Key chain driven by repeated seed mutation.
//! Every key is derived from the current seed, then the seed is mutated:
//!     key_i = generate(scramble(seed_i, P), Q)
//!     seed_i+1 = mutate(seed_i, Q)

use rand::RngCore;

use crate::{mixer, params::KeyParams};

/// Generate the first `n` keys for parameters `p`, `q` starting at seed `s`.
/// Identical inputs always give identical output.
pub fn generate_batch(p: u64, q: u64, s: u64, n: u32) -> Vec<u64> {
    let keys: Vec<u64> = KeySequence::new(KeyParams::new(p, q), s)
        .take(n as usize)
        .collect();
    log::debug!(
        "generated {} keys (p={:#x}, q={:#x}, seed={:#018x})",
        keys.len(),
        p,
        q,
        s
    );
    keys
}

/// Infinite stream of keys for one parameter set.
/// Owns its seed; the value passed to `new` is copied.
/// Not `Copy`: an implicit copy would replay the same keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySequence {
    params: KeyParams,
    state: u64,
    guard_hits: u64,
}

impl KeySequence {
    pub fn new(params: KeyParams, seed: u64) -> Self {
        KeySequence {
            params,
            state: seed,
            guard_hits: 0,
        }
    }

    pub fn params(&self) -> KeyParams {
        self.params
    }

    /// Seed the next key will be derived from.
    pub fn state(&self) -> u64 {
        self.state
    }

    /// Number of times the zero guard replaced a mutated seed.
    pub fn guard_hits(&self) -> u64 {
        self.guard_hits
    }

    /// Generate a key and advance the seed one step.
    pub fn next_key(&mut self) -> u64 {
        let key = mixer::generate(mixer::scramble(self.state, self.params.p), self.params.q);
        self.step();
        key
    }

    /// Skip `delta` keys without generating them.
    /// Mutation has no shortcut, so this is O(delta).
    pub fn advance(&mut self, delta: usize) {
        for _ in 0..delta {
            self.step();
        }
    }

    /// Restart at `seed`, equivalent to replacing with `KeySequence::new(params, seed)`.
    pub fn reseed(&mut self, seed: u64) {
        self.state = seed;
        self.guard_hits = 0;
    }

    fn step(&mut self) {
        let (next, guarded) = mixer::mutate_with_guard(self.state, self.params.q);
        if guarded {
            self.guard_hits += 1;
            log::trace!(
                "zero guard hit at seed {:#018x}, continuing with {:#018x}",
                self.state,
                next
            );
        }
        self.state = next;
    }
}

impl Iterator for KeySequence {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        Some(self.next_key())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

/// Lets key chains stand in for any `rand` generator.
/// Note that the lowest bit of every u64 is set.
impl RngCore for KeySequence {
    fn next_u32(&mut self) -> u32 {
        self.next_key() as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next_key()
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(8) {
            let bytes = self.next_key().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}
