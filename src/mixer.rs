// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! Bit diffusion primitives driving the key chain.
//! All functions are total over u64 and use wrapping arithmetic.
//!
//! Pipeline for one key:
//!     seed --scramble(P)--> embryo --generate(Q)--> key
//!     seed --mutate(Q)--> next seed

/// Rounds of Newton iteration needed for an inverse modulo 2**64.
/// Each round doubles the number of correct low bits (3 -> 6 -> ... -> 192).
const INVERSE_ROUNDS: usize = 6;

/// Spread the bits of `p` over the seed word.
pub const fn scramble(seed: u64, p: u64) -> u64 {
    let mut embryo = seed ^ (p << 17);
    embryo = embryo.rotate_right(13);
    embryo ^= p >> 5;
    embryo ^= p << 29;
    embryo = embryo.rotate_left(7);
    embryo ^= p >> 11;
    embryo ^= p << 19;
    embryo = embryo.rotate_right(23);
    embryo ^= p >> 3;
    embryo
}

/// Turn an embryo into a key.
/// The lowest bit of the result is always set, so keys are odd
/// and this step is not invertible.
pub const fn generate(embryo: u64, q: u64) -> u64 {
    let mut key = embryo ^ q;
    key = key.rotate_left(19);
    key = key.wrapping_add(q);
    key ^= q << 31;
    key = key.rotate_right(11);
    key = key.wrapping_mul(q | 1);
    key | 1
}

/// Seed mutation without the zero guard.
/// This is a bijection on u64 for every `q`, see [`unmutate`].
pub const fn mutate_unguarded(seed: u64, q: u64) -> u64 {
    let mut next = seed ^ (q << 17);
    next = next.rotate_left(13);
    next = next.wrapping_add(q);
    next ^= q >> 7;
    next = next.rotate_right(19);
    next.wrapping_mul(q | 1)
}

/// Advance a seed one step.
/// A zero result is replaced with `!q`.
pub const fn mutate(seed: u64, q: u64) -> u64 {
    mutate_with_guard(seed, q).0
}

/// Same as [`mutate`] but also reports whether the zero guard fired.
pub const fn mutate_with_guard(seed: u64, q: u64) -> (u64, bool) {
    let next = mutate_unguarded(seed, q);
    if next == 0 {
        (!q, true)
    } else {
        (next, false)
    }
}

/// Inverse of [`mutate_unguarded`] for the same `q`.
pub const fn unmutate(next: u64, q: u64) -> u64 {
    let mut seed = next.wrapping_mul(odd_inverse(q | 1));
    seed = seed.rotate_left(19);
    seed ^= q >> 7;
    seed = seed.wrapping_sub(q);
    seed = seed.rotate_right(13);
    seed ^ (q << 17)
}

/// The single seed whose unguarded mutation is zero for this `q`.
/// Feeding it to [`mutate`] always triggers the zero guard.
pub const fn degenerate_seed(q: u64) -> u64 {
    unmutate(0, q)
}

/// Multiplicative inverse of `m` modulo 2**64.
/// Only defined for odd `m`; the lowest bit is forced on.
pub const fn odd_inverse(m: u64) -> u64 {
    let m = m | 1;
    // m * m == 1 mod 8 for every odd m, so m is its own inverse on the low 3 bits.
    let mut inv = m;
    let mut round = 0;
    while round < INVERSE_ROUNDS {
        inv = inv.wrapping_mul(2u64.wrapping_sub(m.wrapping_mul(inv)));
        round += 1;
    }
    inv
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    const P: u64 = 19;
    const Q: u64 = 18446744073709551533;
    const S: u64 = 12345678901234567890;

    #[test]
    fn first_key_matches_reference() {
        assert_eq!(generate(scramble(S, P), Q), 0x4ced939d78c5a45f);
    }

    #[test]
    fn zero_inputs() {
        assert_eq!(scramble(0, 0), 0);
        assert_eq!(generate(0, 0), 1);
        // 0 is a fixed point of the unguarded chain when q == 0.
        assert_eq!(mutate_unguarded(0, 0), 0);
        assert_eq!(mutate(0, 0), u64::MAX);
    }

    #[test]
    fn keys_are_odd() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10_000 {
            let embryo: u64 = rng.random();
            let q: u64 = rng.random();
            assert_eq!(generate(embryo, q) & 1, 1);
        }
    }

    #[test]
    fn even_q_uses_next_odd_multiplier() {
        // generate and mutate only differ from q | 1 through the multiply step.
        let embryo: u64 = 0x0123_4567_89ab_cdef;
        let q: u64 = 0x1000;
        let mut expected = (embryo ^ q).rotate_left(19).wrapping_add(q);
        expected ^= q << 31;
        expected = expected.rotate_right(11).wrapping_mul(q + 1) | 1;
        assert_eq!(generate(embryo, q), expected);
    }

    #[test]
    fn unmutate_inverts_mutation() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..10_000 {
            let seed: u64 = rng.random();
            let q: u64 = rng.random();
            assert_eq!(unmutate(mutate_unguarded(seed, q), q), seed);
            assert_eq!(mutate_unguarded(unmutate(seed, q), q), seed);
        }
    }

    #[test]
    fn odd_inverse_is_inverse() {
        let mut rng = StdRng::seed_from_u64(3);
        for m in [1u64, 3, 5, u64::MAX, Q] {
            assert_eq!(m.wrapping_mul(odd_inverse(m)), 1);
        }
        for _ in 0..10_000 {
            let m: u64 = rng.random::<u64>() | 1;
            assert_eq!(m.wrapping_mul(odd_inverse(m)), 1);
        }
    }

    #[test]
    fn degenerate_seed_triggers_guard() {
        for q in [Q, 0, 1, 2, 0xdead_beef, u64::MAX] {
            let seed = degenerate_seed(q);
            assert_eq!(mutate_unguarded(seed, q), 0);
            assert_eq!(mutate_with_guard(seed, q), (!q, true));
        }
        assert_eq!(degenerate_seed(Q), 0xfd6f_efff_ff5a_0000);
        assert_eq!(mutate(degenerate_seed(Q), Q), 0x52);
    }

    #[test]
    fn guard_is_silent_elsewhere() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..1000 {
            let seed: u64 = rng.random();
            let (next, guarded) = mutate_with_guard(seed, Q);
            assert!(!guarded);
            assert_eq!(next, mutate_unguarded(seed, Q));
        }
    }
}
