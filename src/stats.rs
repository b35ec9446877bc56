// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! Statistical analysis of key batches.
//! Evaluators only borrow batches, they never keep or modify them.

use std::collections::HashMap;

use statrs::distribution::{ChiSquared, ContinuousCDF};

use crate::{
    error::{KeymixError, Result},
    utils,
};

pub const DEFAULT_BIAS_THRESHOLD_PCT: f64 = 5.0;

/// Bits of a key that carry entropy. Bit 0 is forced to 1 by generation.
pub const FREE_BITS: u64 = !1;

/// Set-bit frequency for one bit position.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BitPosition {
    /// 0 is the least significant bit.
    pub bit: u32,
    pub count: u64,
    pub pct: f64,
    pub biased: bool,
}

/// Per position set-bit frequencies of a batch.
/// Empty for an empty batch.
#[derive(Debug, Clone, PartialEq)]
pub struct BitDistribution {
    pub sample_size: usize,
    pub threshold_pct: f64,
    pub positions: Vec<BitPosition>,
}

impl BitDistribution {
    pub fn biased_positions(&self) -> Vec<u32> {
        self.positions
            .iter()
            .filter(|pos| pos.biased)
            .map(|pos| pos.bit)
            .collect()
    }

    pub fn is_balanced(&self) -> bool {
        self.positions.iter().all(|pos| !pos.biased)
    }

    /// Chi-squared test of all positions against a fair coin.
    pub fn p_value(&self) -> Option<f64> {
        self.p_value_excluding(&[])
    }

    /// Chi-squared test against a fair coin, skipping the listed positions.
    /// Useful for leaving out bits that are constant by construction.
    /// Returns None if no position is left or the batch is empty.
    pub fn p_value_excluding(&self, excluded: &[u32]) -> Option<f64> {
        if self.sample_size == 0 {
            return None;
        }
        let expected = self.sample_size as f64 / 2.0;
        // Variance of a binomial count with p = 0.5.
        let variance = self.sample_size as f64 / 4.0;
        let mut chi_squared = 0.0;
        let mut df = 0u32;
        for pos in self.positions.iter().filter(|pos| !excluded.contains(&pos.bit)) {
            chi_squared += (pos.count as f64 - expected).powi(2) / variance;
            df += 1;
        }
        if df == 0 {
            return None;
        }
        Some(1.0 - chi_squared_cdf(df, chi_squared)?)
    }
}

/// Duplicate statistics of a batch.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CollisionReport {
    pub distinct_count: usize,
    /// A value seen k times adds k - 1.
    pub collision_count: usize,
    pub collision_pct: f64,
}

/// Positional difference between two batches of equal length.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Divergence {
    pub compared: usize,
    pub differing_count: usize,
    pub divergence_pct: f64,
    /// Average Hamming distance of paired keys in percent of 64 bits.
    /// An ideal avalanche gives about 50.
    pub mean_bit_flip_pct: f64,
}

/// NIST SP 800-22 frequency (monobit) test result.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Monobit {
    /// Ones minus zeros over all tested bits.
    pub excess_ones: i64,
    pub p_value: f64,
}

/// CDF of the chi-squared distribution.
fn chi_squared_cdf(df: u32, chi_squared: f64) -> Option<f64> {
    let dist = ChiSquared::new(df as f64).ok()?;
    Some(dist.cdf(chi_squared))
}

fn validate_threshold(threshold_pct: f64) -> Result<()> {
    if threshold_pct.is_finite() && threshold_pct >= 0.0 {
        Ok(())
    } else {
        Err(KeymixError::InvalidThreshold(threshold_pct))
    }
}

/// Count set bits at every position and flag positions whose
/// frequency is more than `threshold_pct` percentage points away from 50%.
pub fn bit_distribution(batch: &[u64], threshold_pct: f64) -> Result<BitDistribution> {
    validate_threshold(threshold_pct)?;
    if batch.is_empty() {
        return Ok(BitDistribution {
            sample_size: 0,
            threshold_pct,
            positions: vec![],
        });
    }
    let mut counts = [0u64; 64];
    for &key in batch {
        for (bit, count) in counts.iter_mut().enumerate() {
            *count += (key >> bit) & 1;
        }
    }
    let positions = counts
        .iter()
        .enumerate()
        .map(|(bit, &count)| {
            let pct = utils::percentage(count as usize, batch.len());
            BitPosition {
                bit: bit as u32,
                count,
                pct,
                biased: (pct - 50.0).abs() > threshold_pct,
            }
        })
        .collect();
    Ok(BitDistribution {
        sample_size: batch.len(),
        threshold_pct,
        positions,
    })
}

/// Count repeated keys in a batch.
pub fn collisions(batch: &[u64]) -> CollisionReport {
    let mut frequency: HashMap<u64, u32> = HashMap::with_capacity(batch.len());
    for &key in batch {
        *frequency.entry(key).or_insert(0) += 1;
    }
    let collision_count = batch.len() - frequency.len();
    CollisionReport {
        distinct_count: frequency.len(),
        collision_count,
        collision_pct: utils::percentage(collision_count, batch.len()),
    }
}

/// Compare two batches index by index.
/// Intended for batches generated from adjacent seeds with the same parameters.
pub fn cross_seed_divergence(batch_a: &[u64], batch_b: &[u64]) -> Result<Divergence> {
    if batch_a.len() != batch_b.len() {
        return Err(KeymixError::LengthMismatch {
            left: batch_a.len(),
            right: batch_b.len(),
        });
    }
    let mut differing_count = 0usize;
    let mut flipped_bits = 0u64;
    for (a, b) in batch_a.iter().zip(batch_b.iter()) {
        let diff = a ^ b;
        if diff != 0 {
            differing_count += 1;
        }
        flipped_bits += diff.count_ones() as u64;
    }
    Ok(Divergence {
        compared: batch_a.len(),
        differing_count,
        divergence_pct: utils::percentage(differing_count, batch_a.len()),
        mean_bit_flip_pct: utils::percentage(flipped_bits as usize, batch_a.len() * 64),
    })
}

/// Measures the difference between the number of ones and zeros
/// in the bit positions selected by `mask`.
/// NIST Special Publication 800-22 Test 2.1
/// An empty batch or mask gives p = 1.
pub fn monobit(batch: &[u64], mask: u64) -> Monobit {
    let width = mask.count_ones() as i64;
    let mut excess_ones: i64 = 0;
    for &key in batch {
        excess_ones += 2 * (key & mask).count_ones() as i64 - width;
    }
    let num_bits = batch.len() as f64 * width as f64;
    if num_bits == 0.0 {
        return Monobit {
            excess_ones: 0,
            p_value: 1.0,
        };
    }
    let p_value = statrs::function::erf::erfc(
        (excess_ones.abs() as f64 / num_bits.sqrt()) * std::f64::consts::FRAC_1_SQRT_2,
    );
    Monobit {
        excess_ones,
        p_value,
    }
}
