// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! Wall clock speed of key generation.
//! Measurements never influence generated values.

use std::{
    hint::black_box,
    time::{Duration, Instant},
};

use rand::{rngs::StdRng, RngCore, SeedableRng};

use crate::{
    error::{KeymixError, Result},
    params::KeyParams,
    sequence,
};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Throughput {
    pub trials: u32,
    pub batch_size: u32,
    pub avg_duration_per_trial: Duration,
    /// Zero when `batch_size` is zero.
    pub avg_duration_per_key: Duration,
}

impl Throughput {
    fn from_total(total: Duration, trials: u32, batch_size: u32) -> Self {
        let avg_duration_per_trial = total / trials;
        let avg_duration_per_key = if batch_size == 0 {
            Duration::ZERO
        } else {
            avg_duration_per_trial / batch_size
        };
        Throughput {
            trials,
            batch_size,
            avg_duration_per_trial,
            avg_duration_per_key,
        }
    }

    pub fn keys_per_second(&self) -> f64 {
        let secs = self.avg_duration_per_trial.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.batch_size as f64 / secs
        }
    }

    /// Speed relative to `reference` in percent.
    pub fn relative_to(&self, reference: &Throughput) -> f64 {
        let reference_speed = reference.keys_per_second();
        if reference_speed == 0.0 {
            0.0
        } else {
            self.keys_per_second() / reference_speed * 100.0
        }
    }
}

/// Run `f` `trials` times and average the elapsed time.
fn time_trials(trials: u32, batch_size: u32, mut f: impl FnMut()) -> Result<Throughput> {
    if trials == 0 {
        return Err(KeymixError::ZeroTrials);
    }
    let mut total = Duration::ZERO;
    for _ in 0..trials {
        let start = Instant::now();
        f();
        total += start.elapsed();
    }
    let throughput = Throughput::from_total(total, trials, batch_size);
    log::debug!(
        "{} trials of {} keys: {:?} per trial",
        trials,
        batch_size,
        throughput.avg_duration_per_trial
    );
    Ok(throughput)
}

/// Time `trials` calls of `generate_batch` with batch size `n`.
pub fn measure_throughput(params: KeyParams, seed: u64, n: u32, trials: u32) -> Result<Throughput> {
    time_trials(trials, n, || {
        black_box(sequence::generate_batch(
            black_box(params.p),
            black_box(params.q),
            black_box(seed),
            n,
        ));
    })
}

/// Time the rand crates default RNG producing `n` u64 per trial,
/// as a baseline for `measure_throughput`.
pub fn reference_throughput(n: u32, trials: u32) -> Result<Throughput> {
    let mut rng = StdRng::seed_from_u64(0);
    time_trials(trials, n, || {
        let batch: Vec<u64> = (0..n).map(|_| rng.next_u64()).collect();
        black_box(batch);
    })
}
