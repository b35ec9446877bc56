// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! Runtime configuration of the self-test.

use std::path::PathBuf;

use crate::{
    error::{KeymixError, Result},
    params::{KeyParams, DEFAULT_SEED},
    stats::DEFAULT_BIAS_THRESHOLD_PCT,
};

pub const DEFAULT_BATCH_SIZE: u32 = 1000;
pub const DEFAULT_TIMING_TRIALS: u32 = 10;
pub const DEFAULT_TIMING_BATCH_SIZE: u32 = 100;
pub const DEFAULT_SAMPLE_KEYS: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct SelfTestConfig {
    pub params: KeyParams,
    pub seed: u64,
    /// Keys generated for the statistical checks.
    pub batch_size: u32,
    /// Maximum distance from 50% in percentage points before a bit counts as biased.
    pub bias_threshold_pct: f64,
    pub timing_trials: u32,
    pub timing_batch_size: u32,
    /// Keys listed verbatim in the report.
    pub sample_keys: usize,
    /// Report is also appended here when set.
    pub output_path: Option<PathBuf>,
}

impl Default for SelfTestConfig {
    fn default() -> Self {
        SelfTestConfig {
            params: KeyParams::default(),
            seed: DEFAULT_SEED,
            batch_size: DEFAULT_BATCH_SIZE,
            bias_threshold_pct: DEFAULT_BIAS_THRESHOLD_PCT,
            timing_trials: DEFAULT_TIMING_TRIALS,
            timing_batch_size: DEFAULT_TIMING_BATCH_SIZE,
            sample_keys: DEFAULT_SAMPLE_KEYS,
            output_path: None,
        }
    }
}

impl SelfTestConfig {
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(KeymixError::InvalidConfig(
                "batch size must be at least 1".to_owned(),
            ));
        }
        if self.timing_trials == 0 {
            return Err(KeymixError::InvalidConfig(
                "timing trials must be at least 1".to_owned(),
            ));
        }
        if !self.bias_threshold_pct.is_finite() || self.bias_threshold_pct < 0.0 {
            return Err(KeymixError::InvalidConfig(format!(
                "bias threshold must be a non-negative number, got {}",
                self.bias_threshold_pct
            )));
        }
        Ok(())
    }
}
