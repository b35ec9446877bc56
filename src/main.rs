// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use keymix::{
    config::{
        SelfTestConfig, DEFAULT_BATCH_SIZE, DEFAULT_SAMPLE_KEYS, DEFAULT_TIMING_BATCH_SIZE,
        DEFAULT_TIMING_TRIALS,
    },
    params::{KeyParams, DEFAULT_P, DEFAULT_Q, DEFAULT_SEED},
    self_test,
    stats::DEFAULT_BIAS_THRESHOLD_PCT,
    utils,
};

#[derive(Parser)]
#[command(name = "keymix")]
#[command(about = "Deterministic 64-bit key chains and their statistical self-test")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// Parameters shared by all subcommands. Decimal or 0x-prefixed hex.
#[derive(Args)]
struct ChainArgs {
    /// Diffusion parameter
    #[arg(long, value_parser = utils::parse_u64, default_value_t = DEFAULT_P)]
    p: u64,

    /// Multiplier parameter (forced odd)
    #[arg(long, value_parser = utils::parse_u64, default_value_t = DEFAULT_Q)]
    q: u64,

    /// Initial seed
    #[arg(long, value_parser = utils::parse_u64, default_value_t = DEFAULT_SEED)]
    seed: u64,
}

#[derive(Subcommand)]
enum Command {
    /// Generate keys and run every statistical check on them
    SelfTest {
        #[command(flatten)]
        chain: ChainArgs,

        /// Keys generated for the statistical checks
        #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
        batch_size: u32,

        /// Allowed distance from 50% per bit position, in percentage points
        #[arg(long, default_value_t = DEFAULT_BIAS_THRESHOLD_PCT)]
        bias_threshold: f64,

        /// Number of timing trials
        #[arg(long, default_value_t = DEFAULT_TIMING_TRIALS)]
        trials: u32,

        /// Keys generated per timing trial
        #[arg(long, default_value_t = DEFAULT_TIMING_BATCH_SIZE)]
        timing_batch_size: u32,

        /// Keys listed in the report
        #[arg(long, default_value_t = DEFAULT_SAMPLE_KEYS)]
        sample_keys: usize,

        /// Also append the report to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print keys, one per line
    Generate {
        #[command(flatten)]
        chain: ChainArgs,

        /// Number of keys
        #[arg(short = 'n', long)]
        count: u32,
    },
}

/// Warning lines and key lines for the `generate` subcommand.
fn generate_lines(params: KeyParams, seed: u64, count: u32) -> (Vec<String>, Vec<String>) {
    let warnings = params
        .check()
        .iter()
        .map(|warning| format!("Warning: {}", warning))
        .collect();
    let keys = params
        .sequence(seed)
        .take(count as usize)
        .map(utils::format_key)
        .collect();
    (warnings, keys)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::SelfTest {
            chain,
            batch_size,
            bias_threshold,
            trials,
            timing_batch_size,
            sample_keys,
            output,
        } => {
            let config = SelfTestConfig {
                params: KeyParams::new(chain.p, chain.q),
                seed: chain.seed,
                batch_size,
                bias_threshold_pct: bias_threshold,
                timing_trials: trials,
                timing_batch_size,
                sample_keys,
                output_path: output,
            };
            let report = self_test::run_and_print(&config).context("self-test did not run")?;
            if !report.passed() {
                anyhow::bail!(
                    "{} of {} checks failed",
                    report.checks.len() - report.passed_count(),
                    report.checks.len()
                );
            }
        }
        Command::Generate { chain, count } => {
            let (warnings, keys) =
                generate_lines(KeyParams::new(chain.p, chain.q), chain.seed, count);
            // Warnings go to stderr so stdout stays a plain key list.
            for warning in &warnings {
                eprintln!("{}", warning);
            }
            for key in &keys {
                println!("{}", key);
            }
        }
    }
    Ok(())
}
