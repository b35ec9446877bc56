// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! Deterministic 64-bit key chains and methods for statistical analysis of them.
//!
//! Keys are derived from a diffusion parameter `P`, a multiplier `Q` and a seed `S`:
//!
//! ```
//! let keys = keymix::generate_batch(19, 18446744073709551533, 12345678901234567890, 5);
//! assert_eq!(keys[0], 0x4ced939d78c5a45f);
//! assert!(keys.iter().all(|key| key & 1 == 1));
//! ```
//!
//! Not suitable for cryptographic use.

pub mod config;
pub mod error;
pub mod mixer;
pub mod params;
pub mod sequence;
pub mod stats;
mod strings;
pub mod throughput;
pub mod utils;

pub use config::SelfTestConfig;
pub use error::KeymixError;
pub use params::KeyParams;
pub use sequence::{generate_batch, KeySequence};
pub use stats::{bit_distribution, collisions, cross_seed_divergence};
pub use throughput::measure_throughput;
