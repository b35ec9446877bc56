// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! User interaction strings are stored here.

pub const FAIL_STR: &str = "FAILED!!";
pub const PASS_STR: &str = "PASSED";

pub const CHECK_NAMES: [&str; 6] = [
    "BitBalance",
    "ChiSquared",
    "Monobit",
    "Collisions",
    "Divergence",
    "BitFlips",
];

pub const SECTION_TIMING: &str = "1. GENERATION TIME";
pub const SECTION_STATS: &str = "2. STATISTICAL ANALYSIS";
pub const SECTION_VARIABILITY: &str = "3. SEED VARIABILITY";
pub const SECTION_SAMPLES: &str = "4. SAMPLE KEYS";
pub const SECTION_PARAMS: &str = "5. PARAMETER DIAGNOSTICS";
