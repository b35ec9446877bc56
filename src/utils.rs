// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! Misc utility functions.

use std::{
    fs::OpenOptions,
    io::Write,
    path::Path,
    time::Duration,
};

/// `part` as a percentage of `total`, 0 for an empty total.
pub fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 * 100.0) / total as f64
    }
}

/// Parse a u64 given in decimal or with a 0x prefix.
pub fn parse_u64(text: &str) -> Result<u64, String> {
    let text = text.trim().replace('_', "");
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => text.parse::<u64>(),
    };
    parsed.map_err(|e| format!("'{}' is not a valid u64: {}", text, e))
}

/// Format a key as fixed width hex, e.g. 0x00000000000000ff
pub fn format_key(key: u64) -> String {
    format!("{:#018x}", key)
}

/// Format a number of bytes into a pretty String.
/// e.g. 1048576 is 1 MiB
pub fn format_byte_count(num_bytes: usize) -> String {
    // 2**30 = 1073741824
    if num_bytes > 1073741824 {
        format!("{:.2} GiB", (num_bytes as f64 / 1073741824.0))
    // 2**20 = 1048576
    } else if num_bytes > 1048576 {
        format!("{:.2} MiB", (num_bytes as f64 / 1048576.0))
    // 2**10 = 1024
    } else if num_bytes > 1024 {
        format!("{:.2} KiB", (num_bytes as f64 / 1024.0))
    } else {
        format!("{:.2} B", num_bytes as f64)
    }
}

/// Format a duration with a unit fitting its magnitude.
pub fn format_elapsed_time(elapsed: Duration) -> String {
    let nanos = elapsed.as_nanos();
    if nanos >= 1_000_000_000 {
        format!("{:.3} s", elapsed.as_secs_f64())
    } else if nanos >= 1_000_000 {
        format!("{:.3} ms", nanos as f64 / 1_000_000.0)
    } else if nanos >= 1_000 {
        format!("{:.3} µs", nanos as f64 / 1_000.0)
    } else {
        format!("{} ns", nanos)
    }
}

/// Print `text` and append it to `file_path` if one is given.
pub fn write_and_print(text: &str, file_path: Option<&Path>) -> std::io::Result<()> {
    println!("{}", text);
    if let Some(path) = file_path {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{}", text)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentages() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(5, 0), 0.0);
        assert_eq!(percentage(1, 4), 25.0);
        assert_eq!(percentage(1000, 1000), 100.0);
    }

    #[test]
    fn parse_decimal_and_hex() {
        assert_eq!(parse_u64("19"), Ok(19));
        assert_eq!(parse_u64("18446744073709551533"), Ok(18446744073709551533));
        assert_eq!(parse_u64("0xff"), Ok(255));
        assert_eq!(parse_u64("0XFF"), Ok(255));
        assert_eq!(parse_u64("1_000"), Ok(1000));
        assert!(parse_u64("18446744073709551616").is_err());
        assert!(parse_u64("0xg").is_err());
        assert!(parse_u64("-1").is_err());
    }

    #[test]
    fn key_format() {
        assert_eq!(format_key(0xff), "0x00000000000000ff");
        assert_eq!(format_key(u64::MAX), "0xffffffffffffffff");
    }

    #[test]
    fn byte_counts() {
        assert_eq!(format_byte_count(512), "512.00 B");
        assert_eq!(format_byte_count(8000), "7.81 KiB");
        assert_eq!(format_byte_count(3 * 1048576), "3.00 MiB");
    }

    #[test]
    fn elapsed_time() {
        assert_eq!(format_elapsed_time(Duration::from_nanos(999)), "999 ns");
        assert_eq!(format_elapsed_time(Duration::from_micros(1500)), "1.500 ms");
        assert_eq!(format_elapsed_time(Duration::from_nanos(2_500)), "2.500 µs");
        assert_eq!(format_elapsed_time(Duration::from_secs(2)), "2.000 s");
    }
}
