//! Small shared helpers: byte humanization, UTF-8-safe truncation, and
//! captured invocation of external commands.

use std::io;
use std::process::Command;

/// SI base for human-readable byte formatting (k, M, G, ...).
pub const K_SI: u64 = 1000;

/// IEC base for human-readable byte formatting (Ki, Mi, Gi, ...).
pub const K_IEC: u64 = 1024;

const PREFIX_SI: [&str; 9] = ["", "k", "M", "G", "T", "P", "E", "Z", "Y"];
const PREFIX_IEC: [&str; 9] = ["", "Ki", "Mi", "Gi", "Ti", "Pi", "Ei", "Zi", "Yi"];

/// Format a byte count as a scaled value with a unit prefix, e.g. `"1.5 Gi"`.
///
/// `base` selects the prefix table: [`K_SI`] or [`K_IEC`]. Any other base
/// falls back to IEC.
pub fn fmt_human(num: u64, base: u64) -> String {
    let prefixes = if base == K_SI { &PREFIX_SI } else { &PREFIX_IEC };
    let base = if base == K_SI { K_SI } else { K_IEC };

    let mut scaled = num as f64;
    let mut i = 0;
    while i < prefixes.len() - 1 && scaled >= base as f64 {
        scaled /= base as f64;
        i += 1;
    }

    format!("{:.1} {}", scaled, prefixes[i])
}

/// Truncate `s` to at most `max_bytes` bytes without splitting a UTF-8
/// character.
pub fn truncate_to_boundary(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Run an external command and capture the first line of its stdout,
/// trimmed of trailing whitespace.
///
/// A non-zero exit status is reported as an error; callers decide how the
/// failure surfaces in the status line.
pub fn run_cmd(program: &str, args: &[&str]) -> io::Result<String> {
    let output = Command::new(program).args(args).output()?;
    if !output.status.success() {
        return Err(io::Error::new(
            io::ErrorKind::Other,
            format!("{program} exited with {}", output.status),
        ));
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(stdout.lines().next().unwrap_or("").trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, K_IEC, "0.0 ")]
    #[case(512, K_IEC, "512.0 ")]
    #[case(1024, K_IEC, "1.0 Ki")]
    #[case(1536, K_IEC, "1.5 Ki")]
    #[case(1024 * 1024, K_IEC, "1.0 Mi")]
    #[case(5 * 1024 * 1024 * 1024, K_IEC, "5.0 Gi")]
    #[case(1000, K_SI, "1.0 k")]
    #[case(2_500_000, K_SI, "2.5 M")]
    fn humanizes_byte_counts(#[case] num: u64, #[case] base: u64, #[case] expected: &str) {
        assert_eq!(fmt_human(num, base), expected);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        // "né" is three bytes; cutting at two must not split the 'é'.
        assert_eq!(truncate_to_boundary("né", 2), "n");
        assert_eq!(truncate_to_boundary("né", 3), "né");
        assert_eq!(truncate_to_boundary("hello", 10), "hello");
        assert_eq!(truncate_to_boundary("hello", 0), "");
    }

    #[test]
    fn truncation_is_exact_on_ascii() {
        assert_eq!(truncate_to_boundary("abcdef", 4), "abcd");
    }
}
