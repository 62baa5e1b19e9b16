//! Available memory from `/proc/meminfo`.

use std::fs;

use super::{fit, ComponentError, Producer};
use crate::util::{fmt_human, K_IEC};

/// `MemAvailable`, humanized with IEC prefixes.
pub struct MemAvailable;

impl Producer for MemAvailable {
    fn name(&self) -> &'static str {
        "mem_avail"
    }

    fn produce(&self, capacity: usize, _args: &str) -> Result<String, ComponentError> {
        let meminfo = fs::read_to_string("/proc/meminfo")?;
        let kib = parse_meminfo(&meminfo, "MemAvailable")
            .ok_or(ComponentError::Parse("/proc/meminfo"))?;
        Ok(fit(
            format!(" {}B", fmt_human(kib * K_IEC, K_IEC)),
            capacity,
        ))
    }
}

/// Extract a kB-denominated field, e.g. `MemAvailable:    8169628 kB`.
fn parse_meminfo(meminfo: &str, field: &str) -> Option<u64> {
    let line = meminfo
        .lines()
        .find(|l| l.split(':').next() == Some(field))?;
    line.split_whitespace().nth(1)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const SAMPLE: &str = "\
MemTotal:       16310996 kB
MemFree:         5192996 kB
MemAvailable:    8169628 kB
Buffers:          287812 kB
";

    #[rstest]
    #[case("MemAvailable", Some(8_169_628))]
    #[case("MemFree", Some(5_192_996))]
    #[case("SwapTotal", None)]
    fn extracts_named_fields(#[case] field: &str, #[case] expected: Option<u64>) {
        assert_eq!(parse_meminfo(SAMPLE, field), expected);
    }

    #[test]
    fn does_not_match_field_name_prefixes() {
        // "Mem" must not match "MemTotal".
        assert_eq!(parse_meminfo(SAMPLE, "Mem"), None);
    }
}
