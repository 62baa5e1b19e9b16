//! Wifi link quality and network name.

use std::fs;

use tracing::debug;

use super::{fit, ComponentError, Producer};
use crate::util::run_cmd;

/// `/proc/net/wireless` reports link quality out of 70.
const QUALITY_CEILING: i64 = 70;

/// Link quality percentage for the arg interface plus the ESSID it is
/// associated with. The ESSID lookup (via `iwgetid -r`) is best-effort;
/// quality alone is still worth showing.
pub struct Wifi;

impl Producer for Wifi {
    fn name(&self) -> &'static str {
        "wifi"
    }

    fn produce(&self, capacity: usize, iface: &str) -> Result<String, ComponentError> {
        let wireless = fs::read_to_string("/proc/net/wireless")?;
        let quality = parse_wireless(&wireless, iface)
            .ok_or(ComponentError::Parse("/proc/net/wireless"))?;

        let essid = match run_cmd("iwgetid", &["-r", iface]) {
            Ok(essid) => essid,
            Err(err) => {
                debug!(%iface, %err, "unable to read essid");
                String::new()
            }
        };

        let text = if essid.is_empty() {
            format!(" {quality}%")
        } else {
            format!(" {quality}% {essid}")
        };
        Ok(fit(text, capacity))
    }
}

/// Extract the arg interface's link quality as a percentage.
fn parse_wireless(wireless: &str, iface: &str) -> Option<i64> {
    let prefix = format!("{iface}:");
    let line = wireless
        .lines()
        .find(|l| l.trim_start().starts_with(&prefix))?;
    // Fields: "<iface>: <status> <link> <level> <noise> ..."; link quality
    // is printed with a trailing dot.
    let link = line.split_whitespace().nth(2)?;
    let value: i64 = link.trim_end_matches('.').parse().ok()?;
    Some(value * 100 / QUALITY_CEILING)
}
