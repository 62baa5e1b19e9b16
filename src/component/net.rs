//! Network traffic from the interface statistics in sysfs.

use std::fs;
use std::sync::Mutex;

use super::{fit, ComponentError, Producer};
use crate::util::{fmt_human, K_IEC};

#[derive(Debug, Clone, Copy, Default)]
struct Counters {
    rx: u64,
    tx: u64,
}

/// Received/transmitted byte deltas for one interface, sampled from
/// `/sys/class/net/<iface>/statistics/{rx,tx}_bytes`.
///
/// With a one-second interval the delta reads as bytes per second.
pub struct NetTraffic {
    baseline: Mutex<Counters>,
}

impl NetTraffic {
    pub fn new() -> Self {
        Self {
            baseline: Mutex::new(Counters::default()),
        }
    }

    fn delta(&self, current: Counters) -> (u64, u64) {
        let mut baseline = self.baseline.lock().unwrap();
        let delta = (
            current.rx.saturating_sub(baseline.rx),
            current.tx.saturating_sub(baseline.tx),
        );
        *baseline = current;
        delta
    }
}

impl Default for NetTraffic {
    fn default() -> Self {
        Self::new()
    }
}

impl Producer for NetTraffic {
    fn name(&self) -> &'static str {
        "net_traffic"
    }

    fn produce(&self, capacity: usize, iface: &str) -> Result<String, ComponentError> {
        let current = Counters {
            rx: read_counter(iface, "rx_bytes")?,
            tx: read_counter(iface, "tx_bytes")?,
        };
        let (rx, tx) = self.delta(current);

        Ok(fit(
            format!(
                "{:>8}B▾ {:>8}B▴",
                fmt_human(rx, K_IEC),
                fmt_human(tx, K_IEC)
            ),
            capacity,
        ))
    }
}

fn read_counter(iface: &str, stat: &str) -> Result<u64, ComponentError> {
    let path = format!("/sys/class/net/{iface}/statistics/{stat}");
    let raw = fs::read_to_string(&path)?;
    raw.trim()
        .parse()
        .map_err(|_| ComponentError::Parse("interface byte counter"))
}
