//! CPU usage from `/proc/stat`.

use std::fs;
use std::sync::Mutex;

use super::{fit, ComponentError, Producer};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct CpuTimes {
    total: u64,
    idle: u64,
}

/// Aggregate CPU usage as a percentage of time spent non-idle since the
/// previous sample. The first sample reports usage since boot.
pub struct CpuUsage {
    baseline: Mutex<CpuTimes>,
}

impl CpuUsage {
    pub fn new() -> Self {
        Self {
            baseline: Mutex::new(CpuTimes::default()),
        }
    }

    fn usage_percent(&self, current: CpuTimes) -> u64 {
        let mut baseline = self.baseline.lock().unwrap();
        let total = current.total.saturating_sub(baseline.total);
        let idle = current.idle.saturating_sub(baseline.idle);
        *baseline = current;

        if total == 0 {
            return 0;
        }
        100 * (total - idle) / total
    }
}

impl Default for CpuUsage {
    fn default() -> Self {
        Self::new()
    }
}

impl Producer for CpuUsage {
    fn name(&self) -> &'static str {
        "cpu"
    }

    fn produce(&self, capacity: usize, _args: &str) -> Result<String, ComponentError> {
        let stat = fs::read_to_string("/proc/stat")?;
        let current = parse_proc_stat(&stat).ok_or(ComponentError::Parse("/proc/stat"))?;
        let usage = self.usage_percent(current);
        Ok(fit(format!(" {usage}%"), capacity))
    }
}

/// Parse the aggregate `cpu` line: the first seven fields are user, nice,
/// system, idle, iowait, irq and softirq ticks.
fn parse_proc_stat(stat: &str) -> Option<CpuTimes> {
    let line = stat.lines().find(|l| l.starts_with("cpu "))?;
    let fields: Vec<u64> = line
        .split_whitespace()
        .skip(1)
        .take(7)
        .map(str::parse)
        .collect::<Result<_, _>>()
        .ok()?;
    if fields.len() < 7 {
        return None;
    }

    Some(CpuTimes {
        total: fields.iter().sum(),
        idle: fields[3],
    })
}
