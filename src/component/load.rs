//! One-minute load average from `/proc/loadavg`.

use std::fs;

use super::{fit, ComponentError, Producer};

pub struct LoadAvg;

impl Producer for LoadAvg {
    fn name(&self) -> &'static str {
        "load_avg"
    }

    fn produce(&self, capacity: usize, _args: &str) -> Result<String, ComponentError> {
        let loadavg = fs::read_to_string("/proc/loadavg")?;
        let one_minute = parse_loadavg(&loadavg).ok_or(ComponentError::Parse("/proc/loadavg"))?;
        Ok(fit(format!(" {one_minute:.2}"), capacity))
    }
}

fn parse_loadavg(loadavg: &str) -> Option<f64> {
    loadavg.split_whitespace().next()?.parse().ok()
}
