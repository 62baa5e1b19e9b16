//! Battery charge from the power supply class in sysfs.

use std::fs;

use super::{fit, ComponentError, Producer};

/// Capacity percentage and charging indicator for the battery named by the
/// arg (e.g. `BAT0`), read from `/sys/class/power_supply/<name>/`.
pub struct Battery;

impl Producer for Battery {
    fn name(&self) -> &'static str {
        "battery"
    }

    fn produce(&self, capacity: usize, bat: &str) -> Result<String, ComponentError> {
        let base = format!("/sys/class/power_supply/{bat}");
        let percent: u32 = fs::read_to_string(format!("{base}/capacity"))?
            .trim()
            .parse()
            .map_err(|_| ComponentError::Parse("battery capacity"))?;
        let status = fs::read_to_string(format!("{base}/status"))?;

        Ok(fit(render(percent, status.trim()), capacity))
    }
}

fn render(percent: u32, status: &str) -> String {
    let icon = if status == "Charging" { "󰂄" } else { "󰁹" };
    format!("{icon} {percent}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charging_and_discharging_render_distinct_icons() {
        assert_eq!(render(80, "Charging"), "󰂄 80%");
        assert_eq!(render(80, "Discharging"), "󰁹 80%");
        assert_eq!(render(100, "Full"), "󰁹 100%");
    }
}
