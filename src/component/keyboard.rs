//! Caps Lock / Num Lock indicators from the LED class in sysfs.

use std::fs;
use std::path::PathBuf;

use super::{fit, ComponentError, Producer};

/// Renders "Caps", "Num", "Caps Num", or nothing at all. An empty slot is
/// omitted from the status line, so the indicator only appears while a
/// lock is actually engaged.
pub struct LockIndicators {
    leds_dir: PathBuf,
}

impl LockIndicators {
    pub fn new() -> Self {
        Self {
            leds_dir: PathBuf::from("/sys/class/leds"),
        }
    }

    fn led_lit(&self, suffix: &str) -> Result<bool, ComponentError> {
        for entry in fs::read_dir(&self.leds_dir)? {
            let entry = entry?;
            if entry.file_name().to_string_lossy().ends_with(suffix) {
                let brightness = fs::read_to_string(entry.path().join("brightness"))?;
                return Ok(brightness.trim() != "0");
            }
        }
        Ok(false)
    }
}

impl Default for LockIndicators {
    fn default() -> Self {
        Self::new()
    }
}

impl Producer for LockIndicators {
    fn name(&self) -> &'static str {
        "keyboard"
    }

    fn produce(&self, capacity: usize, _args: &str) -> Result<String, ComponentError> {
        let caps = self.led_lit("::capslock")?;
        let num = self.led_lit("::numlock")?;

        let text = match (caps, num) {
            (true, true) => "Caps Num",
            (true, false) => "Caps",
            (false, true) => "Num",
            (false, false) => "",
        };
        Ok(fit(text.to_string(), capacity))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn fake_leds(dir: &std::path::Path, leds: &[(&str, &str)]) {
        for (name, brightness) in leds {
            let led = dir.join(name);
            fs::create_dir_all(&led).unwrap();
            fs::write(led.join("brightness"), brightness).unwrap();
        }
    }

    #[test]
    fn reports_lit_lock_leds() {
        let dir = std::env::temp_dir().join("statline-test-leds-lit");
        let _ = fs::remove_dir_all(&dir);
        fake_leds(&dir, &[("input3::capslock", "1\n"), ("input3::numlock", "0\n")]);

        let keyboard = LockIndicators { leds_dir: dir };
        assert_eq!(keyboard.produce(128, "").unwrap(), "Caps");
    }

    #[test]
    fn no_lit_leds_renders_nothing() {
        let dir = std::env::temp_dir().join("statline-test-leds-dark");
        let _ = fs::remove_dir_all(&dir);
        fake_leds(&dir, &[("input3::capslock", "0\n"), ("input3::numlock", "0\n")]);

        let keyboard = LockIndicators { leds_dir: dir };
        assert_eq!(keyboard.produce(128, "").unwrap(), "");
    }
}
