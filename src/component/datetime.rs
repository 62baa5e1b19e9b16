//! Local date and time.

use std::fmt::Write;

use chrono::Local;

use super::{fit, ComponentError, Producer};

/// Current local time rendered with the arg strftime-style format string.
pub struct DateTime;

impl Producer for DateTime {
    fn name(&self) -> &'static str {
        "datetime"
    }

    fn produce(&self, capacity: usize, format: &str) -> Result<String, ComponentError> {
        let mut rendered = String::new();
        // An invalid format specifier surfaces as a fmt error rather than
        // a panic when written out this way.
        write!(rendered, "{}", Local::now().format(format))
            .map_err(|_| ComponentError::Parse("time format string"))?;
        Ok(fit(format!(" {rendered}"), capacity))
    }
}
