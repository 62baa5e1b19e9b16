//! Audio volume via `pamixer`.

use super::{fit, ComponentError, Producer};
use crate::util::run_cmd;

/// Output of `pamixer --get-volume-human`: a percentage, or `muted`.
pub struct Volume;

impl Producer for Volume {
    fn name(&self) -> &'static str {
        "volume"
    }

    fn produce(&self, capacity: usize, _args: &str) -> Result<String, ComponentError> {
        let level = run_cmd("pamixer", &["--get-volume-human"]).map_err(|err| {
            ComponentError::Command {
                cmd: "pamixer",
                reason: err.to_string(),
            }
        })?;
        Ok(fit(render(&level), capacity))
    }
}

fn render(level: &str) -> String {
    if level == "muted" {
        format!("󰝟 {level}")
    } else {
        format!("󰕾 {level}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn muted_gets_the_muted_icon() {
        assert_eq!(render("muted"), "󰝟 muted");
        assert_eq!(render("55%"), "󰕾 55%");
    }
}
