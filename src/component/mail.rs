//! Unread mail count via `notmuch`.

use super::{fit, ComponentError, Producer};
use crate::util::run_cmd;

pub struct UnreadMail;

impl Producer for UnreadMail {
    fn name(&self) -> &'static str {
        "mail"
    }

    fn produce(&self, capacity: usize, _args: &str) -> Result<String, ComponentError> {
        let output = run_cmd("notmuch", &["count", "tag:unread NOT tag:archived"]).map_err(
            |err| ComponentError::Command {
                cmd: "notmuch",
                reason: err.to_string(),
            },
        )?;
        let count: u64 = output
            .parse()
            .map_err(|_| ComponentError::Parse("notmuch count output"))?;
        Ok(fit(format!("󰇮 {count}"), capacity))
    }
}
