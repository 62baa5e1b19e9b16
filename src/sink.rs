//! Output sinks for the rendered status line.
//!
//! The renderer hands each composed line to exactly one sink, once per
//! render cycle. Publishing is expected to succeed; a sink failure is
//! treated as fatal by the renderer since there is no recovery path for a
//! broken output target.

use std::io::{self, Write};
use std::process::{Command, ExitStatus};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("unable to write status line: {0}")]
    Write(#[from] io::Error),
    #[error("xsetroot exited with {0}")]
    SetRoot(ExitStatus),
}

/// Destination for rendered status lines.
#[cfg_attr(test, mockall::automock)]
pub trait Sink: Send {
    /// Publish one rendered line.
    fn publish(&mut self, line: &str) -> Result<(), SinkError>;

    /// Restore the sink to a neutral state on shutdown. Best-effort.
    fn clear(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Print each line to stdout and flush, for piping into other bars or
/// debugging.
pub struct StdoutSink;

impl Sink for StdoutSink {
    fn publish(&mut self, line: &str) -> Result<(), SinkError> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(line.as_bytes())?;
        stdout.write_all(b"\n")?;
        stdout.flush()?;
        Ok(())
    }
}

/// Set each line as the X root window name, which window managers such as
/// dwm display as their status area. Driven through `xsetroot`.
pub struct RootWindowSink;

impl RootWindowSink {
    fn set_name(&self, name: &str) -> Result<(), SinkError> {
        let status = Command::new("xsetroot").arg("-name").arg(name).status()?;
        if !status.success() {
            return Err(SinkError::SetRoot(status));
        }
        Ok(())
    }
}

impl Sink for RootWindowSink {
    fn publish(&mut self, line: &str) -> Result<(), SinkError> {
        self.set_name(line)
    }

    fn clear(&mut self) -> Result<(), SinkError> {
        self.set_name("")
    }
}
