//! External trigger delivery.
//!
//! Triggers are realtime signals: small integer ids offset from `SIGRTMIN`,
//! fired from outside the process (`kill -RTMIN+n $(cat /tmp/statline.pid)`)
//! to force an immediate re-run of the component(s) registered for that id.
//!
//! Every waiting task subscribes its own [`Signal`] stream for exactly its
//! own id, so delivery of one component's trigger never wakes another's
//! waiter. SIGINT and SIGTERM are reserved for process lifecycle control
//! and are awaited only by the top-level control loop, never here.

use std::io;

use thiserror::Error;
use tokio::signal::unix::{signal, Signal, SignalKind};

/// Identifier of an external trigger, as an offset from `SIGRTMIN`.
///
/// Realtime signal numbers are platform-relative, so components name their
/// trigger by offset and the real signal number is resolved at subscription
/// time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TriggerId(pub i32);

#[derive(Debug, Error)]
pub enum TriggerError {
    #[error("trigger id {0} outside the realtime signal range 0..={1}")]
    OutOfRange(i32, i32),
    #[error("unable to install handler for trigger {id}: {source}")]
    Install {
        id: i32,
        #[source]
        source: io::Error,
    },
}

impl TriggerId {
    /// Resolve to the platform signal number, validating the realtime range.
    pub fn signum(self) -> Result<i32, TriggerError> {
        let span = libc::SIGRTMAX() - libc::SIGRTMIN();
        if self.0 < 0 || self.0 > span {
            return Err(TriggerError::OutOfRange(self.0, span));
        }
        Ok(libc::SIGRTMIN() + self.0)
    }
}

/// Subscribe a stream of deliveries for one trigger id.
///
/// The handler is installed before this returns, so a trigger fired any
/// time after subscription is never lost, only coalesced.
pub fn subscribe(id: TriggerId) -> Result<Signal, TriggerError> {
    let signum = id.signum()?;
    signal(SignalKind::from_raw(signum)).map_err(|source| TriggerError::Install {
        id: id.0,
        source,
    })
}

/// Await the first lifecycle signal (SIGINT or SIGTERM) and report which
/// one arrived. Reserved for the top-level control loop.
pub async fn lifecycle() -> io::Result<&'static str> {
    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;

    tokio::select! {
        _ = interrupt.recv() => Ok("SIGINT"),
        _ = terminate.recv() => Ok("SIGTERM"),
    }
}
