//! Status bar components and their producers.
//!
//! A component pairs a [`Producer`] with scheduling metadata: an optional
//! repeat interval, an optional external trigger id, or neither (run once
//! at startup). Producers compute the component's current display text;
//! everything about *when* they run lives in [`crate::sched`].
//!
//! The default component set mirrors a conventional single-machine bar:
//! keyboard lock indicators, unread mail, network traffic, CPU usage, load
//! average, available memory, free disk space, volume, wifi, battery, and
//! the clock.

pub mod battery;
pub mod cpu;
pub mod datetime;
pub mod disk;
pub mod keyboard;
pub mod load;
pub mod mail;
pub mod mem;
pub mod net;
pub mod volume;
pub mod wifi;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::trigger::TriggerId;
use crate::util::truncate_to_boundary;

/// Failure to obtain or format a component value.
///
/// Always recovered locally: the scheduler logs the error and shows the
/// configured error text in the component's slot. Never fatal.
#[derive(Debug, Error)]
pub enum ComponentError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("unable to parse {0}")]
    Parse(&'static str),
    #[error("`{cmd}` failed: {reason}")]
    Command { cmd: &'static str, reason: String },
}

/// Computes the current display text of one component.
///
/// Implementations must be callable concurrently with *other* producers
/// (they run on separate tasks); invocations of the same producer are
/// serialized by the scheduler. Any internal baseline state (previous
/// counter samples) therefore needs only a narrow internal lock.
pub trait Producer: Send + Sync {
    /// Short static name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Produce the display text, at most `capacity - 1` bytes.
    ///
    /// On failure the slot is left to the scheduler's error text; a
    /// producer never renders partial output.
    fn produce(&self, capacity: usize, args: &str) -> Result<String, ComponentError>;
}

/// Truncate produced text to fit a slot of `capacity` bytes.
pub(crate) fn fit(text: String, capacity: usize) -> String {
    let max = capacity.saturating_sub(1);
    if text.len() <= max {
        text
    } else {
        truncate_to_boundary(&text, max).to_string()
    }
}

/// One entry of the component registry: a producer plus its scheduling
/// metadata. The registry is fixed at startup; slot order in the rendered
/// line is registry order.
#[derive(Clone)]
pub struct ComponentDef {
    pub producer: Arc<dyn Producer>,
    pub args: String,
    pub interval: Option<Duration>,
    pub trigger: Option<TriggerId>,
}

impl ComponentDef {
    /// A run-once-at-startup component; add cadence with [`Self::every`]
    /// and/or [`Self::on_trigger`].
    pub fn new(producer: impl Producer + 'static) -> Self {
        Self {
            producer: Arc::new(producer),
            args: String::new(),
            interval: None,
            trigger: None,
        }
    }

    pub fn args(mut self, args: impl Into<String>) -> Self {
        self.args = args.into();
        self
    }

    pub fn every(mut self, interval: Duration) -> Self {
        self.interval = Some(interval);
        self
    }

    pub fn on_trigger(mut self, id: TriggerId) -> Self {
        self.trigger = Some(id);
        self
    }
}

/// The default component registry.
///
/// Order defines the order of fields in the rendered line. Trigger ids are
/// offsets from `SIGRTMIN`; with the PID file in place they can be fired
/// from shell keybindings, e.g. `kill -RTMIN+2 $(cat /tmp/statline.pid)`
/// after a volume key press.
pub fn default_components() -> Vec<ComponentDef> {
    vec![
        ComponentDef::new(keyboard::LockIndicators::new()).on_trigger(TriggerId(0)),
        ComponentDef::new(mail::UnreadMail).on_trigger(TriggerId(1)),
        ComponentDef::new(net::NetTraffic::new())
            .args("wlan0")
            .every(Duration::from_secs(1)),
        ComponentDef::new(cpu::CpuUsage::new()).every(Duration::from_secs(1)),
        ComponentDef::new(load::LoadAvg).every(Duration::from_secs(2)),
        ComponentDef::new(mem::MemAvailable).every(Duration::from_secs(2)),
        ComponentDef::new(disk::DiskFree)
            .args("/")
            .every(Duration::from_secs(15)),
        ComponentDef::new(volume::Volume)
            .every(Duration::from_secs(60))
            .on_trigger(TriggerId(2)),
        ComponentDef::new(wifi::Wifi)
            .args("wlan0")
            .every(Duration::from_secs(5)),
        ComponentDef::new(battery::Battery)
            .args("BAT0")
            .every(Duration::from_secs(2)),
        ComponentDef::new(datetime::DateTime)
            .args("%a %d %b %R")
            .every(Duration::from_secs(30)),
    ]
}
