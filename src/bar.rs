//! The shared status bar slot store.
//!
//! One fixed-capacity text slot per component, all guarded by a single
//! mutex, plus a dirty flag and a notifier. Component tasks write slots
//! through [`StatusBar::update`]; the single renderer blocks in
//! [`StatusBar::render_on_change`] until something changed, then receives
//! the freshly composed line.
//!
//! Invariant: the bar is dirty iff at least one slot has been written since
//! the last render. Writers set the flag atomically with the write, the
//! renderer clears it atomically with the read, so updates are never lost
//! and a batch of updates produces exactly one render.

use std::sync::Mutex;

use itertools::Itertools;
use thiserror::Error;
use tokio::sync::Notify;

use crate::util::truncate_to_boundary;

/// Rendering configuration shared by the store and its renderer.
#[derive(Debug, Clone)]
pub struct BarConfig {
    /// Separator placed between non-empty slots in the rendered line.
    pub divider: String,
    /// Text a slot holds before its component has produced a value.
    pub placeholder: String,
    /// Text written to a slot when its producer fails.
    pub error_text: String,
    /// Maximum slot size in bytes; slot text never exceeds `slot_capacity - 1`.
    pub slot_capacity: usize,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            divider: "  ".to_string(),
            placeholder: "n/a".to_string(),
            error_text: "err".to_string(),
            slot_capacity: 128,
        }
    }
}

/// Errors detectable at store construction. Setup failures are fatal; the
/// store itself cannot fail once built.
#[derive(Debug, Error)]
pub enum BarError {
    #[error("slot capacity must be at least 2 bytes, got {0}")]
    CapacityTooSmall(usize),
    #[error("{what} ({len} bytes) does not fit a slot of {capacity} bytes")]
    TextTooLong {
        what: &'static str,
        len: usize,
        capacity: usize,
    },
}

struct Slots {
    texts: Vec<String>,
    dirty: bool,
}

/// Thread-safe storage and coalesced change notification for N component
/// text slots.
pub struct StatusBar {
    slots: Mutex<Slots>,
    changed: Notify,
    config: BarConfig,
}

impl StatusBar {
    /// Create a store with `ncomponents` slots, each prefilled with the
    /// configured placeholder.
    pub fn new(ncomponents: usize, config: BarConfig) -> Result<Self, BarError> {
        if config.slot_capacity < 2 {
            return Err(BarError::CapacityTooSmall(config.slot_capacity));
        }
        for (what, text) in [
            ("placeholder", &config.placeholder),
            ("error text", &config.error_text),
        ] {
            if text.len() > config.slot_capacity - 1 {
                return Err(BarError::TextTooLong {
                    what,
                    len: text.len(),
                    capacity: config.slot_capacity,
                });
            }
        }

        Ok(Self {
            slots: Mutex::new(Slots {
                texts: vec![config.placeholder.clone(); ncomponents],
                dirty: false,
            }),
            changed: Notify::new(),
            config,
        })
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.lock().unwrap().texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn config(&self) -> &BarConfig {
        &self.config
    }

    /// Replace the text of slot `index`, truncated on a character boundary
    /// to fit the slot, and mark the bar dirty.
    ///
    /// Acquires the store lock internally; callers must not hold it.
    /// Concurrent updates to different slots are independent; updates to
    /// the same slot are last-write-wins.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn update(&self, index: usize, text: &str) {
        let text = truncate_to_boundary(text, self.config.slot_capacity - 1);

        // Maintain the "dirty" invariant: flag and slot flip together.
        {
            let mut slots = self.slots.lock().unwrap();
            slots.texts[index] = text.to_string();
            slots.dirty = true;
        }
        self.changed.notify_one();
    }

    /// Compose the current status line: all non-empty slots in descriptor
    /// order, joined by the divider. Does not touch the dirty flag.
    pub fn compose(&self) -> String {
        let slots = self.slots.lock().unwrap();
        compose_line(&slots.texts, &self.config.divider)
    }

    /// Wait until the bar is dirty, then atomically compose the status
    /// line and clear the flag.
    ///
    /// The single consumer operation: only one renderer may call this at a
    /// time. Updates arriving between two calls are coalesced into one
    /// returned line.
    pub async fn render_on_change(&self) -> String {
        loop {
            // Arm the notification before checking the flag so an update
            // landing between the check and the await is not lost.
            let notified = self.changed.notified();

            // Maintain the "dirty" invariant: read and clear together.
            {
                let mut slots = self.slots.lock().unwrap();
                if slots.dirty {
                    slots.dirty = false;
                    return compose_line(&slots.texts, &self.config.divider);
                }
            }

            notified.await;
        }
    }
}

fn compose_line(texts: &[String], divider: &str) -> String {
    texts.iter().filter(|t| !t.is_empty()).join(divider)
}
