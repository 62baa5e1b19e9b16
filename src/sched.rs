//! Update schedulers.
//!
//! Each component gets up to three task kinds at launch:
//!
//! - a **once** task, run immediately so the slot shows a real value as
//!   soon as possible;
//! - a **repeating** task for components with an interval: sleep, update,
//!   forever;
//! - an **async** task for components with a trigger id: await the
//!   trigger, update, forever.
//!
//! All of a component's update attempts are serialized through its own
//! lock, so a trigger firing during a repeating run cannot interleave a
//! producer with itself. Producers run on the blocking pool; a hung
//! producer stalls only its own component.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::bar::StatusBar;
use crate::component::{ComponentDef, Producer};
use crate::trigger::{self, TriggerError};

struct Component {
    index: usize,
    name: &'static str,
    producer: Arc<dyn Producer>,
    args: String,
    /// Serializes every update attempt for this component.
    serial: Mutex<()>,
}

/// Spawn the once/repeating/async tasks for every registered component.
///
/// Trigger streams are subscribed *before* any task starts, so an invalid
/// trigger id fails startup instead of surfacing mid-flight, and a trigger
/// fired right after launch is already routed to its waiter.
pub fn spawn_all(
    bar: Arc<StatusBar>,
    defs: Vec<ComponentDef>,
    cancel: CancellationToken,
) -> Result<Vec<JoinHandle<()>>, TriggerError> {
    let mut handles = Vec::new();

    for (index, def) in defs.into_iter().enumerate() {
        let trigger_stream = def.trigger.map(trigger::subscribe).transpose()?;

        let comp = Arc::new(Component {
            index,
            name: def.producer.name(),
            producer: def.producer,
            args: def.args,
            serial: Mutex::new(()),
        });

        // Initial value, for every component regardless of cadence.
        handles.push(tokio::spawn(run_update(
            Arc::clone(&comp),
            Arc::clone(&bar),
        )));

        if let Some(interval) = def.interval {
            handles.push(spawn_repeating(
                Arc::clone(&comp),
                Arc::clone(&bar),
                interval,
                cancel.clone(),
            ));
        }

        if let Some(stream) = trigger_stream {
            handles.push(spawn_async(
                Arc::clone(&comp),
                Arc::clone(&bar),
                stream,
                cancel.clone(),
            ));
        }
    }

    Ok(handles)
}

fn spawn_repeating(
    comp: Arc<Component>,
    bar: Arc<StatusBar>,
    interval: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = time::sleep(interval) => {
                    run_update(Arc::clone(&comp), Arc::clone(&bar)).await;
                }
            }
        }
        debug!(component = comp.name, "repeating task stopped");
    })
}

fn spawn_async(
    comp: Arc<Component>,
    bar: Arc<StatusBar>,
    mut stream: tokio::signal::unix::Signal,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                received = stream.recv() => match received {
                    Some(()) => run_update(Arc::clone(&comp), Arc::clone(&bar)).await,
                    None => break,
                }
            }
        }
        debug!(component = comp.name, "async task stopped");
    })
}

/// One update attempt: run the producer, write the result (or the error
/// text) into the component's slot.
///
/// Producer failures never propagate; the component shows the error text
/// until a later attempt succeeds.
async fn run_update(comp: Arc<Component>, bar: Arc<StatusBar>) {
    let _serial = comp.serial.lock().await;

    let capacity = bar.config().slot_capacity;
    let producer = Arc::clone(&comp.producer);
    let args = comp.args.clone();
    let produced = tokio::task::spawn_blocking(move || producer.produce(capacity, &args)).await;

    let text = match produced {
        Ok(Ok(text)) => text,
        Ok(Err(err)) => {
            warn!(component = comp.name, %err, "producer failed");
            bar.config().error_text.clone()
        }
        Err(err) => {
            warn!(component = comp.name, %err, "producer panicked");
            bar.config().error_text.clone()
        }
    };

    bar.update(comp.index, &text);
}
