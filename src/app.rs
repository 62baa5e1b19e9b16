//! Application wiring and lifecycle.
//!
//! Owns the slot store, the component registry and the output sink;
//! spawns the renderer and the per-component scheduler tasks, then parks
//! on the lifecycle signals. Shutdown is cooperative: the cancellation
//! token is observed at every suspension point, with a short grace period
//! so a hung producer cannot hold the process hostage.

use std::sync::Arc;
use std::time::Duration;

use eyre::{eyre, Result, WrapErr};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::bar::{BarConfig, BarError, StatusBar};
use crate::component::ComponentDef;
use crate::render::Renderer;
use crate::sched;
use crate::sink::Sink;
use crate::trigger;

/// How long shutdown waits for in-flight tasks before giving up on them.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

pub struct App {
    bar: Arc<StatusBar>,
    components: Vec<ComponentDef>,
    sink: Box<dyn Sink>,
    cancel: CancellationToken,
}

impl App {
    pub fn new(
        components: Vec<ComponentDef>,
        config: BarConfig,
        sink: Box<dyn Sink>,
    ) -> Result<Self, BarError> {
        let bar = Arc::new(StatusBar::new(components.len(), config)?);
        Ok(Self {
            bar,
            components,
            sink,
            cancel: CancellationToken::new(),
        })
    }

    /// Run until the first SIGINT/SIGTERM (graceful, `Ok`) or a fatal
    /// renderer failure (`Err`).
    pub async fn run(self) -> Result<()> {
        let renderer = Renderer::new(Arc::clone(&self.bar), self.sink);
        let mut render_task = tokio::spawn(renderer.run(self.cancel.clone()));

        let scheduler_tasks = match sched::spawn_all(
            Arc::clone(&self.bar),
            self.components,
            self.cancel.clone(),
        ) {
            Ok(tasks) => tasks,
            Err(err) => {
                self.cancel.cancel();
                return Err(err).wrap_err("unable to start component schedulers");
            }
        };
        info!(tasks = scheduler_tasks.len(), "status bar running");

        tokio::select! {
            signal = trigger::lifecycle() => {
                let signal = signal.wrap_err("unable to wait for lifecycle signals")?;
                info!(%signal, "shutting down");
            }
            finished = &mut render_task => {
                self.cancel.cancel();
                return match finished? {
                    Ok(()) => Err(eyre!("renderer stopped unexpectedly")),
                    Err(err) => Err(err).wrap_err("status line publishing failed"),
                };
            }
        }

        self.cancel.cancel();

        // Best-effort: schedulers wind down at their next suspension point
        // and the renderer restores the sink, but shutdown never waits for
        // a hung producer.
        let drain = async {
            futures::future::join_all(scheduler_tasks).await;
            render_task.await
        };
        match tokio::time::timeout(SHUTDOWN_GRACE, drain).await {
            Ok(Ok(Ok(()))) => {}
            Ok(Ok(Err(err))) => warn!(%err, "publish failed during shutdown"),
            Ok(Err(err)) => warn!(%err, "renderer ended abnormally during shutdown"),
            Err(_) => warn!("tasks still busy after grace period, exiting anyway"),
        }

        Ok(())
    }
}
