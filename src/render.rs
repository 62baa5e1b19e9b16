//! The renderer/publisher loop.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{trace, warn};

use crate::bar::StatusBar;
use crate::sink::{Sink, SinkError};

/// Single consumer of the slot store: waits for a change, publishes the
/// composed line, repeats until cancelled.
pub struct Renderer {
    bar: Arc<StatusBar>,
    sink: Box<dyn Sink>,
}

impl Renderer {
    pub fn new(bar: Arc<StatusBar>, sink: Box<dyn Sink>) -> Self {
        Self { bar, sink }
    }

    /// Run until cancelled (restoring the sink on the way out) or until a
    /// publish fails, which is fatal: with a broken output target there is
    /// nothing useful left to do.
    pub async fn run(mut self, cancel: CancellationToken) -> Result<(), SinkError> {
        let bar = Arc::clone(&self.bar);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                line = bar.render_on_change() => {
                    trace!(%line, "publishing");
                    self.sink.publish(&line)?;
                }
            }
        }

        if let Err(err) = self.sink.clear() {
            warn!(%err, "unable to restore output sink");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use mockall::Sequence;

    use super::*;
    use crate::bar::BarConfig;
    use crate::sink::MockSink;

    fn bar(n: usize) -> Arc<StatusBar> {
        Arc::new(StatusBar::new(n, BarConfig::default()).unwrap())
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn publishes_composed_lines_then_restores_the_sink() {
        let bar = bar(2);
        let mut seq = Sequence::new();

        let mut sink = MockSink::new();
        sink.expect_publish()
            .withf(|line| line == "left  n/a")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        sink.expect_clear()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(()));

        let cancel = CancellationToken::new();
        let renderer = Renderer::new(Arc::clone(&bar), Box::new(sink));
        let task = tokio::spawn(renderer.run(cancel.clone()));

        bar.update(0, "left");

        // Let the publish happen before shutting down.
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        cancel.cancel();
        task.await.unwrap().unwrap();
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn publish_failure_is_fatal() {
        let bar = bar(1);

        let mut sink = MockSink::new();
        sink.expect_publish()
            .times(1)
            .returning(|_| Err(SinkError::Write(io::Error::from(io::ErrorKind::BrokenPipe))));
        // No clear on the fatal path.
        sink.expect_clear().times(0);

        let renderer = Renderer::new(Arc::clone(&bar), Box::new(sink));
        let task = tokio::spawn(renderer.run(CancellationToken::new()));

        bar.update(0, "boom");

        let result = tokio::time::timeout(std::time::Duration::from_secs(5), task)
            .await
            .expect("renderer did not stop on sink failure")
            .unwrap();
        assert!(matches!(result, Err(SinkError::Write(_))));
    }
}
