//! End-to-end properties of the slot store under concurrent writers, and
//! of the schedulers when interval- and trigger-driven components race.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use tokio_util::sync::CancellationToken;

use statline::bar::{BarConfig, StatusBar};
use statline::component::{ComponentDef, ComponentError, Producer};
use statline::sched;
use statline::trigger::TriggerId;

fn config() -> BarConfig {
    BarConfig {
        divider: "  ".to_string(),
        placeholder: "n/a".to_string(),
        error_text: "err".to_string(),
        slot_capacity: 32,
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_writers_never_tear_slots() {
    let bar = Arc::new(StatusBar::new(2, config()).unwrap());

    let writer = |index: usize, prefix: char| {
        let bar = Arc::clone(&bar);
        tokio::spawn(async move {
            for n in 0..200u32 {
                bar.update(index, &format!("{prefix}{n}"));
                tokio::task::yield_now().await;
            }
        })
    };
    let left = writer(0, 'a');
    let right = writer(1, 'b');

    // Consume renders until the writers quiesce.
    let collector = {
        let bar = Arc::clone(&bar);
        tokio::spawn(async move {
            let mut lines = Vec::new();
            while let Ok(line) =
                tokio::time::timeout(Duration::from_millis(500), bar.render_on_change()).await
            {
                lines.push(line);
            }
            lines
        })
    };

    left.await.unwrap();
    right.await.unwrap();
    let lines = collector.await.unwrap();
    assert!(!lines.is_empty());

    // Every observed field is a complete written value: a prefix plus an
    // intact counter, or the untouched placeholder. Anything else would
    // mean a torn write escaped the lock.
    for line in &lines {
        for field in line.split("  ") {
            if field == "n/a" {
                continue;
            }
            let (prefix, counter) = field.split_at(1);
            assert!(
                prefix == "a" || prefix == "b",
                "unexpected field {field:?} in {line:?}"
            );
            counter
                .parse::<u32>()
                .unwrap_or_else(|_| panic!("torn counter in {field:?}"));
        }
    }

    // The last render coalesces everything written after the previous one,
    // so it must carry both final values.
    assert_eq!(lines.last().unwrap(), "a199  b199");
}

struct Fixed(&'static str);

impl Producer for Fixed {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn produce(&self, _capacity: usize, _args: &str) -> Result<String, ComponentError> {
        Ok(self.0.to_string())
    }
}

struct Counting(Arc<AtomicUsize>);

impl Producer for Counting {
    fn name(&self) -> &'static str {
        "counting"
    }

    fn produce(&self, _capacity: usize, _args: &str) -> Result<String, ComponentError> {
        let n = self.0.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("t{n}"))
    }
}

async fn wait_for(bar: &StatusBar, pred: impl Fn(&str) -> bool) {
    for _ in 0..500 {
        if pred(&bar.compose()) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not reached, line: {:?}", bar.compose());
}

#[tokio::test(flavor = "multi_thread")]
async fn trigger_and_interval_components_coexist() {
    let bar = Arc::new(StatusBar::new(2, config()).unwrap());
    let hits = Arc::new(AtomicUsize::new(0));

    let defs = vec![
        ComponentDef::new(Fixed("steady")).every(Duration::from_millis(10)),
        ComponentDef::new(Counting(Arc::clone(&hits))).on_trigger(TriggerId(7)),
    ];
    let cancel = CancellationToken::new();
    let handles = sched::spawn_all(Arc::clone(&bar), defs, cancel.clone()).unwrap();

    // Both once-tasks land first.
    wait_for(&bar, |line| line == "steady  t1").await;

    // Fire the trigger while the repeating component keeps running; the
    // triggered component must re-run exactly on delivery.
    unsafe {
        libc::raise(TriggerId(7).signum().unwrap());
    }
    wait_for(&bar, |line| line == "steady  t2").await;

    cancel.cancel();
    futures::future::join_all(handles).await;
}

#[tokio::test(flavor = "multi_thread")]
async fn renders_are_coalesced_not_duplicated() {
    let bar = Arc::new(StatusBar::new(3, config()).unwrap());

    // A burst of updates before anyone renders...
    bar.update(0, "one");
    bar.update(1, "two");
    bar.update(2, "three");

    // ...collapses into a single render.
    let line = bar.render_on_change().await;
    assert_eq!(line, "one  two  three");

    let second =
        tokio::time::timeout(Duration::from_millis(200), bar.render_on_change()).await;
    assert!(
        second.is_err(),
        "a second render observed a batch that was already consumed"
    );
}
