use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reloadcell::{
    Event, EventKind, InvalidateSource, Load, LoadError, LoadFn, ReloadCell, Subscribe,
};
use tokio::sync::mpsc;
use tokio::sync::broadcast::error::RecvError;

/// Returns 0, 1, 2, ... on successive loads.
struct Counter {
    next: AtomicU32,
    delay: Duration,
}

impl Counter {
    fn new(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            next: AtomicU32::new(0),
            delay,
        })
    }

    fn calls(&self) -> u32 {
        self.next.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Load<u32> for Counter {
    async fn load(&self) -> Result<u32, LoadError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.next.fetch_add(1, Ordering::SeqCst))
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn hundred_readers_eventually_see_tenth_value() {
    let cell = ReloadCell::new(Counter::new(Duration::ZERO), Duration::from_millis(100));

    let mut readers = Vec::with_capacity(100);
    for _ in 0..100 {
        let cell = cell.clone();
        readers.push(tokio::spawn(async move {
            let mut prev = 0;
            loop {
                let seen = cell
                    .access(|n| Ok::<_, LoadError>(*n))
                    .await
                    .expect("loader never fails");
                assert!(seen >= prev, "value went backwards: {prev} -> {seen}");
                prev = seen;
                if seen >= 10 {
                    return;
                }
                tokio::time::sleep(Duration::from_millis(1)).await;
            }
        }));
    }

    let all = async {
        for r in readers {
            r.await.unwrap();
        }
    };
    tokio::time::timeout(Duration::from_secs(10), all)
        .await
        .expect("readers did not reach 10 in time");
}

#[tokio::test(start_paused = true)]
async fn polling_observes_monotonic_values() {
    let counter = Counter::new(Duration::ZERO);
    let cell = ReloadCell::new(counter.clone(), Duration::from_millis(100));

    let mut seen = Vec::new();
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while tokio::time::Instant::now() < deadline {
        seen.push(cell.get().await.unwrap());
        tokio::time::sleep(Duration::from_millis(1)).await;
    }

    assert!(seen.windows(2).all(|w| w[0] <= w[1]));
    assert!(seen.windows(2).any(|w| w[0] == w[1]));
    let last = *seen.last().unwrap();
    assert!(last >= 15, "only reached {last}");
    // One initial load plus at most one per tick.
    assert!(counter.calls() <= 21);
}

#[tokio::test(start_paused = true)]
async fn ticks_without_readers_do_not_reload() {
    let counter = Counter::new(Duration::ZERO);
    let cell = ReloadCell::new(counter.clone(), Duration::from_millis(100));

    assert_eq!(cell.get().await, Ok(0));
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(counter.calls(), 1);
    assert!(cell.state().await.stale);

    assert_eq!(cell.get().await, Ok(1));
    assert_eq!(counter.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn first_tick_fires_after_full_interval() {
    let cell = ReloadCell::new(Counter::new(Duration::ZERO), Duration::from_millis(100));
    let mut rx = cell.subscribe();

    cell.load().await.unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(!cell.state().await.stale);

    tokio::time::sleep(Duration::from_millis(60)).await;
    assert!(cell.state().await.stale);

    let mut sources = Vec::new();
    while let Ok(ev) = rx.try_recv() {
        if ev.kind == EventKind::Invalidated {
            sources.push(ev.source);
        }
    }
    assert_eq!(sources, vec![Some(InvalidateSource::Interval)]);
}

#[tokio::test(start_paused = true)]
async fn concurrent_readers_share_one_reload() {
    let counter = Counter::new(Duration::from_millis(50));
    let cell = ReloadCell::new(counter.clone(), Duration::ZERO);

    assert_eq!(cell.get().await, Ok(0));
    cell.invalidate().await;

    let mut readers = Vec::new();
    for _ in 0..50 {
        let cell = cell.clone();
        readers.push(tokio::spawn(async move { cell.get().await }));
    }
    for r in readers {
        assert_eq!(r.await.unwrap(), Ok(1));
    }
    assert_eq!(counter.calls(), 2);
}

#[tokio::test]
async fn recovers_after_loader_comes_back() {
    let down = Arc::new(AtomicBool::new(true));
    let d = down.clone();
    let cell = ReloadCell::new(
        LoadFn::new(move || {
            let d = d.clone();
            async move {
                if d.load(Ordering::SeqCst) {
                    Err(LoadError::fail("upstream unavailable"))
                } else {
                    Ok("ready".to_string())
                }
            }
        }),
        Duration::ZERO,
    );

    for _ in 0..3 {
        let mut called = false;
        let res = cell
            .access(|_| {
                called = true;
                Ok::<_, ()>(())
            })
            .await;
        assert!(res.is_err());
        assert!(!called);
    }

    down.store(false, Ordering::SeqCst);
    assert_eq!(cell.get().await.unwrap(), "ready");

    down.store(true, Ordering::SeqCst);
    cell.invalidate().await;
    assert_eq!(cell.get().await.unwrap(), "ready");
    assert!(cell.state().await.valid);
}

struct Forward(mpsc::UnboundedSender<Event>);

#[async_trait]
impl Subscribe for Forward {
    async fn on_event(&self, event: &Event) {
        let _ = self.0.send(event.clone());
    }

    fn name(&self) -> &'static str {
        "forward"
    }
}

#[tokio::test]
async fn subscribers_see_degraded_reads() {
    let down = Arc::new(AtomicBool::new(false));
    let d = down.clone();
    let (tx, mut rx) = mpsc::unbounded_channel();

    let cell = ReloadCell::builder(LoadFn::new(move || {
        let d = d.clone();
        async move {
            if d.load(Ordering::SeqCst) {
                Err(LoadError::fail("timeout talking to origin"))
            } else {
                Ok(7_u64)
            }
        }
    }))
    .with_name("origin")
    .with_subscribers(vec![Arc::new(Forward(tx))])
    .build();

    assert_eq!(cell.name(), "origin");
    assert_eq!(cell.get().await, Ok(7));
    down.store(true, Ordering::SeqCst);
    cell.invalidate().await;
    assert_eq!(cell.get().await, Ok(7));

    let stale = loop {
        let ev = rx.recv().await.expect("listener stopped early");
        if ev.kind == EventKind::StaleServed {
            break ev;
        }
    };
    assert_eq!(stale.cell.as_deref(), Some("origin"));
    assert_eq!(stale.generation, Some(1));
    assert_eq!(
        stale.reason.as_deref(),
        Some("load failed: timeout talking to origin")
    );
}

#[tokio::test(start_paused = true)]
async fn dropping_last_handle_releases_everything() {
    let counter = Counter::new(Duration::ZERO);
    let cell = ReloadCell::new(counter.clone(), Duration::from_millis(10));
    let other = cell.clone();
    let mut rx = cell.subscribe();

    assert_eq!(cell.get().await, Ok(0));
    drop(cell);
    assert_eq!(other.get().await, Ok(0));
    drop(other);

    assert_eq!(Arc::strong_count(&counter), 1);
    loop {
        match rx.recv().await {
            Ok(_) => continue,
            Err(RecvError::Closed) => break,
            Err(RecvError::Lagged(_)) => continue,
        }
    }
}

struct Exploding;

#[async_trait]
impl Subscribe for Exploding {
    async fn on_event(&self, _event: &Event) {
        panic!("subscriber exploded");
    }

    fn name(&self) -> &'static str {
        "exploding"
    }
}

#[tokio::test]
async fn panicking_subscriber_is_reported_once() {
    let (tx, mut forwarded) = mpsc::unbounded_channel();
    let cell = ReloadCell::builder(Counter::new(Duration::ZERO))
        .with_subscribers(vec![Arc::new(Exploding), Arc::new(Forward(tx))])
        .build();
    let mut rx = cell.subscribe();

    cell.invalidate().await;
    tokio::time::sleep(Duration::from_millis(200)).await;

    let mut panics = 0;
    while let Ok(ev) = rx.try_recv() {
        if ev.kind == EventKind::SubscriberPanicked {
            assert_eq!(ev.cell.as_deref(), Some("exploding"));
            panics += 1;
        }
    }
    assert_eq!(panics, 1);

    let mut seen = Vec::new();
    while let Ok(ev) = forwarded.try_recv() {
        seen.push(ev.kind);
    }
    assert_eq!(
        seen,
        vec![EventKind::Invalidated, EventKind::SubscriberPanicked]
    );
}

/// Always fails after a short delay; records whether two attempts ever overlapped.
struct Flaky {
    calls: AtomicU32,
    in_flight: AtomicBool,
    overlapped: AtomicBool,
}

#[async_trait]
impl Load<u32> for Flaky {
    async fn load(&self) -> Result<u32, LoadError> {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            self.overlapped.store(true, Ordering::SeqCst);
        }
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(10)).await;
        self.in_flight.store(false, Ordering::SeqCst);
        Err(LoadError::fail("cold backend"))
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn first_load_attempts_never_overlap() {
    let flaky = Arc::new(Flaky {
        calls: AtomicU32::new(0),
        in_flight: AtomicBool::new(false),
        overlapped: AtomicBool::new(false),
    });
    let cell = ReloadCell::new(flaky.clone(), Duration::ZERO);

    let mut readers = Vec::new();
    for _ in 0..20 {
        let cell = cell.clone();
        readers.push(tokio::spawn(async move {
            cell.access(|n| Ok::<_, ()>(*n)).await
        }));
    }
    for r in readers {
        let err = r.await.unwrap().unwrap_err();
        assert_eq!(err.load_error(), Some(&LoadError::fail("cold backend")));
    }

    assert_eq!(flaky.calls.load(Ordering::SeqCst), 20);
    assert!(!flaky.overlapped.load(Ordering::SeqCst));
    assert!(!cell.state().await.valid);
}
