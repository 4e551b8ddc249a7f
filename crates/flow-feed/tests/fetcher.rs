// crates/flow-feed/tests/fetcher.rs
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use flow_core::{Action, CallPut, DashboardState, FilterModel, OptionsFlow, QueryParams, PAGE_SIZE};
use flow_feed::{feed_channel, spawn_fetcher, FeedError, FeedEvent, FeedRx, PageSource};
use tokio::time::Instant;

const DEBOUNCE: Duration = Duration::from_millis(300);

fn row(tag: &str) -> OptionsFlow {
    OptionsFlow {
        time: tag.to_string(),
        ticker: "QQQ".to_string(),
        callput: CallPut::Call,
        strike: 440.0,
        expiration: "2024-05-17".to_string(),
        price: 1.0,
        size: 1,
        totalpremium: 100.0,
        is_sweep: String::new(),
        dte: None,
    }
}

fn params(page: usize) -> QueryParams {
    QueryParams {
        page,
        page_size: PAGE_SIZE,
        sort: Vec::new(),
        filters: FilterModel::default(),
    }
}

/// Records every request; page N answers after `delays[N]` with N+1 rows.
#[derive(Clone, Default)]
struct ScriptedSource {
    calls: Arc<Mutex<Vec<QueryParams>>>,
    delays: Vec<Duration>,
    fail: bool,
}

impl ScriptedSource {
    fn calls(&self) -> Vec<QueryParams> {
        self.calls.lock().expect("calls lock").clone()
    }
}

impl PageSource for ScriptedSource {
    fn fetch_page(
        &self,
        params: QueryParams,
    ) -> impl Future<Output = Result<Vec<OptionsFlow>, FeedError>> + Send {
        self.calls.lock().expect("calls lock").push(params.clone());
        let delay = self.delays.get(params.page).copied().unwrap_or_default();
        let fail = self.fail;

        async move {
            tokio::time::sleep(delay).await;
            if fail {
                return Err(FeedError::Status {
                    status: 502,
                    body: "bad gateway".to_string(),
                });
            }
            Ok((0..=params.page).map(|i| row(&format!("p{}-{}", params.page, i))).collect())
        }
    }
}

async fn next_event(rx: &mut FeedRx) -> FeedEvent {
    tokio::time::timeout(Duration::from_secs(30), rx.recv())
        .await
        .expect("event should arrive")
        .expect("channel should stay open")
}

#[tokio::test(start_paused = true)]
async fn burst_collapses_to_latest_parameters() {
    let source = ScriptedSource::default();
    let (tx, mut rx) = feed_channel();
    let fetcher = spawn_fetcher(source.clone(), DEBOUNCE, tx);
    let started = Instant::now();

    fetcher.request(params(0));
    tokio::time::sleep(Duration::from_millis(100)).await;
    fetcher.request(params(1));
    tokio::time::sleep(Duration::from_millis(100)).await;
    fetcher.request(params(2));

    assert_eq!(next_event(&mut rx).await, FeedEvent::FetchStarted { seq: 1 });
    assert!(started.elapsed() >= Duration::from_millis(500));

    match next_event(&mut rx).await {
        FeedEvent::PageLoaded { seq, page, rows } => {
            assert_eq!((seq, page, rows.len()), (1, 2, 3));
        }
        other => panic!("unexpected event: {other:?}"),
    }

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(rx.try_recv().is_err(), "only one request should be issued");
    assert_eq!(source.calls().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn spaced_requests_get_increasing_sequence_numbers() {
    let source = ScriptedSource::default();
    let (tx, mut rx) = feed_channel();
    let fetcher = spawn_fetcher(source.clone(), DEBOUNCE, tx);

    fetcher.request(params(0));
    assert_eq!(next_event(&mut rx).await, FeedEvent::FetchStarted { seq: 1 });
    assert!(matches!(next_event(&mut rx).await, FeedEvent::PageLoaded { seq: 1, .. }));

    fetcher.request(params(1));
    assert_eq!(next_event(&mut rx).await, FeedEvent::FetchStarted { seq: 2 });
    assert!(matches!(next_event(&mut rx).await, FeedEvent::PageLoaded { seq: 2, page: 1, .. }));

    let pages: Vec<usize> = source.calls().iter().map(|p| p.page).collect();
    assert_eq!(pages, vec![0, 1]);
}

#[tokio::test(start_paused = true)]
async fn failures_become_page_failed_events() {
    let source = ScriptedSource {
        fail: true,
        ..ScriptedSource::default()
    };
    let (tx, mut rx) = feed_channel();
    let fetcher = spawn_fetcher(source, DEBOUNCE, tx);

    fetcher.request(params(0));

    assert_eq!(next_event(&mut rx).await, FeedEvent::FetchStarted { seq: 1 });
    match next_event(&mut rx).await {
        FeedEvent::PageFailed { seq, reason } => {
            assert_eq!(seq, 1);
            assert!(reason.contains("502"), "{reason}");
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn slow_old_response_cannot_overwrite_newer_page() {
    // Page 0 takes 5s, page 1 answers immediately.
    let source = ScriptedSource {
        delays: vec![Duration::from_secs(5), Duration::ZERO],
        ..ScriptedSource::default()
    };
    let (tx, mut rx) = feed_channel();
    let fetcher = spawn_fetcher(source, DEBOUNCE, tx);
    let mut state = DashboardState::new();

    fetcher.request(params(0));
    tokio::time::sleep(Duration::from_secs(1)).await;
    fetcher.request(params(1));

    let mut order = Vec::new();
    while order.len() < 4 {
        let event = next_event(&mut rx).await;
        order.push(event.clone());
        match event {
            FeedEvent::FetchStarted { seq } => {
                state.update(Action::FetchStarted { seq });
            }
            FeedEvent::PageLoaded { seq, page, rows } => {
                state.update(Action::PageLoaded { seq, page, rows });
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    // The newer request resolved first; the stale one arrived last.
    assert!(matches!(order[2], FeedEvent::PageLoaded { seq: 2, .. }));
    assert!(matches!(order[3], FeedEvent::PageLoaded { seq: 1, .. }));
    assert_eq!(state.records.len(), 2);
    assert_eq!(state.records.get(0).map(|r| r.time.as_str()), Some("p1-0"));
    assert!(!state.loading);
}
