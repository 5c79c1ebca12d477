//! Shared fixtures for carousel integration tests

#![allow(dead_code)] // Not every test binary uses every fixture
#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect

use chrono::{DateTime, TimeZone, Utc};
use marquee_carousel::source::FetchFuture;
use marquee_carousel::{
    CarouselConfig, CarouselEnvironment, CarouselReducer, CarouselState, DisplayItem, ItemId,
    SlideRouter, SlideSource, SourceError,
};
use marquee_testing::helpers::init_test_tracing;
use marquee_testing::{test_clock, TestStore};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const INTERVAL: Duration = Duration::from_millis(5000);
pub const COOLDOWN_TIME: Duration = Duration::from_millis(500);
pub const TRANSITION: Duration = Duration::from_millis(500);
pub const SETTLE: Duration = Duration::from_millis(50);

/// A slide with an id and an optional publication time (seconds)
#[derive(Debug, Clone, PartialEq)]
pub struct Slide {
    pub id: &'static str,
    pub published: Option<i64>,
}

impl DisplayItem for Slide {
    fn id(&self) -> ItemId {
        ItemId::from(self.id)
    }

    fn published_at(&self) -> Option<DateTime<Utc>> {
        self.published.and_then(|s| Utc.timestamp_opt(s, 0).single())
    }
}

pub fn slides(ids: &[&'static str]) -> Vec<Slide> {
    ids.iter()
        .map(|&id| Slide {
            id,
            published: None,
        })
        .collect()
}

pub fn dated(id: &'static str, published: i64) -> Slide {
    Slide {
        id,
        published: Some(published),
    }
}

/// Router recording every opened id
#[derive(Debug, Default)]
pub struct RecordingRouter {
    opened: Mutex<Vec<ItemId>>,
}

impl RecordingRouter {
    pub fn opened(&self) -> Vec<ItemId> {
        self.opened.lock().unwrap().clone()
    }
}

impl SlideRouter for RecordingRouter {
    fn open(&self, id: &ItemId) {
        self.opened.lock().unwrap().push(id.clone());
    }
}

/// Source answering every fetch with the same result, optionally after a delay
pub struct StaticSource {
    result: Result<Vec<Slide>, SourceError>,
    latency: Duration,
    calls: AtomicUsize,
}

impl StaticSource {
    pub fn ok(items: Vec<Slide>) -> Self {
        Self {
            result: Ok(items),
            latency: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(error: SourceError) -> Self {
        Self {
            result: Err(error),
            latency: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    /// Answer only after `latency` (tokio time)
    pub fn slow(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SlideSource<Slide> for StaticSource {
    fn fetch(&self) -> FetchFuture<'_, Slide> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let result = self.result.clone();
        let latency = self.latency;
        Box::pin(async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            result
        })
    }
}

pub fn env_with(router: Arc<RecordingRouter>) -> CarouselEnvironment<Slide> {
    init_test_tracing();
    CarouselEnvironment::new(CarouselConfig::default(), router).with_clock(Arc::new(test_clock()))
}

pub type CarouselTestStore = TestStore<CarouselReducer<Slide>>;

/// Virtual-time store with default timings and a recording router
pub fn virtual_store() -> (CarouselTestStore, Arc<RecordingRouter>) {
    let router = Arc::new(RecordingRouter::default());
    let store = TestStore::new(
        CarouselState::default(),
        CarouselReducer::new(),
        env_with(Arc::clone(&router)),
    );
    (store, router)
}

/// Virtual-time store refreshing from `source`
pub fn virtual_store_with_source(source: Arc<StaticSource>) -> CarouselTestStore {
    let router = Arc::new(RecordingRouter::default());
    TestStore::new(
        CarouselState::default(),
        CarouselReducer::new(),
        env_with(router).with_source(source),
    )
}
