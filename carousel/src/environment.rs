//! Carousel environment: injected configuration and collaborators

use crate::config::CarouselConfig;
use crate::router::SlideRouter;
use crate::source::SlideSource;
use marquee_core::environment::{Clock, SystemClock};
use std::fmt;
use std::sync::Arc;

/// Dependencies the carousel reducer needs
///
/// Everything is behind `Arc`, so cloning is cheap (the Store clones the
/// environment into every effect it spawns).
pub struct CarouselEnvironment<T> {
    /// Timings and selection limit
    pub config: CarouselConfig,
    /// Receives activated slide ids
    pub router: Arc<dyn SlideRouter>,
    /// Where `Refresh` loads slides from; `None` disables refreshing
    pub source: Option<Arc<dyn SlideSource<T>>>,
    /// Timestamps slide deliveries
    pub clock: Arc<dyn Clock>,
}

impl<T> CarouselEnvironment<T> {
    /// Create an environment with no data source and the system clock
    #[must_use]
    pub fn new(config: CarouselConfig, router: Arc<dyn SlideRouter>) -> Self {
        Self {
            config,
            router,
            source: None,
            clock: Arc::new(SystemClock),
        }
    }

    /// Set the data source `Refresh` loads from
    #[must_use]
    pub fn with_source(mut self, source: Arc<dyn SlideSource<T>>) -> Self {
        self.source = Some(source);
        self
    }

    /// Replace the clock
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}

impl<T> Clone for CarouselEnvironment<T> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            router: Arc::clone(&self.router),
            source: self.source.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<T> fmt::Debug for CarouselEnvironment<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CarouselEnvironment")
            .field("config", &self.config)
            .field("has_source", &self.source.is_some())
            .finish_non_exhaustive()
    }
}
