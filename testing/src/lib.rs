//! # Marquee Testing
//!
//! Testing utilities and helpers for the Marquee reducer architecture.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - [`ReducerTest`]: Given-When-Then reducer tests
//! - [`TestStore`]: a virtual-time store that runs timers deterministically
//! - Assertion helpers for effects
//!
//! ## Example
//!
//! ```ignore
//! use marquee_testing::TestStore;
//! use std::time::Duration;
//!
//! let mut store = TestStore::new(BannerState::default(), BannerReducer, env);
//! store.send(BannerAction::Show);
//! store.advance(Duration::from_secs(3));
//! assert!(!store.state().visible);
//! ```

use chrono::{DateTime, Utc};
use marquee_core::environment::Clock;


/// Deterministic virtual-time store
pub mod test_store;

pub use reducer_test::{assertions, ReducerTest};
pub use test_store::TestStore;

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use marquee_testing::mocks::FixedClock;
    /// use marquee_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

/// Test helpers and utilities
pub mod helpers {
    /// Install a `tracing` subscriber that writes through the test harness
    ///
    /// Safe to call from every test; only the first call installs.
    /// Respects `RUST_LOG`, defaulting to `debug`.
    pub fn init_test_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "debug".into()),
            )
            .with_test_writer()
            .try_init();
    }
}

pub use mocks::{test_clock, FixedClock};
