//! # Marquee Carousel
//!
//! An infinite-loop carousel controller built on the Marquee reducer
//! architecture.
//!
//! The carousel cycles through a short list of slides:
//! - **Autoplay**: advances every interval; restarts from zero on resume
//! - **Hover pause**: no automatic movement while the pointer is over it
//! - **Debounced navigation**: one manual step per cooldown window
//! - **Seamless wraparound**: boundary clones at both ends of the strip, a
//!   snap back to the real item while animation is off
//!
//! ## Architecture
//!
//! [`CarouselReducer`] is a pure state machine. All three timers (autoplay,
//! cooldown, wrap) are `Effect::Delay`s registered under cancellation ids and
//! tagged with a [`TimerToken`], so cancelling or superseding a timer can
//! never let a stale callback move the strip.
//!
//! ## Example
//!
//! ```no_run
//! use marquee_carousel::{
//!     CarouselConfig, CarouselController, CarouselEnvironment, ChannelRouter, Direction,
//!     EventSummary,
//! };
//! use std::sync::Arc;
//!
//! # async fn example(events: Vec<EventSummary>) {
//! let (router, _routes) = ChannelRouter::new();
//! let env = CarouselEnvironment::new(CarouselConfig::default(), Arc::new(router));
//! let carousel = CarouselController::new(env);
//!
//! let _ = carousel.initialize(events).await;
//! let _ = carousel.advance(Direction::Next).await;
//! assert_eq!(carousel.current_index().await, 2);
//! # }
//! ```

pub mod action;
pub mod config;
pub mod controller;
pub mod environment;
pub mod error;
pub mod event;
pub mod reducer;
pub mod router;
pub mod source;
pub mod state;
pub mod types;
pub mod view;

pub use action::CarouselAction;
pub use config::{CarouselConfig, Config, SourceConfig};
pub use controller::{CarouselController, CarouselStore};
pub use environment::CarouselEnvironment;
pub use error::{ConfigError, SourceError};
pub use event::{EventSummary, Label};
pub use reducer::{CarouselReducer, AUTOPLAY, COOLDOWN, FETCH, WRAP};
pub use router::{ChannelRouter, Route, SlideRouter};
pub use source::{HttpEventSource, SlideSource};
pub use state::{Autoplay, CarouselState, NavigationLock, Phase, TimerToken, WrapPhase};
pub use types::{most_recent, Direction, DisplayItem, ItemId, SlideKind, SlideList};
pub use view::{CarouselView, SlideCard, StripSlide, EMPTY_MESSAGE};
