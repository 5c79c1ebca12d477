//! Carousel actions
//!
//! Commands come from the host (mount, pointer, buttons, clicks). Events are
//! fed back by the carousel's own effects: timers firing and fetches
//! completing.

use crate::state::TimerToken;
use crate::types::Direction;
use marquee_macros::Action;

/// Every input the carousel reducer handles
#[derive(Action, Debug, Clone, PartialEq)]
pub enum CarouselAction<T> {
    // ========== Commands ==========
    /// Mount with the given slides (already ranked and limited by the caller)
    #[command]
    Initialize {
        /// Slides to show
        items: Vec<T>,
    },

    /// Reload slides from the data source
    #[command]
    Refresh,

    /// Manual navigation (previous/next buttons)
    #[command]
    Advance {
        /// Which way to move
        direction: Direction,
    },

    /// Pointer entered the carousel
    #[command]
    Pause,

    /// Pointer left the carousel
    #[command]
    Resume,

    /// A slide at the given strip position was clicked
    #[command]
    Activate {
        /// Strip position, `0..=N+1`
        position: usize,
    },

    /// Unmount: cancel every timer and pending fetch
    #[command]
    Teardown,

    // ========== Events ==========
    /// Autoplay interval elapsed
    #[event]
    AutoplayTick {
        /// Token the tick was scheduled with
        token: TimerToken,
    },

    /// Manual navigation cooldown elapsed
    #[event]
    CooldownElapsed {
        /// Token the unlock was scheduled with
        token: TimerToken,
    },

    /// Slide into a boundary clone finished animating
    #[event]
    WrapSlideFinished {
        /// Token the snap was scheduled with
        token: TimerToken,
    },

    /// Unanimated window after the wrap snap is over
    #[event]
    WrapSettled {
        /// Token the re-enable was scheduled with
        token: TimerToken,
    },

    /// Data source delivered slides
    #[event]
    SlidesFetched {
        /// Token the fetch was started with
        token: TimerToken,
        /// Everything the source returned, before ranking
        items: Vec<T>,
    },

    /// Data source failed
    #[event]
    FetchFailed {
        /// Token the fetch was started with
        token: TimerToken,
        /// Error description
        reason: String,
    },
}
