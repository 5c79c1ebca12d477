//! Carousel state
//!
//! Three timers share the strip position: autoplay, the navigation cooldown
//! and the two-stage wrap sequence. Each is modelled as its own small state
//! machine so the reducer can tell which timer a callback belongs to and
//! whether it is still current.

use crate::types::{DisplayItem, SlideList};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Generation tag carried by every scheduled timer action
///
/// A timer action is only honoured if its token matches the one its state
/// machine is waiting for. Tokens are never reused within a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerToken(u64);

impl TimerToken {
    /// The raw generation number
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Auto-advance timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Autoplay {
    /// No slides, or the carousel is torn down
    #[default]
    Stopped,
    /// A tick is scheduled
    Running {
        /// Token of the scheduled tick
        token: TimerToken,
    },
    /// Slides are present but the pointer is over the carousel
    Paused,
}

/// Manual navigation debounce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavigationLock {
    /// Manual navigation accepted
    #[default]
    Open,
    /// Manual navigation ignored until the cooldown elapses
    Cooldown {
        /// Token of the scheduled unlock
        token: TimerToken,
    },
}

/// Boundary wrap sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapPhase {
    /// Not wrapping
    #[default]
    Settled,
    /// Animating into a boundary clone; the snap is scheduled
    Sliding {
        /// Token of the scheduled snap
        token: TimerToken,
    },
    /// Snapped to the real item with animation off; re-enable is scheduled
    Snapped {
        /// Token of the scheduled re-enable
        token: TimerToken,
    },
}

/// Outstanding slide fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchStatus {
    /// Nothing in flight
    #[default]
    Idle,
    /// A fetch is in flight
    Loading {
        /// Token the result must carry
        token: TimerToken,
    },
}

/// Named carousel phase, derived from the timer state machines
///
/// Wrap phases take precedence over the cooldown, which takes precedence
/// over autoplay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// No slides; the empty fallback is shown
    Empty,
    /// Slides shown, nothing scheduled (paused or torn down)
    Idle,
    /// Waiting for the next autoplay tick
    AutoAdvancing,
    /// Manual navigation is locked
    ManualCooldown,
    /// Animating into a boundary clone
    WrappingSlide,
    /// Snapped back to the real item, animation off
    WrappingSnap,
}

/// Carousel state
///
/// Fields are private: every transition goes through the reducer so the wrap
/// invariants hold. Positions are strip positions in `0..=N+1` (see
/// [`crate::types`]).
#[derive(Debug, Clone)]
pub struct CarouselState<T> {
    pub(crate) slides: SlideList<T>,
    pub(crate) current_index: usize,
    pub(crate) paused: bool,
    pub(crate) mounted: bool,
    pub(crate) autoplay: Autoplay,
    pub(crate) lock: NavigationLock,
    pub(crate) wrap: WrapPhase,
    pub(crate) fetch: FetchStatus,
    pub(crate) last_loaded_at: Option<DateTime<Utc>>,
    next_token: u64,
}

impl<T> Default for CarouselState<T> {
    fn default() -> Self {
        Self {
            slides: SlideList::default(),
            current_index: 1,
            paused: false,
            mounted: false,
            autoplay: Autoplay::Stopped,
            lock: NavigationLock::Open,
            wrap: WrapPhase::Settled,
            fetch: FetchStatus::Idle,
            last_loaded_at: None,
            next_token: 0,
        }
    }
}

impl<T> CarouselState<T> {
    /// Current strip position
    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.current_index
    }

    /// Returns true while the pointer is over the carousel
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// Returns true unless the wrap snap has animation switched off
    #[must_use]
    pub const fn is_transitioning(&self) -> bool {
        !matches!(self.wrap, WrapPhase::Snapped { .. })
    }

    /// Returns true while manual navigation is debounced
    #[must_use]
    pub const fn is_navigation_locked(&self) -> bool {
        matches!(self.lock, NavigationLock::Cooldown { .. })
    }

    /// Returns true between `Initialize` and `Teardown`
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Returns true while a slide fetch is outstanding
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.fetch, FetchStatus::Loading { .. })
    }

    /// The slides being shown
    #[must_use]
    pub const fn slides(&self) -> &SlideList<T> {
        &self.slides
    }

    /// When the current slides were delivered by the data source
    #[must_use]
    pub const fn last_loaded_at(&self) -> Option<DateTime<Utc>> {
        self.last_loaded_at
    }

    /// Autoplay timer state
    #[must_use]
    pub const fn autoplay(&self) -> Autoplay {
        self.autoplay
    }

    /// Navigation lock state
    #[must_use]
    pub const fn navigation_lock(&self) -> NavigationLock {
        self.lock
    }

    /// Wrap sequence state
    #[must_use]
    pub const fn wrap_phase(&self) -> WrapPhase {
        self.wrap
    }

    /// 0-based index of the real item the indicators highlight
    ///
    /// Boundary clones map to the item they duplicate, so the result is
    /// always in `0..N`. `None` when there are no slides.
    #[must_use]
    pub fn active_real_index(&self) -> Option<usize> {
        self.slides.real_index(self.current_index)
    }

    /// The real item currently shown
    #[must_use]
    pub fn active_item(&self) -> Option<&T> {
        self.slides.item_at(self.current_index)
    }

    /// Named phase of the carousel
    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.slides.is_empty() {
            return Phase::Empty;
        }
        match (self.wrap, self.lock, self.autoplay) {
            (WrapPhase::Sliding { .. }, _, _) => Phase::WrappingSlide,
            (WrapPhase::Snapped { .. }, _, _) => Phase::WrappingSnap,
            (WrapPhase::Settled, NavigationLock::Cooldown { .. }, _) => Phase::ManualCooldown,
            (WrapPhase::Settled, NavigationLock::Open, Autoplay::Running { .. }) => {
                Phase::AutoAdvancing
            },
            (WrapPhase::Settled, NavigationLock::Open, Autoplay::Stopped | Autoplay::Paused) => {
                Phase::Idle
            },
        }
    }

    /// Returns true if `position` is a boundary clone
    #[must_use]
    pub fn is_boundary(&self, position: usize) -> bool {
        !self.slides.is_empty() && (position == 0 || position == self.slides.last_position())
    }

    /// Issue a fresh timer token
    pub(crate) fn issue_token(&mut self) -> TimerToken {
        self.next_token += 1;
        TimerToken(self.next_token)
    }
}

impl<T: DisplayItem> CarouselState<T> {
    /// Create a mounted state showing `items` at position 1
    ///
    /// No timers are scheduled; use `CarouselAction::Initialize` through a
    /// store to start autoplay.
    #[must_use]
    pub fn with_slides(items: Vec<T>) -> Self {
        Self {
            slides: SlideList::new(items),
            mounted: true,
            ..Self::default()
        }
    }
}
