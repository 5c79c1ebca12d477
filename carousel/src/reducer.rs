//! Carousel reducer
//!
//! Pure transition logic. Every timer is an `Effect::Delay` registered under
//! one of the cancellation ids below and carries a [`TimerToken`]; a timer
//! action whose token is no longer current is dropped, so a callback that
//! races a cancellation can never move the strip.

use crate::action::CarouselAction;
use crate::environment::CarouselEnvironment;
use crate::state::{Autoplay, CarouselState, FetchStatus, NavigationLock, TimerToken, WrapPhase};
use crate::types::{most_recent, Direction, DisplayItem, SlideList};
use marquee_core::effect::{Effect, EffectId};
use marquee_core::{async_effect, cancellable_delay, reducer::Reducer, smallvec, SmallVec};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Cancellation id of the autoplay tick
pub const AUTOPLAY: EffectId = EffectId::new("carousel.autoplay");
/// Cancellation id of the navigation unlock
pub const COOLDOWN: EffectId = EffectId::new("carousel.cooldown");
/// Cancellation id of both wrap stages
pub const WRAP: EffectId = EffectId::new("carousel.wrap");
/// Cancellation id of the slide fetch
pub const FETCH: EffectId = EffectId::new("carousel.fetch");

type Effects<T> = SmallVec<[Effect<CarouselAction<T>>; 4]>;

/// Carousel reducer
///
/// Generic over the slide item type.
pub struct CarouselReducer<T> {
    _phantom: PhantomData<fn() -> T>,
}

impl<T> CarouselReducer<T> {
    /// Create a new carousel reducer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<T> Default for CarouselReducer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for CarouselReducer<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for CarouselReducer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CarouselReducer")
    }
}

impl<T> CarouselReducer<T>
where
    T: DisplayItem + Clone + Send + Sync + 'static,
{
    fn none() -> Effects<T> {
        smallvec![Effect::None]
    }

    /// Schedule the next autoplay tick, or park autoplay while paused
    fn start_autoplay(
        state: &mut CarouselState<T>,
        env: &CarouselEnvironment<T>,
    ) -> Effect<CarouselAction<T>> {
        if state.paused {
            state.autoplay = Autoplay::Paused;
            return Effect::None;
        }
        let token = state.issue_token();
        state.autoplay = Autoplay::Running { token };
        cancellable_delay! {
            id: AUTOPLAY,
            duration: env.config.autoplay_interval,
            action: CarouselAction::AutoplayTick { token }
        }
    }

    /// Swap in a new slide list: position 1, all timers restarted
    fn replace_slides(
        state: &mut CarouselState<T>,
        items: Vec<T>,
        env: &CarouselEnvironment<T>,
    ) -> Effects<T> {
        let mut effects: Effects<T> = smallvec![
            Effect::Cancel(AUTOPLAY),
            Effect::Cancel(COOLDOWN),
            Effect::Cancel(WRAP),
        ];

        state.slides = SlideList::new(items);
        state.current_index = 1;
        state.lock = NavigationLock::Open;
        state.wrap = WrapPhase::Settled;
        state.autoplay = Autoplay::Stopped;

        if state.slides.is_empty() {
            tracing::debug!("No slides, showing empty state");
            return effects;
        }

        tracing::debug!(count = state.slides.len(), "Slides replaced");
        effects.push(Self::start_autoplay(state, env));
        effects
    }

    /// Next strip position in `direction`, if it stays within `0..=N+1`
    fn step(state: &CarouselState<T>, direction: Direction) -> Option<usize> {
        match direction {
            Direction::Next => {
                (state.current_index < state.slides.last_position()).then(|| state.current_index + 1)
            },
            Direction::Prev => state.current_index.checked_sub(1),
        }
    }

    /// Move to `target`, interrupting any wrap and starting one at a boundary
    fn move_to(
        state: &mut CarouselState<T>,
        target: usize,
        env: &CarouselEnvironment<T>,
        effects: &mut Effects<T>,
    ) {
        if state.wrap != WrapPhase::Settled {
            tracing::trace!(from = state.current_index, to = target, "Navigation interrupts wrap");
            effects.push(Effect::Cancel(WRAP));
            state.wrap = WrapPhase::Settled;
        }

        state.current_index = target;

        if state.is_boundary(target) {
            let token = state.issue_token();
            state.wrap = WrapPhase::Sliding { token };
            effects.push(cancellable_delay! {
                id: WRAP,
                duration: env.config.transition,
                action: CarouselAction::WrapSlideFinished { token }
            });
        }
    }

    /// Manual navigation, debounced by the navigation lock
    ///
    /// A step past a clone is dropped without taking the lock: `Next` on the
    /// trailing clone or `Prev` on the leading one, while the strip waits for
    /// the wrap snap. The press is not queued.
    fn advance(
        state: &mut CarouselState<T>,
        direction: Direction,
        env: &CarouselEnvironment<T>,
    ) -> Effects<T> {
        if !state.mounted || state.slides.is_empty() {
            return Self::none();
        }
        if state.is_navigation_locked() {
            tracing::debug!(?direction, "Navigation locked, ignoring");
            return Self::none();
        }
        let Some(target) = Self::step(state, direction) else {
            tracing::debug!(?direction, position = state.current_index, "Already on the boundary clone, ignoring");
            return Self::none();
        };

        let token = state.issue_token();
        state.lock = NavigationLock::Cooldown { token };
        let mut effects: Effects<T> = smallvec![cancellable_delay! {
            id: COOLDOWN,
            duration: env.config.navigation_cooldown,
            action: CarouselAction::CooldownElapsed { token }
        }];

        tracing::debug!(?direction, from = state.current_index, to = target, "Manual navigation");
        Self::move_to(state, target, env, &mut effects);
        effects
    }

    fn autoplay_tick(
        state: &mut CarouselState<T>,
        token: TimerToken,
        env: &CarouselEnvironment<T>,
    ) -> Effects<T> {
        if state.autoplay != (Autoplay::Running { token }) {
            tracing::trace!(token = token.get(), "Stale autoplay tick dropped");
            return Self::none();
        }

        let mut effects: Effects<T> = smallvec![Self::start_autoplay(state, env)];
        match Self::step(state, Direction::Next) {
            Some(target) => {
                tracing::trace!(from = state.current_index, to = target, "Autoplay advance");
                Self::move_to(state, target, env, &mut effects);
            },
            None => tracing::trace!("Autoplay tick on the trailing clone, waiting for wrap"),
        }
        effects
    }

    fn pause(state: &mut CarouselState<T>) -> Effects<T> {
        if state.paused {
            return Self::none();
        }
        state.paused = true;
        tracing::debug!("Carousel paused");

        if matches!(state.autoplay, Autoplay::Running { .. }) {
            state.autoplay = Autoplay::Paused;
            return smallvec![Effect::Cancel(AUTOPLAY)];
        }
        Self::none()
    }

    fn resume(state: &mut CarouselState<T>, env: &CarouselEnvironment<T>) -> Effects<T> {
        if !state.paused {
            return Self::none();
        }
        state.paused = false;
        tracing::debug!("Carousel resumed");

        if !state.mounted || state.slides.is_empty() {
            return Self::none();
        }
        smallvec![Effect::Cancel(AUTOPLAY), Self::start_autoplay(state, env)]
    }

    fn activate(
        state: &CarouselState<T>,
        position: usize,
        env: &CarouselEnvironment<T>,
    ) -> Effects<T> {
        if !state.mounted {
            return Self::none();
        }
        let Some(item) = state.slides.item_at(position) else {
            tracing::debug!(position, "Activation outside the strip ignored");
            return Self::none();
        };

        let id = item.id();
        tracing::debug!(%id, position, "Slide activated");
        let router = Arc::clone(&env.router);
        smallvec![async_effect! {
            router.open(&id);
            None
        }]
    }

    fn teardown(state: &mut CarouselState<T>) -> Effects<T> {
        tracing::debug!("Carousel torn down");
        state.mounted = false;
        state.paused = false;
        state.autoplay = Autoplay::Stopped;
        state.lock = NavigationLock::Open;
        state.wrap = WrapPhase::Settled;
        state.fetch = FetchStatus::Idle;

        smallvec![
            Effect::Cancel(AUTOPLAY),
            Effect::Cancel(COOLDOWN),
            Effect::Cancel(WRAP),
            Effect::Cancel(FETCH),
        ]
    }

    fn cooldown_elapsed(state: &mut CarouselState<T>, token: TimerToken) -> Effects<T> {
        if state.lock == (NavigationLock::Cooldown { token }) {
            state.lock = NavigationLock::Open;
        } else {
            tracing::trace!(token = token.get(), "Stale cooldown dropped");
        }
        Self::none()
    }

    fn wrap_slide_finished(
        state: &mut CarouselState<T>,
        token: TimerToken,
        env: &CarouselEnvironment<T>,
    ) -> Effects<T> {
        if state.wrap != (WrapPhase::Sliding { token }) {
            tracing::trace!(token = token.get(), "Stale wrap snap dropped");
            return Self::none();
        }

        let n = state.slides.len();
        let snapped = match state.current_index {
            0 => n,
            p if p == n + 1 => 1,
            _ => {
                state.wrap = WrapPhase::Settled;
                return Self::none();
            },
        };

        tracing::trace!(from = state.current_index, to = snapped, "Wrap snap");
        state.current_index = snapped;
        let token = state.issue_token();
        state.wrap = WrapPhase::Snapped { token };
        smallvec![cancellable_delay! {
            id: WRAP,
            duration: env.config.settle,
            action: CarouselAction::WrapSettled { token }
        }]
    }

    fn wrap_settled(state: &mut CarouselState<T>, token: TimerToken) -> Effects<T> {
        if state.wrap == (WrapPhase::Snapped { token }) {
            state.wrap = WrapPhase::Settled;
        } else {
            tracing::trace!(token = token.get(), "Stale wrap settle dropped");
        }
        Self::none()
    }

    fn refresh(state: &mut CarouselState<T>, env: &CarouselEnvironment<T>) -> Effects<T> {
        if !state.mounted {
            tracing::debug!("Refresh before mount ignored");
            return Self::none();
        }
        let Some(source) = env.source.clone() else {
            tracing::debug!("No slide source configured, refresh ignored");
            return Self::none();
        };

        let token = state.issue_token();
        state.fetch = FetchStatus::Loading { token };
        tracing::debug!("Fetching slides");

        let fetch = async_effect! {
            match source.fetch().await {
                Ok(items) => Some(CarouselAction::SlidesFetched { token, items }),
                Err(error) => Some(CarouselAction::FetchFailed {
                    token,
                    reason: error.to_string(),
                }),
            }
        };
        smallvec![Effect::Cancel(FETCH), fetch.cancellable(FETCH)]
    }

    fn slides_fetched(
        state: &mut CarouselState<T>,
        token: TimerToken,
        items: Vec<T>,
        env: &CarouselEnvironment<T>,
    ) -> Effects<T> {
        if state.fetch != (FetchStatus::Loading { token }) {
            tracing::trace!(token = token.get(), "Stale fetch result dropped");
            return Self::none();
        }
        state.fetch = FetchStatus::Idle;

        let received = items.len();
        let selected = most_recent(items, env.config.popular_limit);
        tracing::info!(received, shown = selected.len(), "Slides loaded");

        state.last_loaded_at = Some(env.clock.now());
        Self::replace_slides(state, selected, env)
    }

    fn fetch_failed(
        state: &mut CarouselState<T>,
        token: TimerToken,
        reason: &str,
        env: &CarouselEnvironment<T>,
    ) -> Effects<T> {
        if state.fetch != (FetchStatus::Loading { token }) {
            tracing::trace!(token = token.get(), "Stale fetch failure dropped");
            return Self::none();
        }
        state.fetch = FetchStatus::Idle;

        tracing::warn!(%reason, "Slide fetch failed, showing empty state");
        state.last_loaded_at = None;
        Self::replace_slides(state, Vec::new(), env)
    }
}

impl<T> Reducer for CarouselReducer<T>
where
    T: DisplayItem + Clone + Send + Sync + 'static,
{
    type State = CarouselState<T>;
    type Action = CarouselAction<T>;
    type Environment = CarouselEnvironment<T>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Commands ==========
            CarouselAction::Initialize { items } => {
                tracing::debug!(count = items.len(), "Carousel initialized");
                state.mounted = true;
                Self::replace_slides(state, items, env)
            },
            CarouselAction::Refresh => Self::refresh(state, env),
            CarouselAction::Advance { direction } => Self::advance(state, direction, env),
            CarouselAction::Pause => Self::pause(state),
            CarouselAction::Resume => Self::resume(state, env),
            CarouselAction::Activate { position } => Self::activate(state, position, env),
            CarouselAction::Teardown => Self::teardown(state),

            // ========== Events ==========
            CarouselAction::AutoplayTick { token } => Self::autoplay_tick(state, token, env),
            CarouselAction::CooldownElapsed { token } => Self::cooldown_elapsed(state, token),
            CarouselAction::WrapSlideFinished { token } => {
                Self::wrap_slide_finished(state, token, env)
            },
            CarouselAction::WrapSettled { token } => Self::wrap_settled(state, token),
            CarouselAction::SlidesFetched { token, items } => {
                Self::slides_fetched(state, token, items, env)
            },
            CarouselAction::FetchFailed { token, reason } => {
                Self::fetch_failed(state, token, &reason, env)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CarouselConfig;
    use crate::router::SlideRouter;
    use crate::state::Phase;
    use crate::types::ItemId;
    use marquee_testing::{assertions, ReducerTest};
    use std::time::Duration;

    #[derive(Debug, Clone, PartialEq)]
    struct Slide(&'static str);

    impl DisplayItem for Slide {
        fn id(&self) -> ItemId {
            ItemId::from(self.0)
        }
    }

    struct NullRouter;

    impl SlideRouter for NullRouter {
        fn open(&self, _id: &ItemId) {}
    }

    fn env() -> CarouselEnvironment<Slide> {
        CarouselEnvironment::new(CarouselConfig::default(), Arc::new(NullRouter))
    }

    fn slides(ids: &[&'static str]) -> Vec<Slide> {
        ids.iter().copied().map(Slide).collect()
    }

    fn initialized(ids: &[&'static str]) -> CarouselState<Slide> {
        let mut state = CarouselState::default();
        CarouselReducer::new().reduce(
            &mut state,
            CarouselAction::Initialize { items: slides(ids) },
            &env(),
        );
        state
    }

    fn running_token(state: &CarouselState<Slide>) -> TimerToken {
        match state.autoplay() {
            Autoplay::Running { token } => token,
            other => unreachable!("autoplay not running: {other:?}"),
        }
    }

    #[test]
    fn test_initialize_starts_autoplay_at_first_slide() {
        ReducerTest::new(CarouselReducer::new())
            .with_env(env())
            .given_state(CarouselState::default())
            .when_action(CarouselAction::Initialize { items: slides(&["A", "B", "C", "D"]) })
            .then_state(|state| {
                assert_eq!(state.current_index(), 1);
                assert_eq!(state.phase(), Phase::AutoAdvancing);
                assert!(state.is_mounted());
            })
            .then_effects(|effects| {
                assertions::assert_has_delay(effects, &AUTOPLAY, Duration::from_secs(5));
                assertions::assert_cancels(effects, &AUTOPLAY);
            })
            .run();
    }

    #[test]
    fn test_initialize_empty_schedules_nothing() {
        ReducerTest::new(CarouselReducer::new())
            .with_env(env())
            .given_state(CarouselState::default())
            .when_action(CarouselAction::Initialize { items: Vec::new() })
            .then_state(|state| {
                assert_eq!(state.phase(), Phase::Empty);
                assert_eq!(state.current_index(), 1);
                assert_eq!(state.autoplay(), Autoplay::Stopped);
            })
            .then_effects(|effects| assertions::assert_no_delay(effects, &AUTOPLAY))
            .run();
    }

    #[test]
    fn test_initialize_while_paused_parks_autoplay() {
        ReducerTest::new(CarouselReducer::new())
            .with_env(env())
            .given_state(CarouselState::default())
            .given_action(CarouselAction::Pause)
            .when_action(CarouselAction::Initialize { items: slides(&["A", "B"]) })
            .then_state(|state| {
                assert_eq!(state.autoplay(), Autoplay::Paused);
                assert_eq!(state.phase(), Phase::Idle);
            })
            .then_effects(|effects| assertions::assert_no_delay(effects, &AUTOPLAY))
            .run();
    }

    #[test]
    fn test_advance_locks_and_moves() {
        ReducerTest::new(CarouselReducer::new())
            .with_env(env())
            .given_state(initialized(&["A", "B", "C"]))
            .when_action(CarouselAction::Advance { direction: Direction::Next })
            .then_state(|state| {
                assert_eq!(state.current_index(), 2);
                assert!(state.is_navigation_locked());
                assert_eq!(state.phase(), Phase::ManualCooldown);
            })
            .then_effects(|effects| {
                assertions::assert_has_delay(effects, &COOLDOWN, Duration::from_millis(500));
                assertions::assert_no_delay(effects, &WRAP);
            })
            .run();
    }

    #[test]
    fn test_advance_while_locked_is_ignored() {
        ReducerTest::new(CarouselReducer::new())
            .with_env(env())
            .given_state(initialized(&["A", "B", "C"]))
            .given_action(CarouselAction::Advance { direction: Direction::Next })
            .when_action(CarouselAction::Advance { direction: Direction::Next })
            .then_state(|state| assert_eq!(state.current_index(), 2))
            .then_effects(|effects| assertions::assert_no_effects(effects))
            .run();
    }

    #[test]
    fn test_advance_prev_from_first_slide_starts_wrap() {
        ReducerTest::new(CarouselReducer::new())
            .with_env(env())
            .given_state(initialized(&["A", "B", "C"]))
            .when_action(CarouselAction::Advance { direction: Direction::Prev })
            .then_state(|state| {
                assert_eq!(state.current_index(), 0);
                assert_eq!(state.active_real_index(), Some(2));
                assert_eq!(state.phase(), Phase::WrappingSlide);
                assert!(state.is_transitioning());
            })
            .then_effects(|effects| {
                assertions::assert_has_delay(effects, &WRAP, Duration::from_millis(500));
            })
            .run();
    }

    #[test]
    fn test_wrap_slide_finished_snaps_without_animation() {
        let reducer = CarouselReducer::new();
        let env = env();
        let mut state = initialized(&["A", "B", "C"]);
        reducer.reduce(&mut state, CarouselAction::Advance { direction: Direction::Prev }, &env);

        let WrapPhase::Sliding { token } = state.wrap_phase() else {
            unreachable!("wrap not started");
        };
        let effects = reducer.reduce(&mut state, CarouselAction::WrapSlideFinished { token }, &env);

        assert_eq!(state.current_index(), 3);
        assert!(!state.is_transitioning());
        assert_eq!(state.phase(), Phase::WrappingSnap);
        assertions::assert_has_delay(&effects, &WRAP, Duration::from_millis(50));

        let WrapPhase::Snapped { token } = state.wrap_phase() else {
            unreachable!("not snapped");
        };
        reducer.reduce(&mut state, CarouselAction::WrapSettled { token }, &env);
        assert!(state.is_transitioning());
        assert_eq!(state.wrap_phase(), WrapPhase::Settled);
    }

    #[test]
    fn test_stale_timer_tokens_are_ignored() {
        let reducer = CarouselReducer::new();
        let env = env();
        let mut state = initialized(&["A", "B", "C"]);
        let old = running_token(&state);

        reducer.reduce(&mut state, CarouselAction::Pause, &env);
        reducer.reduce(&mut state, CarouselAction::Resume, &env);
        assert_ne!(running_token(&state), old);

        let effects = reducer.reduce(&mut state, CarouselAction::AutoplayTick { token: old }, &env);
        assert_eq!(state.current_index(), 1);
        assertions::assert_no_effects(&effects);

        let effects = reducer.reduce(&mut state, CarouselAction::CooldownElapsed { token: old }, &env);
        assertions::assert_no_effects(&effects);
        let effects = reducer.reduce(&mut state, CarouselAction::WrapSlideFinished { token: old }, &env);
        assertions::assert_no_effects(&effects);
    }

    #[test]
    fn test_autoplay_tick_advances_and_reschedules() {
        let reducer = CarouselReducer::new();
        let env = env();
        let mut state = initialized(&["A", "B"]);
        let token = running_token(&state);

        let effects = reducer.reduce(&mut state, CarouselAction::AutoplayTick { token }, &env);

        assert_eq!(state.current_index(), 2);
        assert_ne!(running_token(&state), token);
        assertions::assert_has_delay(&effects, &AUTOPLAY, Duration::from_secs(5));
    }

    #[test]
    fn test_pause_cancels_autoplay_and_resume_restarts_it() {
        ReducerTest::new(CarouselReducer::new())
            .with_env(env())
            .given_state(initialized(&["A", "B"]))
            .when_action(CarouselAction::Pause)
            .then_state(|state| {
                assert!(state.is_paused());
                assert_eq!(state.autoplay(), Autoplay::Paused);
            })
            .then_effects(|effects| {
                assertions::assert_cancels(effects, &AUTOPLAY);
                assertions::assert_no_delay(effects, &AUTOPLAY);
            })
            .run();

        ReducerTest::new(CarouselReducer::new())
            .with_env(env())
            .given_state(initialized(&["A", "B"]))
            .given_action(CarouselAction::Pause)
            .when_action(CarouselAction::Resume)
            .then_state(|state| assert!(matches!(state.autoplay(), Autoplay::Running { .. })))
            .then_effects(|effects| {
                assertions::assert_has_delay(effects, &AUTOPLAY, Duration::from_secs(5));
            })
            .run();
    }

    #[test]
    fn test_repeated_pause_is_idempotent() {
        ReducerTest::new(CarouselReducer::new())
            .with_env(env())
            .given_state(initialized(&["A", "B"]))
            .given_action(CarouselAction::Pause)
            .when_action(CarouselAction::Pause)
            .then_effects(|effects| assertions::assert_no_effects(effects))
            .run();
    }

    #[test]
    fn test_activate_outside_strip_is_ignored() {
        ReducerTest::new(CarouselReducer::new())
            .with_env(env())
            .given_state(initialized(&["A", "B"]))
            .when_action(CarouselAction::Activate { position: 4 })
            .then_effects(|effects| assertions::assert_no_effects(effects))
            .run();
    }

    #[test]
    fn test_activate_emits_routing_effect() {
        ReducerTest::new(CarouselReducer::new())
            .with_env(env())
            .given_state(initialized(&["A", "B"]))
            .when_action(CarouselAction::Activate { position: 3 })
            .then_effects(|effects| assertions::assert_has_future_effect(effects))
            .run();
    }

    #[test]
    fn test_teardown_cancels_everything() {
        ReducerTest::new(CarouselReducer::new())
            .with_env(env())
            .given_state(initialized(&["A", "B"]))
            .given_action(CarouselAction::Advance { direction: Direction::Next })
            .when_action(CarouselAction::Teardown)
            .then_state(|state| {
                assert!(!state.is_mounted());
                assert_eq!(state.autoplay(), Autoplay::Stopped);
                assert!(!state.is_navigation_locked());
            })
            .then_effects(|effects| {
                for id in [&AUTOPLAY, &COOLDOWN, &WRAP, &FETCH] {
                    assertions::assert_cancels(effects, id);
                }
            })
            .run();
    }

    #[test]
    fn test_remount_after_teardown_while_hovered_starts_autoplay() {
        ReducerTest::new(CarouselReducer::new())
            .with_env(env())
            .given_state(initialized(&["A", "B"]))
            .given_action(CarouselAction::Pause)
            .given_action(CarouselAction::Teardown)
            .when_action(CarouselAction::Initialize { items: slides(&["A", "B"]) })
            .then_state(|state| {
                assert!(!state.is_paused());
                assert!(matches!(state.autoplay(), Autoplay::Running { .. }));
                assert_eq!(state.phase(), Phase::AutoAdvancing);
            })
            .then_effects(|effects| {
                assertions::assert_has_delay(effects, &AUTOPLAY, Duration::from_secs(5));
            })
            .run();
    }

    #[test]
    fn test_commands_after_teardown_are_ignored() {
        ReducerTest::new(CarouselReducer::new())
            .with_env(env())
            .given_state(initialized(&["A", "B"]))
            .given_action(CarouselAction::Teardown)
            .when_action(CarouselAction::Advance { direction: Direction::Next })
            .then_state(|state| assert_eq!(state.current_index(), 1))
            .then_effects(|effects| assertions::assert_no_effects(effects))
            .run();
    }

    struct EmptySource;

    impl crate::source::SlideSource<Slide> for EmptySource {
        fn fetch(&self) -> crate::source::FetchFuture<'_, Slide> {
            Box::pin(async { Ok(Vec::new()) })
        }
    }

    fn loading_token(state: &CarouselState<Slide>) -> TimerToken {
        match state.fetch {
            FetchStatus::Loading { token } => token,
            FetchStatus::Idle => unreachable!("no fetch in flight"),
        }
    }

    #[test]
    fn test_superseded_fetch_result_is_dropped() {
        let reducer = CarouselReducer::new();
        let env = env().with_source(Arc::new(EmptySource));
        let mut state = initialized(&["A", "B"]);

        let effects = reducer.reduce(&mut state, CarouselAction::Refresh, &env);
        assertions::assert_cancels(&effects, &FETCH);
        assertions::assert_has_future_effect(&effects);
        let first = loading_token(&state);

        reducer.reduce(&mut state, CarouselAction::Refresh, &env);
        let second = loading_token(&state);
        assert_ne!(first, second);

        let effects = reducer.reduce(
            &mut state,
            CarouselAction::SlidesFetched { token: first, items: slides(&["X"]) },
            &env,
        );
        assertions::assert_no_effects(&effects);
        assert_eq!(state.slides().len(), 2);
        assert!(state.is_loading());

        reducer.reduce(
            &mut state,
            CarouselAction::SlidesFetched { token: second, items: slides(&["X", "Y", "Z"]) },
            &env,
        );
        assert_eq!(state.slides().len(), 3);
        assert!(!state.is_loading());
        assert_eq!(state.current_index(), 1);
    }

    #[test]
    fn test_fetch_failure_clears_slides() {
        let reducer = CarouselReducer::new();
        let env = env().with_source(Arc::new(EmptySource));
        let mut state = initialized(&["A", "B"]);
        reducer.reduce(&mut state, CarouselAction::Refresh, &env);
        let token = loading_token(&state);

        let effects = reducer.reduce(
            &mut state,
            CarouselAction::FetchFailed { token, reason: "connection refused".to_string() },
            &env,
        );

        assert_eq!(state.phase(), Phase::Empty);
        assertions::assert_cancels(&effects, &AUTOPLAY);
        assertions::assert_no_delay(&effects, &AUTOPLAY);
    }

    #[test]
    fn test_refresh_without_source_is_ignored() {
        ReducerTest::new(CarouselReducer::new())
            .with_env(env())
            .given_state(initialized(&[]))
            .when_action(CarouselAction::Refresh)
            .then_state(|state| assert!(!state.is_loading()))
            .then_effects(|effects| assertions::assert_no_effects(effects))
            .run();
    }
}
