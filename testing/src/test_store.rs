//! A store that runs effects against a virtual clock
//!
//! [`TestStore`] applies actions synchronously and keeps `Delay` effects in a
//! timer queue instead of sleeping. Time only moves when the test calls
//! [`TestStore::advance`], so timer-heavy reducers can be driven through
//! minutes of behaviour deterministically and without a runtime.
//!
//! Semantics mirror the production `Store`:
//!
//! - `Cancellable { id, .. }` registers the timers it schedules under `id`
//! - `Cancel(id)` drops every pending timer registered under `id`
//! - `Future` effects are polled to completion immediately; a returned action
//!   is fed back after the current action's effects are scheduled
//! - `Sequential` delays are cumulative, `Parallel` delays start together
//!
//! Timers due at the same instant fire in the order they were scheduled.

use marquee_core::effect::{Effect, EffectId};
use marquee_core::reducer::Reducer;
use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

struct PendingTimer<A> {
    due: Duration,
    seq: u64,
    id: Option<EffectId>,
    action: A,
}

/// Deterministic virtual-time store for reducer tests
pub struct TestStore<R>
where
    R: Reducer,
{
    reducer: R,
    state: R::State,
    env: R::Environment,
    now: Duration,
    next_seq: u64,
    timers: Vec<PendingTimer<R::Action>>,
    history: Vec<R::Action>,
}

impl<R> TestStore<R>
where
    R: Reducer,
    R::Action: Clone + fmt::Debug,
{
    /// Create a store at virtual time zero
    #[must_use]
    pub const fn new(state: R::State, reducer: R, env: R::Environment) -> Self {
        Self {
            reducer,
            state,
            env,
            now: Duration::ZERO,
            next_seq: 0,
            timers: Vec::new(),
            history: Vec::new(),
        }
    }

    /// Apply an action and everything it feeds back synchronously
    pub fn send(&mut self, action: R::Action) {
        let mut queue = VecDeque::from([action]);

        while let Some(action) = queue.pop_front() {
            self.history.push(action.clone());
            let effects = self.reducer.reduce(&mut self.state, action, &self.env);
            for effect in effects {
                self.schedule(effect, None, Duration::ZERO, &mut queue);
            }
        }
    }

    /// Move virtual time forward, firing every timer that falls due
    pub fn advance(&mut self, duration: Duration) {
        let target = self.now + duration;

        while let Some(index) = self.next_due(target) {
            let timer = self.timers.swap_remove(index);
            self.now = timer.due;
            self.send(timer.action);
        }

        self.now = target;
    }

    /// Jump to the earliest pending timer and fire it
    ///
    /// Returns `false` if no timer is pending.
    pub fn advance_to_next(&mut self) -> bool {
        let Some(due) = self.timers.iter().map(|t| t.due).min() else {
            return false;
        };
        let step = due.saturating_sub(self.now);
        self.advance(step);
        true
    }

    /// Current state
    pub const fn state(&self) -> &R::State {
        &self.state
    }

    /// Environment the reducer runs against
    pub const fn env(&self) -> &R::Environment {
        &self.env
    }

    /// Virtual time elapsed since the store was created
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Number of pending timers registered under `id`
    #[must_use]
    pub fn pending(&self, id: &EffectId) -> usize {
        self.timers
            .iter()
            .filter(|t| t.id.as_ref() == Some(id))
            .count()
    }

    /// Number of pending timers
    #[must_use]
    pub fn pending_total(&self) -> usize {
        self.timers.len()
    }

    /// Time until the earliest timer under `id` fires
    #[must_use]
    pub fn time_until(&self, id: &EffectId) -> Option<Duration> {
        self.timers
            .iter()
            .filter(|t| t.id.as_ref() == Some(id))
            .map(|t| t.due.saturating_sub(self.now))
            .min()
    }

    /// Every action applied so far, in order
    pub fn history(&self) -> &[R::Action] {
        &self.history
    }

    /// Drain the action history
    pub fn take_history(&mut self) -> Vec<R::Action> {
        std::mem::take(&mut self.history)
    }

    fn next_due(&self, target: Duration) -> Option<usize> {
        self.timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= target)
            .min_by_key(|(_, t)| (t.due, t.seq))
            .map(|(index, _)| index)
    }

    /// Schedule an effect starting `offset` from now; returns when it completes
    fn schedule(
        &mut self,
        effect: Effect<R::Action>,
        id: Option<EffectId>,
        offset: Duration,
        feedback: &mut VecDeque<R::Action>,
    ) -> Duration {
        match effect {
            Effect::None => offset,
            Effect::Parallel(effects) => effects
                .into_iter()
                .map(|e| self.schedule(e, id.clone(), offset, feedback))
                .max()
                .unwrap_or(offset),
            Effect::Sequential(effects) => effects.into_iter().fold(offset, |at, e| {
                self.schedule(e, id.clone(), at, feedback)
            }),
            Effect::Delay { duration, action } => {
                let due = self.now + offset + duration;
                self.timers.push(PendingTimer {
                    due,
                    seq: self.next_seq,
                    id,
                    action: *action,
                });
                self.next_seq += 1;
                offset + duration
            },
            Effect::Future(fut) => {
                if let Some(action) = futures::executor::block_on(fut) {
                    feedback.push_back(action);
                }
                offset
            },
            Effect::Cancellable { id, effect } => self.schedule(*effect, Some(id), offset, feedback),
            Effect::Cancel(cancelled) => {
                self.timers.retain(|t| t.id.as_ref() != Some(&cancelled));
                offset
            },
        }
    }
}
