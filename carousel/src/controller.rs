//! `CarouselController`: a Store-backed handle exposing the carousel contract
//!
//! Hosts drive the carousel through these methods instead of sending raw
//! actions, so every transition goes through the reducer.

use crate::action::CarouselAction;
use crate::environment::CarouselEnvironment;
use crate::reducer::CarouselReducer;
use crate::state::{CarouselState, Phase};
use crate::types::{Direction, DisplayItem};
use crate::view::CarouselView;
use marquee_runtime::{EffectHandle, Store, StoreError};
use std::time::Duration;

/// Store type running a carousel of `T`
pub type CarouselStore<T> =
    Store<CarouselState<T>, CarouselAction<T>, CarouselEnvironment<T>, CarouselReducer<T>>;

/// Handle to a running carousel
///
/// Cloning yields another handle to the same carousel.
pub struct CarouselController<T>
where
    T: DisplayItem + Clone + Send + Sync + 'static,
{
    store: CarouselStore<T>,
}

impl<T> Clone for CarouselController<T>
where
    T: DisplayItem + Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<T> CarouselController<T>
where
    T: DisplayItem + Clone + Send + Sync + 'static,
{
    /// Create an unmounted carousel
    #[must_use]
    pub fn new(env: CarouselEnvironment<T>) -> Self {
        Self {
            store: Store::new(CarouselState::default(), CarouselReducer::new(), env),
        }
    }

    /// The underlying store (for observing actions)
    #[must_use]
    pub const fn store(&self) -> &CarouselStore<T> {
        &self.store
    }

    /// Mount with `items` at position 1 and start autoplay
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the carousel is shut down.
    pub async fn initialize(&self, items: Vec<T>) -> Result<EffectHandle, StoreError> {
        self.store.send(CarouselAction::Initialize { items }).await
    }

    /// Reload slides from the configured data source
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the carousel is shut down.
    pub async fn refresh(&self) -> Result<EffectHandle, StoreError> {
        self.store.send(CarouselAction::Refresh).await
    }

    /// Manual navigation; ignored during the cooldown
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the carousel is shut down.
    pub async fn advance(&self, direction: Direction) -> Result<EffectHandle, StoreError> {
        self.store.send(CarouselAction::Advance { direction }).await
    }

    /// Stop autoplay (pointer entered)
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the carousel is shut down.
    pub async fn pause(&self) -> Result<EffectHandle, StoreError> {
        self.store.send(CarouselAction::Pause).await
    }

    /// Restart autoplay from zero (pointer left)
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the carousel is shut down.
    pub async fn resume(&self) -> Result<EffectHandle, StoreError> {
        self.store.send(CarouselAction::Resume).await
    }

    /// Click on the slide at a strip position
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the carousel is shut down.
    pub async fn activate(&self, position: usize) -> Result<EffectHandle, StoreError> {
        self.store.send(CarouselAction::Activate { position }).await
    }

    /// Unmount: cancel every timer and pending fetch
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the carousel is shut down.
    pub async fn teardown(&self) -> Result<EffectHandle, StoreError> {
        self.store.send(CarouselAction::Teardown).await
    }

    /// Current strip position
    pub async fn current_index(&self) -> usize {
        self.store.state(CarouselState::current_index).await
    }

    /// Real item highlighted by the indicators
    pub async fn active_real_index(&self) -> Option<usize> {
        self.store.state(CarouselState::active_real_index).await
    }

    /// Named phase
    pub async fn phase(&self) -> Phase {
        self.store.state(CarouselState::phase).await
    }

    /// Read state via a closure
    pub async fn with_state<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CarouselState<T>) -> R,
    {
        self.store.state(f).await
    }

    /// Render the current state
    pub async fn view<C, F>(&self, render: F) -> CarouselView<C>
    where
        F: FnMut(&T) -> C,
    {
        self.store
            .state(|state| CarouselView::from_state(state, render))
            .await
    }

    /// Tear down and stop the runtime
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownTimeout`] if effects are still running
    /// after `timeout`.
    pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
        if let Err(error) = self.teardown().await {
            tracing::debug!(%error, "Teardown skipped");
        }
        self.store.shutdown(timeout).await
    }
}
