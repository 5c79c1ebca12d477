//! Routing collaborator: where activated slides lead

use crate::types::ItemId;
use std::fmt;
use tokio::sync::mpsc;

/// Receives the id of every activated slide
///
/// The carousel knows nothing about destinations; the router decides.
pub trait SlideRouter: Send + Sync {
    /// Navigate to the detail view of `id`
    fn open(&self, id: &ItemId);
}

/// Application routes reachable from the carousel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Event detail page
    EventDetail {
        /// Event id
        id: ItemId,
    },
}

impl Route {
    /// URL path of the route
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::EventDetail { id } => format!("/products/{id}"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Router that forwards event-detail routes over a channel
///
/// The receiving half is typically owned by the navigation layer.
#[derive(Debug, Clone)]
pub struct ChannelRouter {
    tx: mpsc::UnboundedSender<Route>,
}

impl ChannelRouter {
    /// Create a router and the receiver its routes arrive on
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Route>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl SlideRouter for ChannelRouter {
    fn open(&self, id: &ItemId) {
        let route = Route::EventDetail { id: id.clone() };
        tracing::debug!(path = %route, "Routing to slide detail");
        if self.tx.send(route).is_err() {
            tracing::warn!(%id, "Route receiver dropped, activation lost");
        }
    }
}
