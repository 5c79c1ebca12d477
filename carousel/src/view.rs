//! Rendering adapter: what the host draws for a given state

use crate::config::SourceConfig;
use crate::event::EventSummary;
use crate::state::CarouselState;
use crate::types::{DisplayItem, ItemId, SlideKind};
use serde::Serialize;

/// Message shown when there are no slides
pub const EMPTY_MESSAGE: &str = "No popular events available.";

/// One slide of the rendered strip
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StripSlide<C> {
    /// Stable render key, unique within the strip
    pub key: String,
    /// Strip position
    pub position: usize,
    /// Clone or original
    #[serde(skip)]
    pub kind: SlideKind,
    /// Id of the real item shown (clicks route here)
    pub item_id: ItemId,
    /// Rendered content
    pub content: C,
}

/// Everything needed to draw the carousel
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CarouselView<C> {
    /// Static fallback; no controls
    Empty {
        /// Text to show
        message: String,
    },
    /// The slide strip
    Strip {
        /// `N + 2` slides: last-item clone, originals, first-item clone
        slides: Vec<StripSlide<C>>,
        /// Horizontal offset of the strip, in percent of one slide
        offset_percent: usize,
        /// Whether position changes animate
        animate: bool,
        /// One entry per real item; exactly one is `true`
        indicators: Vec<bool>,
    },
}

impl<C> CarouselView<C> {
    /// Build the view, rendering each slide with `render`
    pub fn from_state<T, F>(state: &CarouselState<T>, mut render: F) -> Self
    where
        T: DisplayItem,
        F: FnMut(&T) -> C,
    {
        let list = state.slides();
        let n = list.len();
        let Some(active) = state.active_real_index() else {
            return Self::Empty {
                message: EMPTY_MESSAGE.to_string(),
            };
        };

        let slides = (0..=n + 1)
            .filter_map(|position| {
                let item = list.item_at(position)?;
                let kind = list.kind_at(position)?;
                let item_id = item.id();
                let key = match kind {
                    SlideKind::LeadingClone => format!("duplicate-last-{item_id}"),
                    SlideKind::Original => format!("original-{item_id}"),
                    SlideKind::TrailingClone => format!("duplicate-first-{item_id}"),
                };
                Some(StripSlide {
                    key,
                    position,
                    kind,
                    item_id,
                    content: render(item),
                })
            })
            .collect();

        Self::Strip {
            slides,
            offset_percent: state.current_index() * 100,
            animate: state.is_transitioning(),
            indicators: (0..n).map(|i| i == active).collect(),
        }
    }

    /// CSS transform placing the strip, `None` for the empty view
    #[must_use]
    pub fn transform(&self) -> Option<String> {
        match self {
            Self::Empty { .. } => None,
            Self::Strip { offset_percent, .. } => Some(format!("translateX(-{offset_percent}%)")),
        }
    }

    /// Returns true for the empty fallback
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty { .. })
    }
}

/// Display fields of an event slide
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlideCard {
    /// Event title (also the image alt text)
    pub title: String,
    /// `"{format} • {theme, theme}"`
    pub tags: String,
    /// Start time, e.g. `June 5, 2025 19:30`
    pub starts: String,
    /// Venue
    pub venue: String,
    /// Poster URL, or the placeholder
    pub image_url: String,
    /// Price range line
    pub price_range: String,
}

impl SlideCard {
    /// Format an event for display
    #[must_use]
    pub fn from_event(event: &EventSummary, config: &SourceConfig) -> Self {
        let themes = event
            .themes
            .iter()
            .map(|t| t.title.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        let image_url = event.poster_name.as_deref().filter(|name| !name.is_empty()).map_or_else(
            || config.placeholder_image_url.clone(),
            |name| format!("{}/{name}", config.poster_base_url.trim_end_matches('/')),
        );

        // Listing prices are not part of the summary; the range is derived from the id.
        #[allow(clippy::cast_precision_loss)]
        let base = event.id as f64;

        Self {
            title: event.title.clone(),
            tags: format!("{} • {themes}", event.format.title),
            starts: event.started_at.format("%B %-d, %Y %H:%M").to_string(),
            venue: event.venue.clone(),
            image_url,
            price_range: format!("{:.2} - {:.2} $", base * 10.0, base * 20.0),
        }
    }
}
