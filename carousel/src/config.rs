//! Configuration management for the carousel
//!
//! Loads configuration from environment variables with sensible defaults.
//! A `.env` file in the working directory is read first, if present.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Carousel timings and selection
    pub carousel: CarouselConfig,
    /// Events API and image locations
    pub source: SourceConfig,
}

/// Carousel timing configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselConfig {
    /// Time between automatic advances (default: 5s)
    pub autoplay_interval: Duration,
    /// Manual navigation lock after a click (default: 500ms)
    pub navigation_cooldown: Duration,
    /// Slide animation length; the wrap snap waits this long (default: 500ms)
    pub transition: Duration,
    /// Unanimated window after the wrap snap (default: 50ms)
    pub settle: Duration,
    /// How many of the most recent events to show (default: 4)
    pub popular_limit: usize,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            autoplay_interval: Duration::from_millis(5000),
            navigation_cooldown: Duration::from_millis(500),
            transition: Duration::from_millis(500),
            settle: Duration::from_millis(50),
            popular_limit: 4,
        }
    }
}

impl CarouselConfig {
    /// Check that every timing is positive and at least one slide is shown
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroDuration`] naming the first zero duration,
    /// or [`ConfigError::ZeroLimit`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        let durations = [
            ("autoplay_interval", self.autoplay_interval),
            ("navigation_cooldown", self.navigation_cooldown),
            ("transition", self.transition),
            ("settle", self.settle),
        ];
        if let Some((name, _)) = durations.iter().find(|(_, d)| d.is_zero()) {
            return Err(ConfigError::ZeroDuration(*name));
        }
        if self.popular_limit == 0 {
            return Err(ConfigError::ZeroLimit);
        }
        Ok(())
    }
}

/// Events API configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Base URL of the events API
    pub api_base_url: String,
    /// Base URL poster file names are appended to
    pub poster_base_url: String,
    /// Image shown for events without a poster
    pub placeholder_image_url: String,
    /// HTTP request timeout
    pub request_timeout: Duration,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080".to_string(),
            poster_base_url: "http://localhost:8080/uploads/event-posters".to_string(),
            placeholder_image_url: "https://via.placeholder.com/300x192".to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl SourceConfig {
    /// Check that the URLs are set
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyUrl`] naming the first empty URL, or
    /// [`ConfigError::ZeroDuration`] for a zero request timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigError::EmptyUrl("api_base_url"));
        }
        if self.poster_base_url.trim().is_empty() {
            return Err(ConfigError::EmptyUrl("poster_base_url"));
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::ZeroDuration("request_timeout"));
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable values fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the resulting values are invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Missing .env is the normal case outside development
        let _ = dotenvy::dotenv();

        let defaults = CarouselConfig::default();
        let source_defaults = SourceConfig::default();

        let config = Self {
            carousel: CarouselConfig {
                autoplay_interval: env_millis("CAROUSEL_AUTOPLAY_INTERVAL_MS")
                    .unwrap_or(defaults.autoplay_interval),
                navigation_cooldown: env_millis("CAROUSEL_NAVIGATION_COOLDOWN_MS")
                    .unwrap_or(defaults.navigation_cooldown),
                transition: env_millis("CAROUSEL_TRANSITION_MS")
                    .unwrap_or(defaults.transition),
                settle: env_millis("CAROUSEL_SETTLE_MS")
                    .unwrap_or(defaults.settle),
                popular_limit: env::var("CAROUSEL_POPULAR_LIMIT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.popular_limit),
            },
            source: SourceConfig {
                api_base_url: env::var("EVENTS_API_URL")
                    .unwrap_or(source_defaults.api_base_url),
                poster_base_url: env::var("EVENTS_POSTER_BASE_URL")
                    .unwrap_or(source_defaults.poster_base_url),
                placeholder_image_url: env::var("EVENTS_PLACEHOLDER_IMAGE_URL")
                    .unwrap_or(source_defaults.placeholder_image_url),
                request_timeout: env::var("EVENTS_REQUEST_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .map_or(source_defaults.request_timeout, Duration::from_secs),
            },
        };

        config.carousel.validate()?;
        config.source.validate()?;
        Ok(config)
    }
}

fn env_millis(key: &str) -> Option<Duration> {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .map(Duration::from_millis)
}
