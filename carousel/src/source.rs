//! Data source collaborator: where slides come from

use crate::config::SourceConfig;
use crate::error::SourceError;
use crate::event::EventSummary;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by [`SlideSource::fetch`]
pub type FetchFuture<'a, T> = Pin<Box<dyn Future<Output = Result<Vec<T>, SourceError>> + Send + 'a>>;

/// Supplies the items a carousel shows
///
/// Dyn-compatible so it can sit in the environment as `Arc<dyn SlideSource<T>>`.
pub trait SlideSource<T>: Send + Sync {
    /// Load every available item
    ///
    /// Ranking and limiting happen in the carousel, not here.
    fn fetch(&self) -> FetchFuture<'_, T>;
}

/// Accepted response bodies for a list endpoint
///
/// The events API has answered with a bare array, a paginated `items`
/// object, and the `success`/`data`/`errors` envelope.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListBody<T> {
    Envelope {
        success: bool,
        data: Option<ListData<T>>,
        #[serde(default)]
        errors: Vec<String>,
    },
    Data(ListData<T>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListData<T> {
    Plain(Vec<T>),
    Paged { items: Vec<T> },
}

impl<T> ListData<T> {
    fn into_items(self) -> Vec<T> {
        match self {
            Self::Plain(items) | Self::Paged { items } => items,
        }
    }
}

/// Normalise a list response body into its items
fn parse_list<T: DeserializeOwned>(body: &str) -> Result<Vec<T>, SourceError> {
    let parsed: ListBody<T> =
        serde_json::from_str(body).map_err(|e| SourceError::Parse(e.to_string()))?;

    match parsed {
        ListBody::Data(data) => Ok(data.into_items()),
        ListBody::Envelope { success: true, data, .. } => {
            Ok(data.map(ListData::into_items).unwrap_or_default())
        },
        ListBody::Envelope { success: false, errors, .. } => {
            let errors = if errors.is_empty() {
                vec!["Unknown error occurred while fetching events".to_string()]
            } else {
                errors
            };
            Err(SourceError::Rejected { errors })
        },
    }
}

/// Events API client
#[derive(Debug, Clone)]
pub struct HttpEventSource {
    client: Client,
    events_url: String,
}

impl HttpEventSource {
    /// Create a client for `GET {api_base_url}/events`
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Request`] if the HTTP client cannot be built.
    pub fn new(config: &SourceConfig) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| SourceError::Request(e.to_string()))?;

        Ok(Self {
            client,
            events_url: format!("{}/events", config.api_base_url.trim_end_matches('/')),
        })
    }

    /// URL the source fetches from
    #[must_use]
    pub fn events_url(&self) -> &str {
        &self.events_url
    }

    /// Fetch every published event
    ///
    /// # Errors
    ///
    /// - [`SourceError::Request`]: transport failure or timeout
    /// - [`SourceError::Api`]: non-2xx status
    /// - [`SourceError::Parse`]: body is not a recognised event list
    /// - [`SourceError::Rejected`]: envelope reports `success: false`
    #[tracing::instrument(skip(self), fields(url = %self.events_url))]
    pub async fn fetch_events(&self) -> Result<Vec<EventSummary>, SourceError> {
        let response = self
            .client
            .get(&self.events_url)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| SourceError::Request(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SourceError::Request(e.to_string()))?;

        if !status.is_success() {
            return Err(SourceError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let events = parse_list(&body)?;
        tracing::debug!(count = events.len(), "Fetched events");
        Ok(events)
    }
}

impl SlideSource<EventSummary> for HttpEventSource {
    fn fetch(&self) -> FetchFuture<'_, EventSummary> {
        Box::pin(self.fetch_events())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        id: u32,
    }

    #[test]
    fn test_parse_bare_array() {
        let rows: Vec<Row> = parse_list(r#"[{"id":1},{"id":2}]"#).unwrap();
        assert_eq!(rows, vec![Row { id: 1 }, Row { id: 2 }]);
    }

    #[test]
    fn test_parse_paged_items() {
        let rows: Vec<Row> = parse_list(r#"{"items":[{"id":3}],"total":1}"#).unwrap();
        assert_eq!(rows, vec![Row { id: 3 }]);
    }

    #[test]
    fn test_parse_success_envelope() {
        let rows: Vec<Row> =
            parse_list(r#"{"success":true,"data":{"items":[{"id":4}]},"errors":[]}"#).unwrap();
        assert_eq!(rows, vec![Row { id: 4 }]);

        let rows: Vec<Row> = parse_list(r#"{"success":true,"data":[{"id":5}]}"#).unwrap();
        assert_eq!(rows, vec![Row { id: 5 }]);
    }

    #[test]
    fn test_parse_success_envelope_without_data_is_empty() {
        let rows: Vec<Row> = parse_list(r#"{"success":true}"#).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_parse_failure_envelope() {
        let err = parse_list::<Row>(r#"{"success":false,"errors":["boom"]}"#).unwrap_err();
        assert_eq!(err, SourceError::Rejected { errors: vec!["boom".to_string()] });

        let err = parse_list::<Row>(r#"{"success":false}"#).unwrap_err();
        assert!(matches!(err, SourceError::Rejected { errors } if errors.len() == 1));
    }

    #[test]
    fn test_parse_garbage() {
        let err = parse_list::<Row>("<html>").unwrap_err();
        assert!(matches!(err, SourceError::Parse(_)));
    }

    #[test]
    fn test_events_url_trims_trailing_slash() {
        let config = SourceConfig {
            api_base_url: "http://api.test/".to_string(),
            ..SourceConfig::default()
        };
        let source = HttpEventSource::new(&config).unwrap();
        assert_eq!(source.events_url(), "http://api.test/events");
    }
}
