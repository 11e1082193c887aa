//! Aggregator configuration with sensible defaults.
//!
//! [`AggregatorConfig`] controls which sources are queried, the ranking
//! cut-offs, timeouts and the politeness delay applied before every remote
//! call. The defaults match the reference behaviour: all four sources, a
//! 1–3 second random delay, a 0.5 relevance floor and at most 15 results.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::SearchError;
use crate::types::Source;

/// Base URLs for each source.
///
/// Only the scheme, host and port are taken from these; adapters append
/// their own paths. Overriding them points an adapter at a mirror or a
/// local mock server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceEndpoints {
    /// Google Scholar search front end.
    pub google_scholar: String,
    /// arXiv export API.
    pub arxiv: String,
    /// IEEE Xplore site.
    pub ieee: String,
    /// Semantic Scholar graph API.
    pub semantic_scholar: String,
}

impl Default for SourceEndpoints {
    fn default() -> Self {
        Self {
            google_scholar: "https://scholar.google.com".to_owned(),
            arxiv: "https://export.arxiv.org".to_owned(),
            ieee: "https://ieeexplore.ieee.org".to_owned(),
            semantic_scholar: "https://api.semanticscholar.org".to_owned(),
        }
    }
}

impl SourceEndpoints {
    /// Returns the configured base URL for `source`.
    pub fn base_for(&self, source: Source) -> &str {
        match source {
            Source::GoogleScholar => &self.google_scholar,
            Source::Arxiv => &self.arxiv,
            Source::Ieee => &self.ieee,
            Source::SemanticScholar => &self.semantic_scholar,
        }
    }

    /// Parses the base URL for `source`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the configured value is not an
    /// absolute URL.
    pub fn parsed(&self, source: Source) -> Result<Url, SearchError> {
        let raw = self.base_for(source);
        Url::parse(raw)
            .map_err(|e| SearchError::Config(format!("invalid {source} endpoint {raw:?}: {e}")))
    }
}

/// Configuration for an aggregation request.
///
/// Use [`Default::default()`] for the reference behaviour, or construct with
/// field overrides. Deserializes from a partial table, filling the rest
/// from defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregatorConfig {
    /// Which sources to query. Queried concurrently; merged in [`Source::all`] order.
    pub sources: Vec<Source>,
    /// Maximum number of papers returned after filtering, dedup and ranking.
    pub max_results: usize,
    /// Records scoring below this are discarded. The bound is inclusive.
    pub min_relevance: f64,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
    /// Random delay range in milliseconds `(min, max)` applied before every
    /// remote call to stay clear of anti-scraping defences.
    pub request_delay_ms: (u64, u64),
    /// Custom User-Agent string. If `None`, rotates through a built-in list
    /// of realistic browser User-Agents.
    pub user_agent: Option<String>,
    /// Where each source lives.
    pub endpoints: SourceEndpoints,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            sources: Source::all().to_vec(),
            max_results: 15,
            min_relevance: 0.5,
            timeout_seconds: 15,
            request_delay_ms: (1_000, 3_000),
            user_agent: None,
            endpoints: SourceEndpoints::default(),
        }
    }
}

impl AggregatorConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `max_results` must be greater than 0
    /// - `timeout_seconds` must be greater than 0
    /// - `sources` must not be empty
    /// - `request_delay_ms.0` must be <= `request_delay_ms.1`
    /// - `min_relevance` must be a non-negative number
    /// - every enabled source must have a parsable endpoint
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_results == 0 {
            return Err(SearchError::Config(
                "max_results must be greater than 0".into(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.sources.is_empty() {
            return Err(SearchError::Config(
                "at least one source must be enabled".into(),
            ));
        }
        if self.request_delay_ms.0 > self.request_delay_ms.1 {
            return Err(SearchError::Config(
                "request_delay_ms min must be <= max".into(),
            ));
        }
        if !(self.min_relevance >= 0.0) {
            return Err(SearchError::Config(
                "min_relevance must be a non-negative number".into(),
            ));
        }
        for source in &self.sources {
            self.endpoints.parsed(*source)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = AggregatorConfig::default();
        assert_eq!(config.max_results, 15);
        assert!((config.min_relevance - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.request_delay_ms, (1_000, 3_000));
        assert!(config.user_agent.is_none());
        assert_eq!(config.sources, Source::all().to_vec());
    }

    #[test]
    fn valid_config_passes_validation() {
        assert!(AggregatorConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_max_results_rejected() {
        let config = AggregatorConfig {
            max_results: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_results"));
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = AggregatorConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_seconds"));
    }

    #[test]
    fn empty_sources_rejected() {
        let config = AggregatorConfig {
            sources: vec![],
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("source"));
    }

    #[test]
    fn invalid_delay_range_rejected() {
        let config = AggregatorConfig {
            request_delay_ms: (3_000, 1_000),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("delay"));
    }

    #[test]
    fn nan_min_relevance_rejected() {
        let config = AggregatorConfig {
            min_relevance: f64::NAN,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("min_relevance"));
    }

    #[test]
    fn broken_endpoint_rejected_only_when_source_enabled() {
        let endpoints = SourceEndpoints {
            ieee: "not a url".into(),
            ..Default::default()
        };
        let enabled = AggregatorConfig {
            endpoints: endpoints.clone(),
            ..Default::default()
        };
        assert!(enabled.validate().unwrap_err().to_string().contains("IEEE"));

        let disabled = AggregatorConfig {
            sources: vec![Source::Arxiv],
            endpoints,
            ..Default::default()
        };
        assert!(disabled.validate().is_ok());
    }

    #[test]
    fn zero_delay_range_valid() {
        let config = AggregatorConfig {
            request_delay_ms: (0, 0),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_table_fills_defaults() {
        let config: AggregatorConfig =
            serde_json::from_str(r#"{"max_results": 5, "sources": ["Arxiv", "IEEE"]}"#)
                .expect("deserialize");
        assert_eq!(config.max_results, 5);
        assert_eq!(config.sources, vec![Source::Arxiv, Source::Ieee]);
        assert_eq!(config.request_delay_ms, (1_000, 3_000));
        assert_eq!(config.endpoints, SourceEndpoints::default());
    }
}
