//! Optional filter sets for the read operations.
//!
//! Each filter serializes to URL query pairs through `to_query`; keys whose
//! value is unset are omitted entirely rather than sent empty, and the key
//! order is fixed per filter so serialized query strings are stable.

use crate::error::{GatewayError, Result};

/// Minimum length of a free-text search query, matching the dashboard's
/// pre-flight form validation.
pub const MIN_QUERY_LEN: usize = 3;

/// Validates a free-text search query before it is sent anywhere.
pub fn validate_query_text(query: &str) -> Result<()> {
    if query.trim().chars().count() < MIN_QUERY_LEN {
        return Err(GatewayError::validation(format!(
            "search query must be at least {MIN_QUERY_LEN} characters"
        )));
    }
    Ok(())
}

fn validate_optional_query(query: &Option<String>) -> Result<()> {
    match query {
        Some(q) => validate_query_text(q),
        None => Ok(()),
    }
}

/// Filters for the processed-post listing.
///
/// Key order: `query`, `sentiment`, `source`, `limit`, `skip`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub query: Option<String>,
    pub sentiment: Option<String>,
    pub source: Option<String>,
    pub limit: Option<u32>,
    pub skip: Option<u32>,
}

impl PostFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_sentiment(mut self, sentiment: impl Into<String>) -> Self {
        self.sentiment = Some(sentiment.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_skip(mut self, skip: u32) -> Self {
        self.skip = Some(skip);
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_optional_query(&self.query)
    }

    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(query) = &self.query {
            pairs.push(("query", query.clone()));
        }
        if let Some(sentiment) = &self.sentiment {
            pairs.push(("sentiment", sentiment.clone()));
        }
        if let Some(source) = &self.source {
            pairs.push(("source", source.clone()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(skip) = self.skip {
            pairs.push(("skip", skip.to_string()));
        }
        pairs
    }
}

/// Filters for the posts-by-search listing.
///
/// Unlike [`PostFilter`], the tracked `search_query` is mandatory; the
/// backend rejects the call without it.
///
/// Key order: `search_query`, `sentiment`, `source`, `limit`, `skip`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPostFilter {
    pub search_query: String,
    pub sentiment: Option<String>,
    pub source: Option<String>,
    pub limit: Option<u32>,
    pub skip: Option<u32>,
}

impl SearchPostFilter {
    pub fn new(search_query: impl Into<String>) -> Self {
        Self {
            search_query: search_query.into(),
            sentiment: None,
            source: None,
            limit: None,
            skip: None,
        }
    }

    pub fn with_sentiment(mut self, sentiment: impl Into<String>) -> Self {
        self.sentiment = Some(sentiment.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_skip(mut self, skip: u32) -> Self {
        self.skip = Some(skip);
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_query_text(&self.search_query)
    }

    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("search_query", self.search_query.clone())];
        if let Some(sentiment) = &self.sentiment {
            pairs.push(("sentiment", sentiment.clone()));
        }
        if let Some(source) = &self.source {
            pairs.push(("source", source.clone()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(skip) = self.skip {
            pairs.push(("skip", skip.to_string()));
        }
        pairs
    }
}

/// Filters for the sentiment-statistics endpoint.
///
/// Key order: `query`, `source`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatisticsFilter {
    pub query: Option<String>,
    pub source: Option<String>,
}

impl StatisticsFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_optional_query(&self.query)
    }

    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(query) = &self.query {
            pairs.push(("query", query.clone()));
        }
        if let Some(source) = &self.source {
            pairs.push(("source", source.clone()));
        }
        pairs
    }
}

/// Filters for keyword analysis.
///
/// Key order: `query`, `sentiment`, `limit`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordFilter {
    pub query: Option<String>,
    pub sentiment: Option<String>,
    pub limit: Option<u32>,
}

impl KeywordFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_sentiment(mut self, sentiment: impl Into<String>) -> Self {
        self.sentiment = Some(sentiment.into());
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_optional_query(&self.query)
    }

    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(query) = &self.query {
            pairs.push(("query", query.clone()));
        }
        if let Some(sentiment) = &self.sentiment {
            pairs.push(("sentiment", sentiment.clone()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }
}

/// Filters for entity analysis.
///
/// Key order: `query`, `limit`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityFilter {
    pub query: Option<String>,
    pub limit: Option<u32>,
}

impl EntityFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_optional_query(&self.query)
    }

    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(query) = &self.query {
            pairs.push(("query", query.clone()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }
}

/// Filters for the CSV export.
///
/// Key order: `query`, `sentiment`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportFilter {
    pub query: Option<String>,
    pub sentiment: Option<String>,
}

impl ExportFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_sentiment(mut self, sentiment: impl Into<String>) -> Self {
        self.sentiment = Some(sentiment.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_optional_query(&self.query)
    }

    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(query) = &self.query {
            pairs.push(("query", query.clone()));
        }
        if let Some(sentiment) = &self.sentiment {
            pairs.push(("sentiment", sentiment.clone()));
        }
        pairs
    }
}
