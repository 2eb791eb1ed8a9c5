//! Read operations against the analytics service.
//!
//! These are all specializations of the gateway call path with fixed
//! paths and declared optional filters. Statistics and analysis payloads
//! are kept as raw JSON; their shape is owned by the analytics pipeline
//! and consumers chart them as-is.

use crate::gateway::GatewayClient;
use crate::models::{PostPage, SearchCreated, SearchHistory, SearchRequest};
use sentiview_core::filter::{
    EntityFilter, ExportFilter, KeywordFilter, PostFilter, SearchPostFilter, StatisticsFilter,
    validate_query_text,
};
use sentiview_core::{BackendTarget, Result};
use serde_json::Value;

impl GatewayClient {
    /// Sentiment distribution statistics, optionally narrowed by query
    /// and source.
    pub async fn sentiment_statistics(&self, filter: &StatisticsFilter) -> Result<Value> {
        filter.validate()?;
        self.get_json(
            BackendTarget::Analytics,
            "/statistics/sentiment",
            &filter.to_query(),
        )
        .await
    }

    /// One page of processed posts matching the filter.
    pub async fn processed_posts(&self, filter: &PostFilter) -> Result<PostPage> {
        filter.validate()?;
        self.get_json(
            BackendTarget::Analytics,
            "/posts/processed",
            &filter.to_query(),
        )
        .await
    }

    /// High-level analytics overview, optionally narrowed to one query.
    pub async fn analytics_overview(&self, query: Option<&str>) -> Result<Value> {
        let mut pairs = Vec::new();
        if let Some(query) = query {
            validate_query_text(query)?;
            pairs.push(("query", query.to_string()));
        }
        self.get_json(BackendTarget::Analytics, "/analytics/overview", &pairs)
            .await
    }

    /// Keyword frequency analysis.
    pub async fn keyword_analysis(&self, filter: &KeywordFilter) -> Result<Value> {
        filter.validate()?;
        self.get_json(
            BackendTarget::Analytics,
            "/analytics/keywords",
            &filter.to_query(),
        )
        .await
    }

    /// Named-entity analysis.
    pub async fn entity_analysis(&self, filter: &EntityFilter) -> Result<Value> {
        filter.validate()?;
        self.get_json(
            BackendTarget::Analytics,
            "/analytics/entities",
            &filter.to_query(),
        )
        .await
    }

    /// Exports matching posts as CSV. The payload is binary, not JSON.
    pub async fn export_csv(&self, filter: &ExportFilter) -> Result<Vec<u8>> {
        filter.validate()?;
        self.get_bytes(BackendTarget::Analytics, "/export/csv", &filter.to_query())
            .await
    }

    /// Creates a tracked search, which the backend records and forwards
    /// to the collector. The dashboard's minimum query length applies.
    pub async fn create_search(&self, request: &SearchRequest) -> Result<SearchCreated> {
        validate_query_text(&request.search_query)?;
        self.post_json(BackendTarget::Analytics, "/search/create", request)
            .await
    }

    /// The caller's recent tracked searches, newest first.
    pub async fn search_queries(&self) -> Result<SearchHistory> {
        self.get_json(BackendTarget::Analytics, "/search/queries", &[])
            .await
    }

    /// One page of posts collected for a tracked search.
    pub async fn posts_by_search(&self, filter: &SearchPostFilter) -> Result<PostPage> {
        filter.validate()?;
        self.get_json(
            BackendTarget::Analytics,
            "/posts/by-search",
            &filter.to_query(),
        )
        .await
    }
}
