//! Operations against the collection-trigger service.

use crate::gateway::GatewayClient;
use crate::models::{CollectionRequest, CollectionStarted, CollectionStatus};
use sentiview_core::{BackendTarget, GatewayError, Result};

/// Sources collected from when the caller does not name any.
const DEFAULT_SOURCES: [&str; 2] = ["vk", "ok"];

impl GatewayClient {
    /// Starts a collection run for the given keywords and sources.
    ///
    /// At least one keyword is required; an empty source list falls back
    /// to collecting from every supported network.
    pub async fn start_collection(&self, request: &CollectionRequest) -> Result<CollectionStarted> {
        if request.keywords.iter().all(|k| k.trim().is_empty()) {
            return Err(GatewayError::validation("at least one keyword is required"));
        }

        if request.sources.is_empty() {
            let request = CollectionRequest {
                sources: DEFAULT_SOURCES.iter().map(|s| s.to_string()).collect(),
                ..request.clone()
            };
            return self
                .post_json(BackendTarget::Collector, "/start", &request)
                .await;
        }

        self.post_json(BackendTarget::Collector, "/start", request)
            .await
    }

    /// Polls the status of a previously started collection task.
    pub async fn collection_status(&self, task_id: &str) -> Result<CollectionStatus> {
        if task_id.trim().is_empty() {
            return Err(GatewayError::validation("task id is required"));
        }
        // Task ids are opaque backend strings; encode so a hostile or
        // malformed id cannot escape its path segment.
        let task_id = urlencoding::encode(task_id);
        self.get_json(
            BackendTarget::Collector,
            &format!("/status/{task_id}"),
            &[],
        )
        .await
    }
}
