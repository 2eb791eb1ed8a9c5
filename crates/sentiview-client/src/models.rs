//! Wire models for the three backend services.
//!
//! Response shapes follow what the services actually emit; fields the
//! backends may omit are optional so a partial payload still decodes.

use serde::{Deserialize, Serialize};

/// Login payload for the auth service.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Registration payload for the auth service.
#[derive(Debug, Clone, Serialize)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl NewAccount {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Successful login response. The token is persisted by the caller via the
/// session store.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub user: Option<UserInfo>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub user_id: i64,
}

/// Result of the token-verification endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionCheck {
    pub valid: bool,
    pub user_id: i64,
}

/// Generic `{"message": "..."}` acknowledgement.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// A processed social-media post with its sentiment label.
#[derive(Debug, Clone, Deserialize)]
pub struct Post {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub sentiment: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub likes: Option<i64>,
    #[serde(default)]
    pub comments_count: Option<i64>,
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub collected_at: Option<String>,
}

/// One page of a post listing.
///
/// `search_query` is set only on the by-search listing, which echoes the
/// tracked query the posts belong to.
#[derive(Debug, Clone, Deserialize)]
pub struct PostPage {
    pub posts: Vec<Post>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub skip: Option<u32>,
    #[serde(default)]
    pub search_query: Option<String>,
}

/// Payload for creating a tracked search, which also triggers collection.
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    pub search_query: String,
    pub sources: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

impl SearchRequest {
    pub fn new(search_query: impl Into<String>, sources: Vec<String>) -> Self {
        Self {
            search_query: search_query.into(),
            sources,
            count: None,
        }
    }

    /// Caps the number of posts collected for this search.
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }
}

/// Acknowledgement that a tracked search was created.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchCreated {
    #[serde(default)]
    pub message: Option<String>,
    pub query_id: i64,
    #[serde(default)]
    pub search_query: Option<String>,
    #[serde(default)]
    pub collector_response: Option<serde_json::Value>,
}

/// One row of the caller's search history.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    pub id: i64,
    pub search_query: String,
    #[serde(default)]
    pub sources: Option<Vec<String>>,
    pub status: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub total_found: Option<i64>,
}

/// The caller's recent tracked searches, newest first.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchHistory {
    pub queries: Vec<SearchQuery>,
    #[serde(default)]
    pub total: u64,
}

/// Payload for starting a collection run.
#[derive(Debug, Clone, Serialize)]
pub struct CollectionRequest {
    pub keywords: Vec<String>,
    pub sources: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

impl CollectionRequest {
    pub fn new(keywords: Vec<String>, sources: Vec<String>) -> Self {
        Self {
            keywords,
            sources,
            count: None,
        }
    }

    /// Caps the number of posts fetched per keyword.
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }
}

/// Acknowledgement that a collection task was queued.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionStarted {
    #[serde(default)]
    pub message: Option<String>,
    pub task_id: String,
}

/// Status of a running or finished collection task.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionStatus {
    pub task_id: String,
    pub state: String,
    #[serde(default)]
    pub result: Option<serde_json::Value>,
}
