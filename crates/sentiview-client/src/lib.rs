//! Sentiview gateway client.
//!
//! One client fronts the three backend services of the review-analytics
//! platform (auth, analytics/read, collector). Every outgoing request
//! passes through a single credential policy: when the shared
//! [`SessionStore`](sentiview_core::SessionStore) holds a token it is
//! attached as `Authorization: Bearer <token>`, and any HTTP 401 from any
//! target invalidates the session globally.
//!
//! ```no_run
//! use sentiview_client::{Credentials, GatewayClient};
//! use sentiview_core::{GatewayConfig, SessionStore};
//!
//! # async fn run() -> sentiview_core::Result<()> {
//! let session = SessionStore::new();
//! let client = GatewayClient::new(GatewayConfig::from_env(), session.clone());
//!
//! let login = client
//!     .login(&Credentials::new("user@example.com", "secret"))
//!     .await?;
//! session.set(login.access_token).await;
//!
//! let posts = client.processed_posts(&Default::default()).await?;
//! println!("{} posts", posts.total);
//! # Ok(())
//! # }
//! ```

pub mod analytics;
pub mod auth;
pub mod collector;
pub mod gateway;
pub mod models;

pub use gateway::GatewayClient;
pub use models::{
    CollectionRequest, CollectionStarted, CollectionStatus, Credentials, LoginResponse,
    MessageResponse, NewAccount, Post, PostPage, RegisterResponse, SearchCreated, SearchHistory,
    SearchQuery, SearchRequest, SessionCheck, UserInfo,
};
