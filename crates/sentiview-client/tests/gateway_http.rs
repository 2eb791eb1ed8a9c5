//! End-to-end tests driving the gateway client against in-process mock
//! backends. One axum server plays all three services; the client is
//! configured with per-target base addresses that point at its route
//! prefixes.

use std::net::TcpListener as StdTcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Json;
use axum::extract::RawQuery;
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::{get, post};
use axum::Router;
use sentiview_client::{CollectionRequest, Credentials, GatewayClient, SearchRequest};
use sentiview_core::filter::{ExportFilter, KeywordFilter, PostFilter, SearchPostFilter};
use sentiview_core::{GatewayConfig, GatewayError, SessionExpiryHandler, SessionStore};
use serde_json::{Value, json};

type HeaderLog = Arc<Mutex<Vec<Option<String>>>>;

struct RedirectProbe {
    hits: AtomicUsize,
}

#[async_trait]
impl SessionExpiryHandler for RedirectProbe {
    async fn on_session_expired(&self) {
        self.hits.fetch_add(1, Ordering::SeqCst);
    }
}

fn bearer_of(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string())
}

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock server");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve mock");
    });
    format!("http://{addr}")
}

fn config_for(base: &str) -> GatewayConfig {
    GatewayConfig::default()
        .with_auth_base_url(format!("{base}/api/auth"))
        .with_analytics_base_url(format!("{base}/api"))
        .with_collector_base_url(format!("{base}/api/collect"))
}

#[tokio::test]
async fn token_is_attached_to_every_target() {
    let log: HeaderLog = Arc::new(Mutex::new(Vec::new()));
    let (l1, l2, l3) = (log.clone(), log.clone(), log.clone());

    let router = Router::new()
        .route(
            "/api/auth/verify",
            get(move |headers: HeaderMap| async move {
                l1.lock().unwrap().push(bearer_of(&headers));
                Json(json!({"valid": true, "user_id": 1}))
            }),
        )
        .route(
            "/api/analytics/overview",
            get(move |headers: HeaderMap| async move {
                l2.lock().unwrap().push(bearer_of(&headers));
                Json(json!({"total_posts": 10}))
            }),
        )
        .route(
            "/api/collect/status/t1",
            get(move |headers: HeaderMap| async move {
                l3.lock().unwrap().push(bearer_of(&headers));
                Json(json!({"task_id": "t1", "state": "SUCCESS", "result": null}))
            }),
        );

    let base = serve(router).await;
    let session = SessionStore::new();
    session.set("abc123").await;
    let client = GatewayClient::new(config_for(&base), session);

    let check = client.verify_session().await.unwrap();
    assert!(check.valid);
    client.analytics_overview(None).await.unwrap();
    let status = client.collection_status("t1").await.unwrap();
    assert_eq!(status.state, "SUCCESS");

    let seen = log.lock().unwrap().clone();
    assert_eq!(seen.len(), 3);
    for header in seen {
        assert_eq!(header.as_deref(), Some("Bearer abc123"));
    }
}

#[tokio::test]
async fn no_credential_header_without_token() {
    let log: HeaderLog = Arc::new(Mutex::new(Vec::new()));
    let recorder = log.clone();

    let router = Router::new().route(
        "/api/analytics/overview",
        get(move |headers: HeaderMap| async move {
            recorder.lock().unwrap().push(bearer_of(&headers));
            Json(json!({}))
        }),
    );

    let base = serve(router).await;
    let client = GatewayClient::new(config_for(&base), SessionStore::new());
    client.analytics_overview(None).await.unwrap();

    assert_eq!(log.lock().unwrap().as_slice(), &[None]);
}

#[tokio::test]
async fn unauthorized_response_invalidates_session_exactly_once() {
    let router = Router::new().route(
        "/api/posts/processed",
        get(|| async {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": "token expired"})),
            )
        }),
    );

    let base = serve(router).await;
    let session = SessionStore::new();
    let probe = Arc::new(RedirectProbe {
        hits: AtomicUsize::new(0),
    });
    session.on_expired(probe.clone()).await;
    session.set("stale-token").await;

    let client = GatewayClient::new(config_for(&base), session.clone());

    let err = client.processed_posts(&PostFilter::new()).await.unwrap_err();
    match err {
        GatewayError::SessionExpired { message } => assert_eq!(message, "token expired"),
        other => panic!("expected SessionExpired, got {other:?}"),
    }
    assert!(!session.is_present().await);
    assert_eq!(probe.hits.load(Ordering::SeqCst), 1);

    // Every failing response triggers its own notification, even with no
    // token left to clear.
    let err = client.processed_posts(&PostFilter::new()).await.unwrap_err();
    assert!(err.is_session_expired());
    assert_eq!(probe.hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn unset_filters_never_reach_the_query_string() {
    let queries: Arc<Mutex<Vec<Option<String>>>> = Arc::new(Mutex::new(Vec::new()));
    let recorder = queries.clone();

    let router = Router::new().route(
        "/api/posts/processed",
        get(move |RawQuery(query): RawQuery| async move {
            recorder.lock().unwrap().push(query);
            Json(json!({"posts": [], "total": 0}))
        }),
    );

    let base = serve(router).await;
    let client = GatewayClient::new(config_for(&base), SessionStore::new());

    client
        .processed_posts(&PostFilter::new().with_sentiment("negative").with_limit(20))
        .await
        .unwrap();
    client
        .processed_posts(&PostFilter::new().with_sentiment("positive"))
        .await
        .unwrap();
    client.processed_posts(&PostFilter::new()).await.unwrap();

    let seen = queries.lock().unwrap().clone();
    assert_eq!(seen[0].as_deref(), Some("sentiment=negative&limit=20"));
    assert_eq!(seen[1].as_deref(), Some("sentiment=positive"));
    assert_eq!(seen[2], None);
}

#[tokio::test]
async fn login_collect_logout_round_trip() {
    let collect_headers: HeaderLog = Arc::new(Mutex::new(Vec::new()));
    let collect_bodies: Arc<Mutex<Vec<Value>>> = Arc::new(Mutex::new(Vec::new()));
    let verify_headers: HeaderLog = Arc::new(Mutex::new(Vec::new()));
    let (h, b, v) = (
        collect_headers.clone(),
        collect_bodies.clone(),
        verify_headers.clone(),
    );

    let router = Router::new()
        .route(
            "/api/auth/login",
            post(|| async {
                Json(json!({
                    "access_token": "abc123",
                    "user": {"id": 7, "username": "demo"}
                }))
            }),
        )
        .route(
            "/api/auth/logout",
            post(|| async { Json(json!({"message": "logged out"})) }),
        )
        .route(
            "/api/auth/verify",
            get(move |headers: HeaderMap| async move {
                v.lock().unwrap().push(bearer_of(&headers));
                Json(json!({"valid": true, "user_id": 7}))
            }),
        )
        .route(
            "/api/collect/start",
            post(move |headers: HeaderMap, Json(body): Json<Value>| async move {
                h.lock().unwrap().push(bearer_of(&headers));
                b.lock().unwrap().push(body);
                Json(json!({"message": "started", "task_id": "42"}))
            }),
        );

    let base = serve(router).await;
    let session = SessionStore::new();
    let client = GatewayClient::new(config_for(&base), session.clone());

    let login = client
        .login(&Credentials::new("user@example.com", "secret"))
        .await
        .unwrap();
    assert_eq!(login.access_token, "abc123");
    session.set(login.access_token).await;

    let started = client
        .start_collection(&CollectionRequest::new(
            vec!["phone".into()],
            vec!["vk".into()],
        ))
        .await
        .unwrap();
    assert_eq!(started.task_id, "42");
    assert_eq!(
        collect_headers.lock().unwrap().as_slice(),
        &[Some("Bearer abc123".to_string())]
    );
    assert_eq!(
        collect_bodies.lock().unwrap().as_slice(),
        &[json!({"keywords": ["phone"], "sources": ["vk"]})]
    );

    client.logout().await.unwrap();
    assert!(!session.is_present().await);

    // The next call carries no credential header at all.
    client.verify_session().await.unwrap();
    assert_eq!(verify_headers.lock().unwrap().as_slice(), &[None]);
}

#[tokio::test]
async fn empty_source_list_falls_back_to_all_networks() {
    let bodies: Arc<Mutex<Vec<Value>>> = Arc::new(Mutex::new(Vec::new()));
    let recorder = bodies.clone();

    let router = Router::new().route(
        "/api/collect/start",
        post(move |Json(body): Json<Value>| async move {
            recorder.lock().unwrap().push(body);
            Json(json!({"message": "started", "task_id": "1"}))
        }),
    );

    let base = serve(router).await;
    let client = GatewayClient::new(config_for(&base), SessionStore::new());

    client
        .start_collection(&CollectionRequest::new(vec!["phone".into()], Vec::new()))
        .await
        .unwrap();

    assert_eq!(
        bodies.lock().unwrap().as_slice(),
        &[json!({"keywords": ["phone"], "sources": ["vk", "ok"]})]
    );
}

#[tokio::test]
async fn search_history_round_trip() {
    let create_headers: HeaderLog = Arc::new(Mutex::new(Vec::new()));
    let create_bodies: Arc<Mutex<Vec<Value>>> = Arc::new(Mutex::new(Vec::new()));
    let by_search_queries: Arc<Mutex<Vec<Option<String>>>> = Arc::new(Mutex::new(Vec::new()));
    let (h, b, q) = (
        create_headers.clone(),
        create_bodies.clone(),
        by_search_queries.clone(),
    );

    let router = Router::new()
        .route(
            "/api/search/create",
            post(move |headers: HeaderMap, Json(body): Json<Value>| async move {
                h.lock().unwrap().push(bearer_of(&headers));
                b.lock().unwrap().push(body);
                Json(json!({
                    "message": "started",
                    "query_id": 5,
                    "search_query": "phone",
                    "collector_response": {"task_id": "42"}
                }))
            }),
        )
        .route(
            "/api/search/queries",
            get(|| async {
                Json(json!({
                    "queries": [{
                        "id": 5,
                        "search_query": "phone",
                        "sources": ["vk"],
                        "status": "completed",
                        "created_at": "2026-08-01T10:00:00",
                        "completed_at": "2026-08-01T10:05:00",
                        "total_found": 120
                    }],
                    "total": 1
                }))
            }),
        )
        .route(
            "/api/posts/by-search",
            get(move |RawQuery(query): RawQuery| async move {
                q.lock().unwrap().push(query);
                Json(json!({
                    "search_query": "phone",
                    "posts": [{"_id": "p1", "sentiment": "negative"}],
                    "total": 1,
                    "limit": 20,
                    "skip": 0
                }))
            }),
        );

    let base = serve(router).await;
    let session = SessionStore::new();
    session.set("abc123").await;
    let client = GatewayClient::new(config_for(&base), session);

    let created = client
        .create_search(&SearchRequest::new("phone", vec!["vk".into()]).with_count(100))
        .await
        .unwrap();
    assert_eq!(created.query_id, 5);
    assert_eq!(
        create_headers.lock().unwrap().as_slice(),
        &[Some("Bearer abc123".to_string())]
    );
    assert_eq!(
        create_bodies.lock().unwrap().as_slice(),
        &[json!({"search_query": "phone", "sources": ["vk"], "count": 100})]
    );

    let history = client.search_queries().await.unwrap();
    assert_eq!(history.total, 1);
    assert_eq!(history.queries[0].id, 5);
    assert_eq!(history.queries[0].status, "completed");

    let page = client
        .posts_by_search(&SearchPostFilter::new("phone").with_sentiment("negative").with_limit(20))
        .await
        .unwrap();
    assert_eq!(page.search_query.as_deref(), Some("phone"));
    assert_eq!(page.posts[0].sentiment.as_deref(), Some("negative"));
    assert_eq!(
        by_search_queries.lock().unwrap().as_slice(),
        &[Some("search_query=phone&sentiment=negative&limit=20".to_string())]
    );
}

#[tokio::test]
async fn task_id_is_encoded_into_its_path_segment() {
    let seen: Arc<Mutex<Vec<(String, Option<String>)>>> = Arc::new(Mutex::new(Vec::new()));
    let recorder = seen.clone();

    let router = Router::new().route(
        "/api/collect/status/:id",
        get(
            move |axum::extract::Path(id): axum::extract::Path<String>,
                  RawQuery(query): RawQuery| async move {
                recorder.lock().unwrap().push((id.clone(), query));
                Json(json!({"task_id": id, "state": "PENDING", "result": null}))
            },
        ),
    );

    let base = serve(router).await;
    let client = GatewayClient::new(config_for(&base), SessionStore::new());

    // An id with path and query metacharacters must stay one segment.
    let status = client.collection_status("vk/42?x").await.unwrap();
    assert_eq!(status.state, "PENDING");

    let seen = seen.lock().unwrap().clone();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0, "vk/42?x");
    assert_eq!(seen[0].1, None);
}

#[tokio::test]
async fn backend_error_body_propagates_unmodified() {
    let router = Router::new()
        .route(
            "/api/analytics/keywords",
            get(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": "boom"})),
                )
            }),
        )
        .route(
            "/api/analytics/entities",
            get(|| async { StatusCode::BAD_GATEWAY }),
        );

    let base = serve(router).await;
    let client = GatewayClient::new(config_for(&base), SessionStore::new());

    let err = client
        .keyword_analysis(&KeywordFilter::new())
        .await
        .unwrap_err();
    match err {
        GatewayError::Backend {
            status_code,
            message,
        } => {
            assert_eq!(status_code, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("expected Backend, got {other:?}"),
    }

    // No declared body: a generic status-derived message is used.
    let err = client
        .entity_analysis(&Default::default())
        .await
        .unwrap_err();
    match err {
        GatewayError::Backend {
            status_code,
            message,
        } => {
            assert_eq!(status_code, 502);
            assert!(message.contains("502"));
        }
        other => panic!("expected Backend, got {other:?}"),
    }
}

#[tokio::test]
async fn csv_export_returns_raw_bytes() {
    const CSV: &str = "id,text,sentiment\n1,nice phone,positive\n";

    let router = Router::new().route(
        "/api/export/csv",
        get(|| async { ([(header::CONTENT_TYPE, "text/csv")], CSV) }),
    );

    let base = serve(router).await;
    let client = GatewayClient::new(config_for(&base), SessionStore::new());

    let bytes = client.export_csv(&ExportFilter::new()).await.unwrap();
    assert_eq!(bytes, CSV.as_bytes());
}

#[tokio::test]
async fn validation_failures_never_reach_the_network() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();

    let router = Router::new().fallback(move || {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Json(json!({}))
        }
    });

    let base = serve(router).await;
    let client = GatewayClient::new(config_for(&base), SessionStore::new());

    let err = client
        .processed_posts(&PostFilter::new().with_query("ab"))
        .await
        .unwrap_err();
    assert!(err.is_validation());

    let err = client
        .login(&Credentials::new("", "secret"))
        .await
        .unwrap_err();
    assert!(err.is_validation());

    let err = client
        .start_collection(&CollectionRequest::new(Vec::new(), vec!["vk".into()]))
        .await
        .unwrap_err();
    assert!(err.is_validation());

    let err = client.collection_status("  ").await.unwrap_err();
    assert!(err.is_validation());

    let err = client
        .create_search(&SearchRequest::new("ab", vec!["vk".into()]))
        .await
        .unwrap_err();
    assert!(err.is_validation());

    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn connection_failure_maps_to_retryable_transport_error() {
    // Bind and immediately drop a listener so the port is closed.
    let port = {
        let listener = StdTcpListener::bind("127.0.0.1:0").expect("bind probe port");
        listener.local_addr().unwrap().port()
    };

    let client = GatewayClient::new(
        config_for(&format!("http://127.0.0.1:{port}")),
        SessionStore::new(),
    );

    let err = client.analytics_overview(None).await.unwrap_err();
    match err {
        GatewayError::Transport { is_retryable, .. } => assert!(is_retryable),
        other => panic!("expected Transport, got {other:?}"),
    }
}
