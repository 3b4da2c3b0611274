use reqwest::StatusCode;
use serde_json::json;

use rollcall_api::app::AppConfig;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(config: AppConfig) -> Self {
        // Build app (same router as prod), but bind to an ephemeral port.
        let app = rollcall_api::app::build_app(config).await;
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    async fn spawn_default() -> Self {
        Self::spawn(AppConfig::default()).await
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Register an admin account and log in, returning a bearer token.
async fn admin_token(client: &reqwest::Client, base_url: &str) -> String {
    let res = client
        .post(format!("{}/auth/register", base_url))
        .json(&json!({
            "username": "admin",
            "password": "hunter2",
            "roles": ["admin"],
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = client
        .post(format!("{}/auth/login", base_url))
        .json(&json!({ "username": "admin", "password": "hunter2" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: serde_json::Value = res.json().await.unwrap();
    body["token"].as_str().unwrap().to_string()
}

async fn create_member(
    client: &reqwest::Client,
    base_url: &str,
    token: &str,
    full_name: &str,
    card_number: &str,
) -> serde_json::Value {
    let res = client
        .post(format!("{}/members", base_url))
        .bearer_auth(token)
        .json(&json!({ "full_name": full_name, "card_number": card_number }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    res.json().await.unwrap()
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn_default().await;
    let res = reqwest::get(format!("{}/health", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn auth_required_for_member_endpoints() {
    let srv = TestServer::spawn_default().await;

    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/members", srv.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn register_login_whoami_round_trip() {
    let srv = TestServer::spawn_default().await;
    let client = reqwest::Client::new();
    let token = admin_token(&client, &srv.base_url).await;

    let res = client
        .get(format!("{}/whoami", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["roles"].as_array().unwrap().iter().any(|r| r == "admin"));
}

#[tokio::test]
async fn login_with_wrong_password_is_rejected() {
    let srv = TestServer::spawn_default().await;
    let client = reqwest::Client::new();
    let _token = admin_token(&client, &srv.base_url).await;

    let res = client
        .post(format!("{}/auth/login", srv.base_url))
        .json(&json!({ "username": "admin", "password": "wrong" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn scan_records_entry_and_history_is_queryable() {
    let srv = TestServer::spawn_default().await;
    let client = reqwest::Client::new();
    let token = admin_token(&client, &srv.base_url).await;

    let jane = create_member(&client, &srv.base_url, &token, "Jane Doe", "C-1001").await;

    // Scans are open to unauthenticated kiosks by default.
    let res = client
        .post(format!("{}/attendance/C-1001/present", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let entry: serde_json::Value = res.json().await.unwrap();
    assert_eq!(entry["status"], "present");
    assert_eq!(entry["member_id"], jane["id"]);

    // A second identical scan is a second entry, not a duplicate error.
    let res = client
        .post(format!("{}/attendance/C-1001/present", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = client
        .get(format!("{}/attendance/logs", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["member_name"], "Jane Doe");
    assert_eq!(items[0]["card_number"], "C-1001");
}

#[tokio::test]
async fn unknown_card_is_not_found_and_appends_nothing() {
    let srv = TestServer::spawn_default().await;
    let client = reqwest::Client::new();
    let token = admin_token(&client, &srv.base_url).await;
    create_member(&client, &srv.base_url, &token, "Jane Doe", "C-1001").await;

    let res = client
        .post(format!("{}/attendance/C-9999/present", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .get(format!("{}/attendance/logs", srv.base_url))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn search_matches_case_insensitive_and_misses_are_not_found() {
    let srv = TestServer::spawn_default().await;
    let client = reqwest::Client::new();
    let token = admin_token(&client, &srv.base_url).await;

    create_member(&client, &srv.base_url, &token, "Anna Smith", "C-1").await;
    create_member(&client, &srv.base_url, &token, "Hannah Lee", "C-2").await;

    for card in ["C-1", "C-2"] {
        let res = client
            .post(format!("{}/attendance/{}/present", srv.base_url, card))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let res = client
        .get(format!("{}/attendance/logs/search?memberName=ann", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["items"].as_array().unwrap().len(), 2);

    // Zero matches is surfaced as absence, not an empty list.
    let res = client
        .get(format!("{}/attendance/logs/search?memberName=zzz", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn scan_requires_token_when_configured() {
    let srv = TestServer::spawn(AppConfig {
        require_auth_for_scan: true,
        ..AppConfig::default()
    })
    .await;
    let client = reqwest::Client::new();
    let token = admin_token(&client, &srv.base_url).await;
    create_member(&client, &srv.base_url, &token, "Jane Doe", "C-1001").await;

    let res = client
        .post(format!("{}/attendance/C-1001/present", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .post(format!("{}/attendance/C-1001/present", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn sse_stream_receives_committed_scans() {
    let srv = TestServer::spawn_default().await;
    let client = reqwest::Client::new();
    let token = admin_token(&client, &srv.base_url).await;
    create_member(&client, &srv.base_url, &token, "Jane Doe", "C-1001").await;

    let mut stream = client
        .get(format!("{}/attendance/stream", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(stream.status(), StatusCode::OK);

    // Give the subscription a moment to register before triggering the scan.
    tokio::time::sleep(std::time::Duration::from_millis(200)).await;

    let res = client
        .post(format!("{}/attendance/C-1001/present", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let mut received = String::new();
    let deadline = tokio::time::Instant::now() + std::time::Duration::from_secs(5);
    loop {
        let chunk = tokio::time::timeout_at(deadline, stream.chunk())
            .await
            .expect("timed out waiting for SSE event")
            .unwrap();
        match chunk {
            Some(bytes) => {
                received.push_str(&String::from_utf8_lossy(&bytes));
                if received.contains("attendanceUpdated") && received.contains("Jane Doe") {
                    break;
                }
            }
            None => panic!("SSE stream closed before delivering the event"),
        }
    }

    assert!(received.contains("\"status\":\"present\""));
}
