//! End-to-end tests for `/api/google-service` and `/api/google-test`
//! against a mocked Google backend

use axum::{body::Body, Router};
use google_workspace::{Config, GoogleWorkspaceModule};
use http::{header, Request, StatusCode};
use httpmock::prelude::*;
use serde_json::{json, Value};
use tower::ServiceExt;

const SERVICE_ACCOUNT: &str = "drive-bot@servitech-pro.iam.gserviceaccount.com";

fn print_test_header(name: &str, stages: &[&str]) {
    println!("\n🧪 {}", name);
    for (i, stage) in stages.iter().enumerate() {
        println!("📝 Stage {}: {}", i + 1, stage);
    }
}

fn configured(server: &MockServer) -> Config {
    Config {
        workload_identity_provider: Some(
            "projects/123/locations/global/workloadIdentityPools/vercel/providers/vercel".into(),
        ),
        oidc_token: Some("oidc-jwt".into()),
        project_id: Some("servitech-pro".into()),
        service_account_email: Some(SERVICE_ACCOUNT.into()),
        sts_url: server.base_url(),
        iam_credentials_url: server.base_url(),
        drive_upload_url: server.url("/upload/drive/v3"),
        calendar_url: server.url("/calendar/v3"),
        ..Default::default()
    }
}

fn router(config: Config) -> Router {
    let module = GoogleWorkspaceModule::default();
    module.init(config).unwrap();
    module.register_rest(Router::new()).unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

fn post_action(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/google-service")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Mock the STS exchange and the impersonation call
async fn mock_token_chain(server: &MockServer) -> (httpmock::Mock<'_>, httpmock::Mock<'_>) {
    let sts = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/token")
                .header("content-type", "application/x-www-form-urlencoded");
            then.status(200)
                .json_body(json!({"access_token": "sts-token", "token_type": "Bearer"}));
        })
        .await;

    let iam = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(format!(
                    "/v1/projects/-/serviceAccounts/{}:generateAccessToken",
                    SERVICE_ACCOUNT
                ))
                .header("authorization", "Bearer sts-token");
            then.status(200).json_body(
                json!({"accessToken": "sa-token", "expireTime": "2026-10-18T12:00:00Z"}),
            );
        })
        .await;

    (sts, iam)
}

#[tokio::test]
async fn test_upload_to_drive_happy_path() {
    print_test_header(
        "test_upload_to_drive_happy_path",
        &[
            "Exchange the OIDC token and impersonate the service account",
            "Upload the decoded file as multipart/related",
            "Return fileId and webViewLink",
        ],
    );
    let server = MockServer::start_async().await;
    let (sts, iam) = mock_token_chain(&server).await;

    let drive = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/upload/drive/v3/files")
                .query_param("uploadType", "multipart")
                .header("authorization", "Bearer sa-token");
            then.status(200).json_body(json!({
                "id": "file-123",
                "webViewLink": "https://drive.google.com/file/d/file-123/view"
            }));
        })
        .await;

    let (status, body) = send(
        router(configured(&server)),
        post_action(json!({
            "action": "upload_to_drive",
            "fileName": "orden-OS-20261018.pdf",
            "content": "aG9sYQ==",
            "mimeType": "application/pdf"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["fileId"], "file-123");
    assert_eq!(
        body["webViewLink"],
        "https://drive.google.com/file/d/file-123/view"
    );
    sts.assert_async().await;
    iam.assert_async().await;
    drive.assert_async().await;
}

#[tokio::test]
async fn test_upload_without_file_name_or_content_is_400() {
    print_test_header(
        "test_upload_without_file_name_or_content_is_400",
        &["Missing fileName or content is rejected before any Google call"],
    );
    let server = MockServer::start_async().await;
    let (sts, _) = mock_token_chain(&server).await;

    let (status, body) = send(
        router(configured(&server)),
        post_action(json!({"action": "upload_to_drive", "content": "aG9sYQ=="})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert!(body["details"].as_str().unwrap().contains("fileName"));

    let (status, body) = send(
        router(configured(&server)),
        post_action(json!({"action": "upload_to_drive", "fileName": "a.pdf"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"].as_str().unwrap().contains("content"));

    sts.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_unknown_action_is_400() {
    print_test_header(
        "test_unknown_action_is_400",
        &["Unknown and missing actions are client errors"],
    );
    let config = Config::default();

    let (status, body) = send(
        router(config.clone()),
        post_action(json!({"action": "share_folder"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"].as_str().unwrap().contains("share_folder"));

    let (status, _) = send(router(config), post_action(json!({"fileName": "a.pdf"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_calendar_event_lifecycle() {
    print_test_header(
        "test_calendar_event_lifecycle",
        &[
            "Create an event on the default calendar",
            "List upcoming events",
            "Delete the event",
        ],
    );
    let server = MockServer::start_async().await;
    mock_token_chain(&server).await;

    let insert = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/calendar/v3/calendars/primary/events")
                .header("authorization", "Bearer sa-token");
            then.status(200).json_body(json!({
                "id": "evt-1",
                "htmlLink": "https://calendar.google.com/event?eid=evt-1",
                "status": "confirmed"
            }));
        })
        .await;
    let list = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/calendar/v3/calendars/primary/events")
                .query_param("maxResults", "5")
                .query_param("singleEvents", "true");
            then.status(200).json_body(json!({
                "items": [{
                    "id": "evt-1",
                    "summary": "Visita técnica OS-20261018-3FA9C2",
                    "start": {"dateTime": "2026-10-20T10:00:00-05:00"},
                    "end": {"dateTime": "2026-10-20T11:00:00-05:00"}
                }]
            }));
        })
        .await;
    let delete = server
        .mock_async(|when, then| {
            when.method(DELETE)
                .path("/calendar/v3/calendars/primary/events/evt-1");
            then.status(204);
        })
        .await;

    let app = router(configured(&server));

    // Stage 1
    let (status, body) = send(
        app.clone(),
        post_action(json!({
            "action": "create_calendar_event",
            "summary": "Visita técnica OS-20261018-3FA9C2",
            "start": "2026-10-20T10:00:00-05:00",
            "end": {"dateTime": "2026-10-20T11:00:00-05:00", "timeZone": "America/Guayaquil"},
            "attendees": ["tecnico@servitech.ec"]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["eventId"], "evt-1");
    insert.assert_async().await;

    // Stage 2
    let (status, body) = send(
        app.clone(),
        post_action(json!({
            "action": "list_calendar_events",
            "timeMin": "2026-10-18T00:00:00Z",
            "maxResults": 5
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["events"][0]["start"], "2026-10-20T10:00:00-05:00");
    list.assert_async().await;

    // Stage 3
    let (status, body) = send(
        app,
        post_action(json!({"action": "delete_calendar_event", "eventId": "evt-1"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true}));
    delete.assert_async().await;
}

#[tokio::test]
async fn test_upstream_failure_is_500() {
    print_test_header(
        "test_upstream_failure_is_500",
        &["A Drive rejection surfaces as 500 {error, details}"],
    );
    let server = MockServer::start_async().await;
    mock_token_chain(&server).await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/upload/drive/v3/files");
            then.status(403)
                .json_body(json!({"error": {"message": "insufficientPermissions"}}));
        })
        .await;

    let (status, body) = send(
        router(configured(&server)),
        post_action(json!({
            "action": "upload_to_drive",
            "fileName": "a.txt",
            "content": "aG9sYQ=="
        })),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Google API request failed");
    assert!(body["details"].as_str().unwrap().contains("403"));
}

#[tokio::test]
async fn test_google_test_reports_missing_configuration() {
    print_test_header(
        "test_google_test_reports_missing_configuration",
        &["Without credentials the diagnostic answers 500 and names what is missing"],
    );
    let request = Request::builder()
        .uri("/api/google-test")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(router(Config::default()), request).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["token_acquired"], false);
    assert_eq!(body["provider_configured"], false);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("GCP_WORKLOAD_IDENTITY_PROVIDER"));
}

#[tokio::test]
async fn test_google_test_with_working_credentials() {
    print_test_header(
        "test_google_test_with_working_credentials",
        &["A full token chain yields 200"],
    );
    let server = MockServer::start_async().await;
    mock_token_chain(&server).await;
    let request = Request::builder()
        .uri("/api/google-test")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(router(configured(&server)), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["service_account"], SERVICE_ACCOUNT);
    assert!(body.get("error").is_none());
}
