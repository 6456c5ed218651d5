mod common;
use common::{app, StubResponse, StubServer};

use assisted_installer::services::logger::LogLevel;
use assisted_installer::services::settings::Settings;
use serde_json::json;

fn bare_settings(server: &StubServer) -> Settings {
    Settings::default()
        .with_api_url(&server.api_url())
        .expect("api url")
        .with_sso_url(&server.url("/token"))
        .expect("sso url")
        .with_log_level(LogLevel::Error)
}

fn sso_requests(server: &StubServer) -> usize {
    server
        .requests()
        .iter()
        .filter(|r| r.path == "/token")
        .count()
}

#[tokio::test]
async fn access_token_skips_refresh_exchange() {
    let server = StubServer::start().await;
    server.route("POST", "/token", StubResponse::json(200, json!({"access_token": "fresh"})));
    server.route_api("GET", "/supported-operators", StubResponse::json(200, json!([])));
    let settings = bare_settings(&server)
        .with_access_token("direct")
        .with_offline_token("offline");

    app(settings)
        .run("operators", json!({}))
        .await
        .expect("operators");

    assert_eq!(sso_requests(&server), 0);
    let api = server.requests();
    assert_eq!(api.len(), 1);
    assert_eq!(api[0].header("authorization"), Some("Bearer direct"));
}

#[tokio::test]
async fn offline_token_is_exchanged_once() {
    let server = StubServer::start().await;
    server.route(
        "POST",
        "/token",
        StubResponse::json(200, json!({"access_token": "fresh", "expires_in": 900})),
    );
    server.route_api("GET", "/supported-operators", StubResponse::json(200, json!([])));
    let settings = bare_settings(&server).with_offline_token("offline-123");

    app(settings)
        .run("operators", json!({}))
        .await
        .expect("operators");

    let requests = server.requests();
    assert_eq!(requests.len(), 2);
    let sso = &requests[0];
    assert_eq!(sso.method, "POST");
    assert_eq!(sso.path, "/token");
    assert_eq!(
        sso.header("content-type"),
        Some("application/x-www-form-urlencoded")
    );
    assert_eq!(sso.header("accept"), Some("application/json"));
    let form: Vec<(String, String)> =
        url::form_urlencoded::parse(sso.body.as_bytes()).into_owned().collect();
    assert_eq!(
        form,
        vec![
            ("grant_type".to_string(), "refresh_token".to_string()),
            ("client_id".to_string(), "cloud-services".to_string()),
            ("refresh_token".to_string(), "offline-123".to_string()),
        ]
    );
    assert_eq!(requests[1].header("authorization"), Some("Bearer fresh"));
}

#[tokio::test]
async fn failed_exchange_degrades_to_unauthenticated_request() {
    let server = StubServer::start().await;
    server.route("POST", "/token", StubResponse::json(400, json!({"error": "invalid_grant"})));
    server.route_api(
        "GET",
        "/supported-operators",
        StubResponse::json(401, json!({"code": 401, "reason": "unauthorized"})),
    );
    let settings = bare_settings(&server).with_offline_token("expired");

    let err = app(settings)
        .run("operators", json!({}))
        .await
        .expect_err("remote rejects");

    assert_eq!(sso_requests(&server), 1);
    let api = server
        .requests()
        .into_iter()
        .find(|r| r.path != "/token")
        .expect("api request");
    assert_eq!(api.header("authorization"), None);
    assert_eq!(err.status, Some(401));
}

#[tokio::test]
async fn non_json_exchange_response_is_swallowed() {
    let server = StubServer::start().await;
    server.route("POST", "/token", StubResponse::text(200, "<html>maintenance</html>"));
    server.route_api("GET", "/supported-operators", StubResponse::json(200, json!([])));
    let settings = bare_settings(&server).with_offline_token("offline");

    let result = app(settings)
        .run("operators", json!({}))
        .await
        .expect("operators");

    assert_eq!(result["operators"], json!([]));
    let api = server
        .requests()
        .into_iter()
        .find(|r| r.path != "/token")
        .expect("api request");
    assert_eq!(api.header("authorization"), None);
}

#[tokio::test]
async fn no_credentials_means_no_exchange() {
    let server = StubServer::start().await;
    server.route_api("GET", "/supported-operators", StubResponse::json(200, json!([])));

    app(bare_settings(&server))
        .run("operators", json!({}))
        .await
        .expect("operators");

    assert_eq!(sso_requests(&server), 0);
    assert_eq!(server.requests()[0].header("authorization"), None);
}

#[tokio::test]
async fn validation_failure_happens_before_exchange() {
    let server = StubServer::start().await;
    server.route("POST", "/token", StubResponse::json(200, json!({"access_token": "fresh"})));
    let settings = bare_settings(&server).with_offline_token("offline");

    let err = app(settings)
        .run("events", json!({}))
        .await
        .expect_err("cluster_id missing");

    assert_eq!(err.message, "cluster_id is required for list cluster events action");
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn error_status_exchange_ignores_access_token_field() {
    let server = StubServer::start().await;
    server.route(
        "POST",
        "/token",
        StubResponse::json(500, json!({"access_token": "from-error"})),
    );
    server.route_api("GET", "/supported-operators", StubResponse::json(200, json!([])));
    let settings = bare_settings(&server).with_offline_token("offline");

    app(settings)
        .run("operators", json!({}))
        .await
        .expect("operators");

    assert_eq!(sso_requests(&server), 1);
    let api = server
        .requests()
        .into_iter()
        .find(|r| r.path != "/token")
        .expect("api request");
    assert_eq!(api.header("authorization"), None);
}

#[tokio::test]
async fn unreachable_token_endpoint_degrades_to_unauthenticated_request() {
    let server = StubServer::start().await;
    server.route_api("GET", "/supported-operators", StubResponse::json(200, json!([])));
    let settings = bare_settings(&server)
        .with_sso_url("http://127.0.0.1:1/token")
        .expect("sso url")
        .with_offline_token("offline");

    app(settings)
        .run("operators", json!({}))
        .await
        .expect("operators");

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].header("authorization"), None);
}
