#![allow(clippy::unwrap_used)]

use serde_json::json;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::net::TcpListener;
use userdesk::{
    client::HttpUsersApi,
    userdesk::{router, serve, Config},
};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

/// Start the host on an ephemeral port, proxying `/reqres` to the mock and
/// pointing the components back at the host itself.
async fn start_host(upstream: &MockServer) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let config = Config {
        port: addr.port(),
        api_base_url: Some(format!("http://{addr}")),
        proxies: vec![format!("/reqres={}/api", upstream.uri()).parse().unwrap()],
        static_dir: None,
        request_timeout: Duration::from_secs(5),
    };

    let api = Arc::new(
        HttpUsersApi::with_timeout(&config.component_api_base(), config.request_timeout).unwrap(),
    );
    let app = router(&config, api).unwrap();

    tokio::spawn(async move {
        let _ = serve(listener, app).await;
    });

    addr
}

#[tokio::test]
async fn users_page_renders_through_the_proxy() {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return;
    }
    let upstream = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 1,
            "data": [
                {"id": 1, "email": "g@x", "first_name": "George", "last_name": "Bluth"},
                {"id": 2, "email": "j@x", "first_name": "Janet", "last_name": "Weaver"}
            ]
        })))
        .expect(1)
        .mount(&upstream)
        .await;

    let addr = start_host(&upstream).await;

    let response = reqwest::get(format!("http://{addr}/users")).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let html = response.text().await.unwrap();
    assert!(html.contains("id=\"users-list\""));
    assert!(html.contains("Bluth George"));
    assert!(html.contains("Weaver Janet"));
    assert!(html.find("Bluth George").unwrap() < html.find("Weaver Janet").unwrap());
}

#[tokio::test]
async fn submitted_form_shows_created_id() {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return;
    }
    let upstream = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/users"))
        .and(body_json(json!({"name": "morpheus", "job": "leader"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "name": "morpheus",
            "job": "leader",
            "id": "731",
            "createdAt": "2026-10-16T00:00:00.000Z"
        })))
        .expect(1)
        .mount(&upstream)
        .await;

    let addr = start_host(&upstream).await;

    let response = reqwest::Client::new()
        .post(format!("http://{addr}/users/new"))
        .form(&[("name", "morpheus"), ("job", "leader")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let html = response.text().await.unwrap();
    assert!(html.contains("User added successfully. New ID: 731"));
    assert!(!html.contains("Submission failed."));
}

#[tokio::test]
async fn upstream_failure_keeps_the_form_and_reports_it() {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return;
    }
    let upstream = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&upstream)
        .await;

    let addr = start_host(&upstream).await;

    let html = reqwest::Client::new()
        .post(format!("http://{addr}/users/new"))
        .form(&[("name", "neo"), ("job", "the one")])
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(html.contains("Submission failed."));
    assert!(!html.contains("New ID"));
    assert!(html.contains("neo"));
}

#[tokio::test]
async fn health_reports_the_package() {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return;
    }
    let upstream = MockServer::start().await;
    let addr = start_host(&upstream).await;

    let response = reqwest::get(format!("http://{addr}/health")).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["name"], env!("CARGO_PKG_NAME"));
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
