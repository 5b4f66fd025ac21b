//! The liveness routes served over a real socket.

use std::sync::Arc;

use serde_json::Value;
use tokio::net::TcpListener;

use nexus_relay::AppState;
use nexus_relay::api::routes::create_router;
use nexus_relay::config::Settings;
use nexus_relay::services::UpdateMonitor;

async fn spawn_app(settings: Settings) -> String {
    let monitor = Arc::new(UpdateMonitor::from_settings(&settings));
    let router = create_router(AppState::new(monitor, &settings));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

#[tokio::test]
async fn root_reports_watched_mod() {
    let mut settings = Settings::default();
    settings.nexus.mod_id = 4242;
    let base = spawn_app(settings).await;

    let resp = client().get(&base).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.text().await.unwrap(),
        "Nexus Mod Monitor for Mod ID 4242 is running!"
    );
}

#[tokio::test]
async fn root_answers_without_secrets() {
    let base = spawn_app(Settings::default()).await;
    let resp = client().get(&base).send().await.unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn health_reports_state() {
    let base = spawn_app(Settings::default()).await;

    let resp = client()
        .get(format!("{}/health", base))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], nexus_relay::pkg_version());
    assert_eq!(body["polling_enabled"], false);
    assert!(body["last_updated"].is_null());
    assert!(body["timestamp"].as_str().is_some_and(|t| t.ends_with('Z')));
}

#[tokio::test]
async fn health_reflects_configured_secrets() {
    let mut settings = Settings::default();
    settings.nexus.api_key = "k".to_string();
    settings.webhook.url = "https://discord.com/api/webhooks/1/abc".to_string();
    let base = spawn_app(settings).await;

    let body: Value = client()
        .get(format!("{}/health", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["polling_enabled"], true);
}

#[tokio::test]
async fn liveness_probe_is_ok() {
    let base = spawn_app(Settings::default()).await;
    let resp = client()
        .get(format!("{}/health/live", base))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let base = spawn_app(Settings::default()).await;
    let resp = client()
        .get(format!("{}/nope", base))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}
