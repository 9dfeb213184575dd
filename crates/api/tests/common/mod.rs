#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use prmon_core::store::{MemoryBuildConfigStore, MemoryUserConfigStore};
use prmon_core::widget::{ProviderError, WidgetDescriptor, WidgetProvider};
use prmon_core::{BuildRef, MonitorDashboard, ProviderRegistry};
use tower::ServiceExt;

use prmon_api::auth::jwt::{generate_access_token, JwtConfig};
use prmon_api::config::ServerConfig;
use prmon_api::router::build_app_router;
use prmon_api::state::AppState;

pub const BUILD: &str = "/api/v1/monitoring/projects/Web%20App/jobs/PR-3/builds";

/// Offers `a` (default), `b` and `c` for every build.
pub struct SampleProvider;

impl WidgetProvider for SampleProvider {
    fn id(&self) -> &str {
        "sample"
    }

    fn display_name(&self) -> &str {
        "Sample Portlets"
    }

    fn list_widgets(&self, _: &BuildRef) -> Result<Vec<WidgetDescriptor>, ProviderError> {
        Ok(vec![
            WidgetDescriptor::new("a", "A", 300, 200).shown_by_default(),
            WidgetDescriptor::new("b", "B", 300, 200),
            WidgetDescriptor::new("c", "C", 300, 200),
        ])
    }
}

pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        demo_portlets: false,
        jwt: JwtConfig {
            secret: "test-secret".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// The application router plus handles on its in-memory stores.
pub struct TestApp {
    pub router: Router,
    pub users: Arc<MemoryUserConfigStore>,
    pub builds: Arc<MemoryBuildConfigStore>,
}

/// Build the full application with the production middleware stack, backed
/// by in-memory stores and [`SampleProvider`].
pub fn build_test_app() -> TestApp {
    let config = test_config();

    let mut registry = ProviderRegistry::new();
    registry.register(Arc::new(SampleProvider)).unwrap();

    let users = Arc::new(MemoryUserConfigStore::new());
    let builds = Arc::new(MemoryBuildConfigStore::new());
    let dashboard = MonitorDashboard::new(Arc::new(registry), users.clone(), builds.clone());

    let state = AppState {
        dashboard: Arc::new(dashboard),
        config: Arc::new(config.clone()),
    };

    TestApp {
        router: build_app_router(state, &config),
        users,
        builds,
    }
}

/// A valid bearer token for `user`.
pub fn token_for(user: &str) -> String {
    generate_access_token(user, &test_config().jwt).unwrap()
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
    token: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_as(app: &Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, Some(token)).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
