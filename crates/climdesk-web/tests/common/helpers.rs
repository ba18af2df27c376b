//! Router and mock-backend helpers

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use climdesk_core::Config;
use climdesk_web::build_app;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const STATION_LIST: &str = "/api/weather-station-requests";
pub const HISTORICAL_LIST: &str = "/api/historical-data-requests";
pub const SECONDARY_LIST: &str = "/api/secondary-data-requests";

/// Configuration pointing every source at `server`
pub fn config_for(server: &MockServer) -> Config {
    let mut config = Config::default();
    for source in [
        &mut config.sources.station,
        &mut config.sources.historical,
        &mut config.sources.secondary,
    ] {
        source.base_url = server.uri();
    }
    config.auth.token = Some("test-token".to_string());
    config.http.timeout_secs = 5;
    config
}

/// Router wired to `server`
pub fn app_for(server: &MockServer) -> Router {
    build_app(config_for(server)).expect("app builds")
}

/// Serve `body` for GET `list_path`
pub async fn mount_list(server: &MockServer, list_path: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(list_path))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Send a request and collect status, location header and body text
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Option<String>, String) {
    let response = app.clone().oneshot(request).await.expect("router responds");
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body collects");
    (status, location, String::from_utf8_lossy(&bytes).into_owned())
}

/// GET `uri`
pub async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let request = Request::get(uri).body(Body::empty()).expect("valid request");
    let (status, _, body) = send(app, request).await;
    (status, body)
}

/// GET `uri` and parse the JSON body
pub async fn get_json<T: DeserializeOwned>(app: &Router, uri: &str) -> (StatusCode, T) {
    let (status, body) = get(app, uri).await;
    let parsed = serde_json::from_str(&body).unwrap_or_else(|e| panic!("invalid JSON ({e}): {body}"));
    (status, parsed)
}

/// POST a urlencoded form
pub async fn post_form(app: &Router, uri: &str, form: &str) -> (StatusCode, Option<String>, String) {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .expect("valid request");
    send(app, request).await
}

/// POST a JSON body
pub async fn post_json(app: &Router, uri: &str, body: &Value) -> (StatusCode, String) {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request");
    let (status, _, body) = send(app, request).await;
    (status, body)
}
