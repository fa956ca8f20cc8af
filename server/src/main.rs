use axum::extract::MatchedPath;
use axum::http::Request;
use std::env;
use tower_http::trace::TraceLayer;
use tracing::Span;

use larder_server::auth::SessionStore;
use larder_server::config::Config;
use larder_server::{api, db, telemetry, AppState};

#[tokio::main]
async fn main() {
    // Check for --openapi flag to dump spec and exit
    if env::args().any(|arg| arg == "--openapi") {
        let spec = api::openapi().to_pretty_json().unwrap();
        println!("{}", spec);
        return;
    }

    telemetry::init();

    let config = Config::from_env();

    let pool = db::create_pool(&config.database_url);
    let sessions = SessionStore::new(config.session_ttl_days);
    let state = AppState { pool, sessions };

    let app = larder_server::app(state).layer(
        TraceLayer::new_for_http()
            .make_span_with(|request: &Request<_>| {
                let matched_path = request
                    .extensions()
                    .get::<MatchedPath>()
                    .map(MatchedPath::as_str)
                    .unwrap_or(request.uri().path());

                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    path = %matched_path,
                )
            })
            .on_request(|_request: &Request<_>, _span: &Span| {})
            .on_response(
                |response: &axum::http::Response<_>, latency: std::time::Duration, _span: &Span| {
                    let status = response.status().as_u16();
                    if status >= 500 {
                        tracing::error!(
                            status = %status,
                            latency_ms = %latency.as_millis(),
                            "request failed with server error"
                        );
                    } else {
                        tracing::info!(
                            status = %status,
                            latency_ms = %latency.as_millis(),
                            "request completed"
                        );
                    }
                },
            )
            .on_failure(
                |error: tower_http::classify::ServerErrorsFailureClass,
                 latency: std::time::Duration,
                 _span: &Span| {
                    tracing::error!(
                        error = %error,
                        latency_ms = %latency.as_millis(),
                        "request failed"
                    );
                },
            ),
    );

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await.unwrap();

    tracing::info!("Server listening on {}", listener.local_addr().unwrap());
    tracing::info!("Sessions expire after {} days", config.session_ttl_days);
    tracing::info!("Swagger UI available at /swagger-ui/");
    tracing::info!("OpenAPI spec available at /api-docs/openapi.json");

    axum::serve(listener, app).await.unwrap();
}
