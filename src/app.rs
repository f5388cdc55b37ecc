use std::net::SocketAddr;

use anyhow::Context;
use axum::{
    http::{HeaderValue, Request, Response},
    Router,
};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{AppConfig, MockConfig};
use crate::state::{AppState, MockState};
use crate::{analysis, mock};

pub fn build_analysis_app(state: AppState) -> Router {
    with_tracing(
        analysis::router()
            .with_state(state)
            .layer(CorsLayer::permissive()),
    )
}

pub fn build_mock_app(state: MockState, config: &MockConfig) -> anyhow::Result<Router> {
    let cors = mock_cors(&config.allowed_origins)?;
    Ok(with_tracing(mock::router().with_state(state).layer(cors)))
}

/// Browser dev servers only; credentials on, so methods and headers are mirrored instead of `*`.
fn mock_cors(origins: &[String]) -> anyhow::Result<CorsLayer> {
    if origins.iter().any(|o| o == "*") {
        anyhow::bail!("MOCK_ALLOWED_ORIGINS cannot contain '*' while credentials are allowed");
    }
    let origins = origins
        .iter()
        .map(|o| {
            o.parse::<HeaderValue>()
                .with_context(|| format!("invalid CORS origin {:?}", o))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request()))
}

fn with_tracing(router: Router) -> Router {
    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(|req: &Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                tracing::info_span!("http_request", %method, uri = %uri, status = tracing::field::Empty)
            })
            .on_response(
                |res: &Response<_>, latency: std::time::Duration, span: &tracing::Span| {
                    let status = res.status();
                    span.record("status", tracing::field::display(status));
                    let latency_ms = latency.as_millis() as u64;
                    if status.is_server_error() {
                        tracing::error!(%status, latency_ms, "response");
                    } else {
                        tracing::info!(%status, latency_ms, "response");
                    }
                },
            ),
    )
}

/// `RUST_LOG` filters, `LOG_FORMAT=json` switches to JSON lines.
pub fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "aury_backend=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let fmt = tracing_subscriber::fmt().with_env_filter(env_filter);
    if json_logs {
        fmt.with_target(false).json().init();
    } else {
        fmt.init();
    }
}

pub async fn serve(app: Router, config: &AppConfig) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("invalid bind address {}:{}", config.host, config.port))?;

    tracing::info!(mode = ?config.mode, "listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
