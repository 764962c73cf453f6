use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing::get};
use clap::Parser;
use codesearch::config::parse_listen_addr;
use codesearch::error::ApiError;
use codesearch::search::types::{HealthResponse, SearchParams};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::EnvFilter;


#[derive(Debug, Parser)]
#[command(name = "gateway", about = "Public API in front of searchd")]
struct Args {
    #[arg(long, env = "GATEWAY_ADDR", default_value = "0.0.0.0:8080")]
    addr: String,

    #[arg(long, env = "SEARCHD_URL", default_value = "http://localhost:8090")]
    searchd_url: String,
}

#[derive(Clone)]
struct AppState {
    searchd_url: String,
    client: reqwest::Client,
}

impl AppState {
    fn new(searchd_url: &str) -> Self {
        Self {
            searchd_url: searchd_url.trim().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let bind_addr = parse_listen_addr(&args.addr)?;
    let state = AppState::new(&args.searchd_url);

    tracing::info!(
        "gateway listening on {} (SEARCHD_URL={})",
        bind_addr,
        state.searchd_url
    );
    let app = app(state);
    axum::serve(tokio::net::TcpListener::bind(bind_addr).await?, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    Ok(())
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/healthz", get(api_healthz))
        .route("/api/search", get(api_search).options(api_preflight))
        .with_state(state)
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET,POST,OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type,Authorization"),
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

async fn api_healthz() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

async fn api_preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// Relays `q` to searchd and passes status and body through untouched.
async fn api_search(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, ApiError> {
    let params = SearchParams::from_pairs(&pairs);
    let url = format!("{}/search", state.searchd_url);
    let resp = state
        .client
        .get(url)
        .query(&[("q", params.q.as_str())])
        .send()
        .await
        .map_err(|e| {
            tracing::warn!("searchd unreachable: {}", e);
            ApiError::Upstream(e.to_string())
        })?;

    let status = StatusCode::from_u16(resp.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    let body = resp
        .bytes()
        .await
        .map_err(|e| ApiError::Upstream(e.to_string()))?;

    Ok((
        status,
        [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        Body::from(body),
    )
        .into_response())
}
