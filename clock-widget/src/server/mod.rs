use std::sync::Arc;

use axum::extract::{Query, RawQuery, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tracing::{error, info};

use crate::config::AppConfig;
use crate::embed::UrlGenerator;
use crate::error::{Result, WidgetError};
use crate::fonts::{fetch_font_list, FontList};
use crate::form::FormState;
use crate::params::WidgetConfig;
use crate::stylesheet::generate_css;

mod css;
mod inline_js;
mod page;
mod stream;
mod util;
mod widget;
mod ws;

/// Shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.font_timeout)
            .build()
            .map_err(|e| WidgetError::HttpClient(e.to_string()))?;
        Ok(Self { config, http })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(serve_configurator))
        .route("/ws", get(ws::serve_ws))
        .route("/widget/clock.html", get(serve_widget))
        .route("/widget/clock/stream", get(stream::serve_stream))
        .route("/api/fonts", get(serve_fonts))
        .route("/api/embed", get(serve_embed))
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn run_server(config: Arc<AppConfig>) -> Result<()> {
    let addr = config.addr();
    let app = router(AppState::new(config)?);

    eprintln!("clock widget server");
    eprintln!("  configurator: http://{addr}/");
    eprintln!("  widget:       http://{addr}/widget/clock.html");
    eprintln!("  embed api:    http://{addr}/api/embed");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}

// ── Route handlers ────────────────────────────────────────────────────

async fn serve_configurator() -> Html<String> {
    Html(page::build_configurator_page())
}

async fn serve_widget(RawQuery(query): RawQuery) -> Html<String> {
    let config = WidgetConfig::from_query(query.as_deref().unwrap_or_default());
    Html(widget::build_widget_page(&config))
}

async fn serve_fonts(
    State(state): State<AppState>,
) -> std::result::Result<Json<FontList>, (StatusCode, String)> {
    match fetch_font_list(&state.http, &state.config.font_list_url).await {
        Ok(fonts) => Ok(Json(FontList { fonts })),
        Err(e) => {
            error!("Error loading fonts: {e}");
            Err((StatusCode::BAD_GATEWAY, e.to_string()))
        }
    }
}

#[derive(Debug, Serialize)]
struct EmbedResponse {
    url: String,
    css: String,
}

/// Embed URL and CSS for form fields given as query parameters. The widget
/// URL is resolved against the request's own host.
async fn serve_embed(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(form): Query<FormState>,
) -> std::result::Result<Json<EmbedResponse>, (StatusCode, String)> {
    let host = headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| state.config.addr().to_string());
    let urls = UrlGenerator::new(&format!("http://{host}/"))
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    Ok(Json(EmbedResponse {
        url: urls.generate_url(&form),
        css: generate_css(&form),
    }))
}
