use crate::portfolio::PortfolioData;
use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::{
    cmp::Ordering,
    path::PathBuf,
    sync::atomic::{AtomicU64, Ordering as AtomicOrdering},
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};
use tower_http::services::{ServeDir, ServeFile};

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_STATIC_DIR: &str = "dist";
const DEFAULT_RESUME_PATH: &str = "static/resume/resume.pdf";
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;
const PORT_BOUNDS: (u16, u16) = (1, u16::MAX);
const REQUEST_ID_HEADER: &str = "x-request-id";

static REQUEST_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LogLevel {
    Debug,
    Info,
}

impl PartialOrd for LogLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LogLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        fn rank(level: LogLevel) -> u8 {
            match level {
                LogLevel::Debug => 0,
                LogLevel::Info => 1,
            }
        }

        rank(*self).cmp(&rank(*other))
    }
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
        }
    }
}

#[derive(Clone)]
struct ServerConfig {
    port: u16,
    static_dir: PathBuf,
    resume_path: PathBuf,
    resume_owner: String,
    log_level: LogLevel,
}

impl ServerConfig {
    fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let port = non_empty("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .filter(|value| (PORT_BOUNDS.0..=PORT_BOUNDS.1).contains(value))
            .unwrap_or(DEFAULT_PORT);
        let log_level = match non_empty("LOG_LEVEL")
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.as_str().to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "debug" => LogLevel::Debug,
            "info" => LogLevel::Info,
            _ => DEFAULT_LOG_LEVEL,
        };

        Self {
            port,
            static_dir: PathBuf::from(
                non_empty("STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string()),
            ),
            resume_path: PathBuf::from(
                non_empty("RESUME_PATH").unwrap_or_else(|| DEFAULT_RESUME_PATH.to_string()),
            ),
            resume_owner: non_empty("PORTFOLIO_NAME").unwrap_or_else(|| "Resume".to_string()),
            log_level,
        }
    }
}

#[derive(Clone)]
struct AppState {
    portfolio: Arc<PortfolioData>,
    config: ServerConfig,
}

#[derive(Serialize)]
struct ErrorPayload {
    ok: bool,
    error: String,
}

impl ErrorPayload {
    fn new(message: &str) -> Self {
        Self {
            ok: false,
            error: message.to_string(),
        }
    }
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env();
    let portfolio = PortfolioData::from_lookup(|name| std::env::var(name).ok());
    let bind_address = format!("0.0.0.0:{}", config.port);

    log_event(
        &config,
        LogLevel::Info,
        "portfolio_loaded",
        serde_json::json!({
            "skills": portfolio.skills.len(),
            "projects": portfolio.projects.len(),
            "achievements": portfolio.achievements.len(),
            "interests": portfolio.interests.len(),
        }),
    );

    let app = router(AppState {
        portfolio: Arc::new(portfolio),
        config: config.clone(),
    });

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    log_event(
        &config,
        LogLevel::Info,
        "server_listening",
        serde_json::json!({ "address": format!("http://127.0.0.1:{}", config.port) }),
    );
    axum::serve(listener, app).await?;
    Ok(())
}

/// API routes in front of the built page. Every response, static files
/// included, carries `x-request-id`.
fn router(state: AppState) -> Router {
    let static_dir = &state.config.static_dir;
    let static_service =
        ServeDir::new(static_dir).not_found_service(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .route("/api/portfolio", get(get_portfolio))
        .route("/download-resume", get(download_resume))
        .fallback_service(static_service)
        .layer(middleware::from_fn(stamp_request_id))
        .with_state(state)
}

/// Reuses the caller's request id or mints one, hands it to the handler
/// through the request headers and echoes it on the response.
async fn stamp_request_id(mut request: Request, next: Next) -> Response {
    let request_id = HeaderValue::from_str(&resolve_request_id(request.headers())).ok();
    if let Some(value) = &request_id {
        request.headers_mut().insert(REQUEST_ID_HEADER, value.clone());
    }

    let mut response = next.run(request).await;
    if let Some(value) = request_id {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

async fn get_portfolio(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    let request_id = resolve_request_id(&headers);
    log_event(
        &state.config,
        LogLevel::Debug,
        "portfolio_request",
        serde_json::json!({ "requestId": request_id }),
    );

    (
        [(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"))],
        Json(state.portfolio.as_ref().clone()),
    )
        .into_response()
}

async fn download_resume(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    let request_id = resolve_request_id(&headers);

    let bytes = match tokio::fs::read(&state.config.resume_path).await {
        Ok(bytes) => bytes,
        Err(error) => {
            log_event(
                &state.config,
                LogLevel::Info,
                "resume_missing",
                serde_json::json!({
                    "requestId": request_id,
                    "path": state.config.resume_path.display().to_string(),
                    "error": error.to_string(),
                }),
            );
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorPayload::new("resume not found")),
            )
                .into_response();
        }
    };

    let file_name = resume_file_name(&state.config.resume_owner);
    let mut response_headers = HeaderMap::new();
    response_headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/pdf"),
    );
    if let Ok(disposition) = HeaderValue::from_str(&content_disposition(&file_name)) {
        response_headers.insert(header::CONTENT_DISPOSITION, disposition);
    }

    log_event(
        &state.config,
        LogLevel::Info,
        "resume_download",
        serde_json::json!({ "requestId": request_id, "bytes": bytes.len() }),
    );
    (StatusCode::OK, response_headers, Body::from(bytes)).into_response()
}

/// `Jane Doe` becomes `Jane_Doe_Resume.pdf`. A blank name falls back to the
/// plain `Resume` stem. Quotes and control characters are dropped; anything
/// else, non-ASCII included, is kept.
fn resume_file_name(name: &str) -> String {
    let stem: String = name
        .trim()
        .replace(' ', "_")
        .chars()
        .filter(|character| !character.is_control() && *character != '"')
        .collect();
    let stem = if stem.is_empty() { "Resume".to_string() } else { stem };
    format!("{stem}_Resume.pdf")
}

/// An ASCII `filename` for old clients plus the exact UTF-8 name as
/// `filename*` (RFC 6266).
fn content_disposition(file_name: &str) -> String {
    let ascii: String = file_name.chars().filter(char::is_ascii).collect();
    format!(
        "attachment; filename=\"{ascii}\"; filename*=UTF-8''{}",
        urlencoding::encode(file_name)
    )
}

fn now_unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_millis())
        .unwrap_or(0)
}

fn now_unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_secs())
        .unwrap_or(0)
}

fn generate_request_id() -> String {
    let counter = REQUEST_ID_COUNTER.fetch_add(1, AtomicOrdering::Relaxed);
    format!("req-{}-{counter}", now_unix_millis())
}

fn resolve_request_id(headers: &HeaderMap) -> String {
    let value = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|raw| raw.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string);

    value.unwrap_or_else(generate_request_id)
}

fn log_event(config: &ServerConfig, level: LogLevel, event: &str, fields: serde_json::Value) {
    if level < config.log_level {
        return;
    }

    let mut payload = serde_json::Map::new();
    payload.insert(
        "ts".to_string(),
        serde_json::Value::Number(serde_json::Number::from(now_unix_seconds())),
    );
    payload.insert("level".to_string(), serde_json::Value::String(level.as_str().to_string()));
    payload.insert("event".to_string(), serde_json::Value::String(event.to_string()));

    if let serde_json::Value::Object(extra) = fields {
        for (key, value) in extra {
            payload.insert(key, value);
        }
    }

    println!("{}", serde_json::Value::Object(payload));
}
