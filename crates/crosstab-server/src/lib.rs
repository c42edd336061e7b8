//! HTTP layer for the crosstab test engine.
//!
//! One operation does the work: POST `/` runs a test and returns the wire
//! record. The rest is service plumbing: a JSON API index on GET `/`, a
//! liveness endpoint, permissive CORS for browser clients, and the mapping
//! of the engine's error taxonomy onto 400/500 responses.

use axum::{
    Router,
    body::Bytes,
    http::StatusCode,
    response::Json,
    routing::get,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;

use crosstab_core::{EngineError, TestRequest, dispatch, sanitize};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Listen address configuration, environment-driven.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
}

impl Config {
    pub const DEFAULT_HOST: &'static str = "127.0.0.1";
    pub const DEFAULT_PORT: u16 = 5001;

    /// Read `CROSSTAB_HOST` and `CROSSTAB_PORT`, falling back to the
    /// defaults. An unparseable port is logged and replaced, not fatal.
    pub fn from_env() -> Self {
        let host = std::env::var("CROSSTAB_HOST")
            .unwrap_or_else(|_| Self::DEFAULT_HOST.to_string());
        let port = match std::env::var("CROSSTAB_PORT") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                log::warn!(
                    "ignoring unparseable CROSSTAB_PORT {raw:?}, using {}",
                    Self::DEFAULT_PORT
                );
                Self::DEFAULT_PORT
            }),
            Err(_) => Self::DEFAULT_PORT,
        };
        Config { host, port }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: Self::DEFAULT_HOST.to_string(),
            port: Self::DEFAULT_PORT,
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST `/`: run a hypothesis test.
///
/// The body is decoded by hand rather than through an extractor so that
/// malformed JSON, a non-object document, and an empty object all produce
/// the same malformed-payload record instead of a framework error page.
async fn handle_test(body: Bytes) -> (StatusCode, Json<serde_json::Value>) {
    let request = match parse_request(&body) {
        Ok(request) => request,
        Err(response) => return response,
    };

    log::info!(
        "received request: testType={:?} subtype={:?}",
        request.test_type.as_deref().unwrap_or(""),
        request.subtype.as_deref().unwrap_or("")
    );

    match dispatch(&request).and_then(|report| sanitize::to_wire(&report)) {
        Ok(wire) => (StatusCode::OK, Json(wire)),
        Err(err) => error_response(&err),
    }
}

fn parse_request(body: &[u8]) -> Result<TestRequest, (StatusCode, Json<serde_json::Value>)> {
    let value: serde_json::Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(_) => return Err(malformed_payload()),
    };
    let populated_object = value.as_object().is_some_and(|map| !map.is_empty());
    if !populated_object {
        return Err(malformed_payload());
    }
    serde_json::from_value(value)
        .map_err(|e| error_response(&EngineError::Validation(e.to_string())))
}

fn malformed_payload() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "message": "Invalid JSON payload" })),
    )
}

/// Engine taxonomy to transport status: internal failures are 500,
/// everything else is the caller's mistake.
fn error_response(err: &EngineError) -> (StatusCode, Json<serde_json::Value>) {
    let status = if err.is_internal() {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::BAD_REQUEST
    };
    (status, Json(err.to_wire()))
}

/// GET `/`: API index with a copy-pasteable example.
async fn handle_index() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "Crosstab Server",
        "version": crosstab_core::VERSION,
        "endpoints": {
            "POST /": {
                "description": "Run a categorical hypothesis test",
                "testType": crosstab_core::TEST_FAMILY,
                "subtypes": crosstab_core::SUBTYPES,
            },
            "GET /health": "Liveness check",
        },
        "example": {
            "testType": "chi-square",
            "subtype": "independence",
            "observed": [[30, 10], [20, 40]],
            "rowLabels": ["Code A", "Code B"],
            "colLabels": ["Doc 1", "Doc 2"],
        },
    }))
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

/// GET `/health`: liveness check.
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "crosstab-server",
        version: crosstab_core::VERSION,
    })
}

// ---------------------------------------------------------------------------
// Router and entry point
// ---------------------------------------------------------------------------

fn build_router() -> Router {
    Router::new()
        .route("/", get(handle_index).post(handle_test))
        .route("/health", get(handle_health))
        .layer(CorsLayer::permissive())
}

/// Run the HTTP server until the process is stopped.
pub async fn run_server(host: &str, port: u16) {
    let app = build_router();
    let addr = format!("{host}:{port}");
    log::info!("listening on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
