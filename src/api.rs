//! HTTP surface of the converter service
//!
//! Three routes: a root descriptor, a schema-checked convert endpoint, and a
//! raw convert endpoint that accepts any JSON value. Both convert endpoints
//! share the renderer in [`crate::render`]; they differ only in how much
//! top-level validation happens before it runs.

use std::collections::BTreeMap;

use axum::{
    Router,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::VERSION;
use crate::error::RenderError;
use crate::render::{self, Rendered};

/// Human-readable service name reported by the root endpoint
const SERVICE_NAME: &str = "Weather JSON to Text Converter";

/// Static service descriptor returned by `GET /`
#[derive(Serialize)]
pub struct ApiInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub endpoints: BTreeMap<&'static str, &'static str>,
}

/// Top-level shape of an OpenWeatherMap 5-day forecast payload.
///
/// Only the outer structure is checked here (`city` must be a mapping,
/// `list` a sequence); field extraction and fallbacks happen in the
/// renderer. A mismatch is rejected by the `Json` extractor before the
/// handler runs.
#[derive(Debug, Deserialize)]
pub struct WeatherPayload {
    pub city: Map<String, Value>,
    pub list: Vec<Value>,
}

/// Error body shape shared by both convert endpoints
#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

impl IntoResponse for RenderError {
    fn into_response(self) -> Response {
        let status = if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            tracing::warn!(error = %self, "failed to render weather payload");
            StatusCode::INTERNAL_SERVER_ERROR
        };

        (
            status,
            Json(ErrorBody {
                detail: self.to_string(),
            }),
        )
            .into_response()
    }
}

pub fn router() -> Router {
    Router::new()
        .route("/", get(root))
        .route("/convert", post(convert))
        .route("/convert-raw", post(convert_raw))
}

/// `GET /` - service name, version and available operations
async fn root() -> Json<ApiInfo> {
    let mut endpoints = BTreeMap::new();
    endpoints.insert("POST /convert", "Convert weather JSON to plain text");

    Json(ApiInfo {
        name: SERVICE_NAME,
        version: VERSION,
        endpoints,
    })
}

/// `POST /convert` - render a payload whose top-level shape was validated
/// by the extractor
async fn convert(Json(payload): Json<WeatherPayload>) -> Result<Json<Rendered>, RenderError> {
    let rendered = render::render_forecast(&payload.city, &payload.list)?;
    tracing::debug!(entries = payload.list.len(), "rendered forecast payload");
    Ok(Json(rendered))
}

/// `POST /convert-raw` - render an arbitrary JSON value, extracting the
/// top-level structure defensively
async fn convert_raw(Json(payload): Json<Value>) -> Result<Json<Rendered>, RenderError> {
    let rendered = render::render(&payload)?;
    tracing::debug!("rendered raw forecast payload");
    Ok(Json(rendered))
}
