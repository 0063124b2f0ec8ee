//! HTTP validation service for name-kana form fields.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State},
    response::IntoResponse,
    routing::{get, post},
};
use kanaval_engine::{
    KatakanaValidation, ValidationOptions, half_to_full_katakana, hiragana_to_katakana,
    is_full_katakana, is_half_katakana, is_katakana, normalize_to_katakana, validate_katakana,
};
use serde::{Deserialize, Serialize};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::settings::Settings;

#[derive(Clone)]
struct AppState {
    /// Options used when a request leaves them out
    defaults: Arc<ValidationOptions>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ValidateRequest {
    #[serde(default)]
    text: Option<String>,
    #[serde(default, alias = "allow_half_width")]
    allow_half_width: Option<bool>,
    #[serde(default, alias = "auto_normalize")]
    auto_normalize: Option<bool>,
}

#[derive(Debug, Default, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum NormalizeMode {
    /// Hiragana and half-width katakana to full-width katakana
    #[default]
    Full,
    /// Hiragana to katakana only
    Hiragana,
    /// Half-width to full-width katakana only
    Half,
}

#[derive(Debug, Deserialize)]
struct NormalizeRequest {
    text: String,
    #[serde(default)]
    mode: NormalizeMode,
}

#[derive(Debug, Serialize)]
struct NormalizeResponse {
    input: String,
    output: String,
}

#[derive(Debug, Deserialize)]
struct ClassifyRequest {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ClassifyResponse {
    is_full_katakana: bool,
    is_half_katakana: bool,
    is_katakana: bool,
}

/// Build the service router from loaded settings.
pub fn router(settings: &Settings) -> Router {
    let state = AppState {
        defaults: Arc::new(settings.validation),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/validate", post(validate_handler))
        .route("/api/normalize", post(normalize_handler))
        .route("/api/classify", post(classify_handler))
        .route("/health", get(health_handler))
        .layer(DefaultBodyLimit::max(settings.server.body_limit_bytes()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn validate_handler(
    State(state): State<AppState>,
    Json(req): Json<ValidateRequest>,
) -> Json<KatakanaValidation> {
    let options = ValidationOptions {
        allow_half_width: req.allow_half_width.unwrap_or(state.defaults.allow_half_width),
        auto_normalize: req.auto_normalize.unwrap_or(state.defaults.auto_normalize),
    };
    let result = validate_katakana(req.text.as_deref(), &options);
    tracing::debug!(
        "validate: text={:?}, valid={}, options={:?}",
        req.text,
        result.is_valid,
        options
    );
    Json(result)
}

async fn normalize_handler(Json(req): Json<NormalizeRequest>) -> Json<NormalizeResponse> {
    let output = match req.mode {
        NormalizeMode::Full => normalize_to_katakana(&req.text),
        NormalizeMode::Hiragana => hiragana_to_katakana(&req.text),
        NormalizeMode::Half => half_to_full_katakana(&req.text),
    };
    Json(NormalizeResponse {
        input: req.text,
        output,
    })
}

async fn classify_handler(Json(req): Json<ClassifyRequest>) -> Json<ClassifyResponse> {
    Json(ClassifyResponse {
        is_full_katakana: is_full_katakana(&req.text),
        is_half_katakana: is_half_katakana(&req.text),
        is_katakana: is_katakana(&req.text),
    })
}

async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "kanaval"
    }))
}
