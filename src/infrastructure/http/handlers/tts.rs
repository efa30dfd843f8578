//! TTS HTTP Handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;

use crate::domain::synthesis::{build, ExecutionMode, GenerationRequest};
use crate::infrastructure::http::dto::{TtsRequest, TtsResponse};
use crate::infrastructure::http::error::ProxyError;
use crate::infrastructure::http::state::AppState;

/// 代理合成
///
/// 请求体经同一个构建器生成提供方请求体，再以服务端密钥转发
pub async fn synthesize(
    State(state): State<Arc<AppState>>,
    body: Result<Json<TtsRequest>, JsonRejection>,
) -> Result<Json<TtsResponse>, ProxyError> {
    let key = state
        .server_key
        .as_ref()
        .ok_or_else(|| ProxyError::Internal("Server API key not configured.".to_string()))?;

    let Json(body) = body.map_err(|e| ProxyError::BadRequest(e.body_text()))?;

    let text = body
        .text
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ProxyError::BadRequest("Text is required.".to_string()))?;

    let request = GenerationRequest::new(text, body.voice_settings.into_settings());
    if state.limits.enforce {
        request
            .ensure_within(state.limits.max_text_chars)
            .map_err(|e| ProxyError::BadRequest(e.to_string()))?;
    }

    let plan = build(&request, ExecutionMode::BackendProxy)
        .map_err(|e| ProxyError::BadRequest(e.to_string()))?;

    tracing::debug!(
        text_len = request.text.len(),
        voice = %plan.voice_name(),
        "Proxying synthesize request"
    );

    let audio_content = state
        .provider
        .synthesize(&plan.payload, Some(key))
        .await
        .map_err(|e| ProxyError::from_speech(e, "Failed to generate speech"))?;

    Ok(Json(TtsResponse {
        audio_content,
        message: "Success".to_string(),
    }))
}
