//! Voice HTTP Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::SpeechError;
use crate::infrastructure::http::dto::VoicesResponse;
use crate::infrastructure::http::error::ProxyError;
use crate::infrastructure::http::state::AppState;

/// 以服务端密钥拉取音色列表
pub async fn list_voices(
    State(state): State<Arc<AppState>>,
) -> Result<Json<VoicesResponse>, ProxyError> {
    let key = state
        .server_key
        .as_ref()
        .ok_or_else(|| ProxyError::Internal("Server API Key missing".to_string()))?;

    let voices = state
        .provider
        .list_voices(Some(key))
        .await
        .map_err(|e| match e {
            SpeechError::Upstream { .. } => ProxyError::from_speech(e, "Failed to fetch voices"),
            other => {
                tracing::error!(error = %other, "Voice list request failed");
                ProxyError::Internal("Failed to fetch voices".to_string())
            }
        })?;

    tracing::info!(voices = voices.len(), "Voices proxied");
    Ok(Json(VoicesResponse { voices }))
}
