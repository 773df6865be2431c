//! HTTP request handlers

use axum::{
    extract::{
        rejection::{BytesRejection, QueryRejection},
        Query, State,
    },
    http::{header, HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use std::sync::Arc;
use subvtt_lib::{ConversionReport, SubtitleDocument, SubtitleFormat, WebVttDocument};

use crate::error::{Result, ServerError};
use crate::state::AppState;

/// Content type of converted documents
const VTT_CONTENT_TYPE: &str = "text/vtt; charset=utf-8";

/// Query parameters accepted by the conversion endpoints
#[derive(Debug, Default, Deserialize)]
pub struct ConvertParams {
    /// Source format hint: srt, subrip, ass, ssa, auto or unknown
    pub format: Option<String>,
}

impl ConvertParams {
    fn from_query(query: std::result::Result<Query<Self>, QueryRejection>) -> Result<Self> {
        query
            .map(|Query(params)| params)
            .map_err(|rejection| ServerError::BadRequest(rejection.body_text()))
    }

    /// The declared format, or `fallback` when no hint was sent
    pub fn declared_format(&self, fallback: SubtitleFormat) -> Result<SubtitleFormat> {
        match self.format.as_deref().map(str::trim) {
            None | Some("") => Ok(fallback),
            Some(hint) => Ok(hint.parse::<SubtitleFormat>()?),
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}

/// Version endpoint
pub async fn version_check() -> &'static str {
    concat!("subvtt-server v", env!("CARGO_PKG_VERSION"))
}

/// Conversion endpoint
/// POST /api/subtitles/convert?format=<hint>
pub async fn convert_subtitle(
    State(state): State<Arc<AppState>>,
    query: std::result::Result<Query<ConvertParams>, QueryRejection>,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Result<Response> {
    let (document, report) = convert_body(&state, query, body)
        .inspect_err(|e| state.metrics.record_error(e.kind()))?;

    if report.cue_count() == 0 && state.config.conversion.reject_empty {
        let err = ServerError::NoCues(report.format.to_string());
        state.metrics.record_error(err.kind());
        return Err(err);
    }

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(VTT_CONTENT_TYPE),
    );
    headers.insert(
        "X-Subtitle-Format",
        HeaderValue::from_static(report.format.name()),
    );
    headers.insert("X-Subtitle-Cues", HeaderValue::from(report.cue_count()));

    Ok((headers, document.into_string()).into_response())
}

/// Inspection endpoint, reports what a conversion keeps and skips
/// POST /api/subtitles/inspect?format=<hint>
pub async fn inspect_subtitle(
    State(state): State<Arc<AppState>>,
    query: std::result::Result<Query<ConvertParams>, QueryRejection>,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Result<Json<ConversionReport>> {
    let (_, report) = convert_body(&state, query, body)
        .inspect_err(|e| state.metrics.record_error(e.kind()))?;

    Ok(Json(report))
}

fn convert_body(
    state: &AppState,
    query: std::result::Result<Query<ConvertParams>, QueryRejection>,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Result<(WebVttDocument, ConversionReport)> {
    let body = body?;
    let params = ConvertParams::from_query(query)?;
    let format = params.declared_format(state.config.conversion.default_format)?;
    state.metrics.record_bytes_received(body.len() as u64);

    let (document, report) = SubtitleDocument::from_bytes(&body)
        .with_format(format)
        .convert_with_report();
    state.metrics.record_conversion(&report);

    tracing::debug!(
        "Converted {} bytes of {} into {} cues ({} skipped)",
        body.len(),
        report.format,
        report.cue_count(),
        report.skipped_count()
    );

    Ok((document, report))
}
