//! Prometheus-compatible metrics endpoint

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::fmt::Write;
use std::sync::Arc;
use std::time::{Duration, Instant};
use subvtt_lib::{ConversionReport, SubtitleFormat};

use crate::state::AppState;

/// Metrics collector
#[derive(Debug)]
pub struct Metrics {
    /// Server start time
    start_time: Instant,
    /// Total requests processed
    request_count: RwLock<u64>,
    /// Requests by endpoint
    requests_by_endpoint: RwLock<BTreeMap<String, u64>>,
    /// Conversions by detected or declared source format
    conversions_by_format: RwLock<BTreeMap<SubtitleFormat, u64>>,
    /// Cues written to WebVTT output
    cues_emitted: RwLock<u64>,
    /// Blocks and dialogue rows dropped during parsing
    items_skipped: RwLock<u64>,
    /// Total request body bytes received
    bytes_received: RwLock<u64>,
    /// Total bytes served
    bytes_served: RwLock<u64>,
    /// Errors by type
    errors_by_type: RwLock<BTreeMap<String, u64>>,
}

impl Metrics {
    /// Create new metrics collector
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            request_count: RwLock::new(0),
            requests_by_endpoint: RwLock::new(BTreeMap::new()),
            conversions_by_format: RwLock::new(BTreeMap::new()),
            cues_emitted: RwLock::new(0),
            items_skipped: RwLock::new(0),
            bytes_received: RwLock::new(0),
            bytes_served: RwLock::new(0),
            errors_by_type: RwLock::new(BTreeMap::new()),
        }
    }

    /// Record a request
    pub fn record_request(&self, endpoint: &str) {
        *self.request_count.write() += 1;
        *self
            .requests_by_endpoint
            .write()
            .entry(endpoint.to_string())
            .or_insert(0) += 1;
    }

    /// Record a finished conversion
    pub fn record_conversion(&self, report: &ConversionReport) {
        *self
            .conversions_by_format
            .write()
            .entry(report.format)
            .or_insert(0) += 1;
        *self.cues_emitted.write() += report.cue_count() as u64;
        *self.items_skipped.write() += report.skipped_count() as u64;
    }

    /// Record bytes received
    pub fn record_bytes_received(&self, bytes: u64) {
        *self.bytes_received.write() += bytes;
    }

    /// Record bytes served
    pub fn record_bytes(&self, bytes: u64) {
        *self.bytes_served.write() += bytes;
    }

    /// Record error
    pub fn record_error(&self, error_type: &str) {
        *self
            .errors_by_type
            .write()
            .entry(error_type.to_string())
            .or_insert(0) += 1;
    }

    /// Get uptime in seconds
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Export metrics in Prometheus format
    pub fn export_prometheus(&self) -> String {
        let mut output = String::new();

        push_metric(
            &mut output,
            "subvtt_server_uptime_seconds",
            "Server uptime in seconds",
            "counter",
            self.uptime_secs(),
        );
        push_metric(
            &mut output,
            "subvtt_server_start_time_seconds",
            "Server start time as Unix timestamp",
            "gauge",
            std::time::SystemTime::UNIX_EPOCH
                .elapsed()
                .unwrap_or(Duration::ZERO)
                .as_secs()
                .saturating_sub(self.uptime_secs()),
        );

        // Request metrics
        push_metric(
            &mut output,
            "subvtt_requests_total",
            "Total number of HTTP requests",
            "counter",
            *self.request_count.read(),
        );
        push_header(
            &mut output,
            "subvtt_requests_by_endpoint",
            "Requests by endpoint",
            "counter",
        );
        for (endpoint, count) in self.requests_by_endpoint.read().iter() {
            let _ = writeln!(
                output,
                "subvtt_requests_by_endpoint{{endpoint=\"{}\"}} {}",
                endpoint, count
            );
        }

        // Conversion metrics
        push_header(
            &mut output,
            "subvtt_conversions_total",
            "Conversions by source format",
            "counter",
        );
        for (format, count) in self.conversions_by_format.read().iter() {
            let _ = writeln!(
                output,
                "subvtt_conversions_total{{format=\"{}\"}} {}",
                format, count
            );
        }
        push_metric(
            &mut output,
            "subvtt_cues_emitted_total",
            "Total cues written to WebVTT output",
            "counter",
            *self.cues_emitted.read(),
        );
        push_metric(
            &mut output,
            "subvtt_items_skipped_total",
            "Total subtitle blocks or dialogue rows skipped",
            "counter",
            *self.items_skipped.read(),
        );

        // Traffic
        push_metric(
            &mut output,
            "subvtt_bytes_received_total",
            "Total request body bytes received",
            "counter",
            *self.bytes_received.read(),
        );
        push_metric(
            &mut output,
            "subvtt_bytes_served_total",
            "Total bytes served",
            "counter",
            *self.bytes_served.read(),
        );

        // Error metrics
        push_header(
            &mut output,
            "subvtt_errors_total",
            "Total errors by type",
            "counter",
        );
        for (error_type, count) in self.errors_by_type.read().iter() {
            let _ = writeln!(
                output,
                "subvtt_errors_total{{type=\"{}\"}} {}",
                error_type, count
            );
        }

        output
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

fn push_header(output: &mut String, name: &str, help: &str, kind: &str) {
    if !output.is_empty() {
        output.push('\n');
    }
    let _ = writeln!(output, "# HELP {} {}", name, help);
    let _ = writeln!(output, "# TYPE {} {}", name, kind);
}

fn push_metric(output: &mut String, name: &str, help: &str, kind: &str, value: u64) {
    push_header(output, name, help, kind);
    let _ = writeln!(output, "{} {}", name, value);
}

/// Metrics endpoint handler
pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> Response {
    let prometheus_output = state.metrics.export_prometheus();

    (
        StatusCode::OK,
        [("Content-Type", "text/plain; version=0.0.4")],
        prometheus_output,
    )
        .into_response()
}
