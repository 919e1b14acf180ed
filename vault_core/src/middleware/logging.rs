//! Request logging middleware configuration

use http::{Request, Response};
use std::fmt::Display;
use std::time::Duration;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{
    DefaultOnBodyChunk, DefaultOnEos, DefaultOnRequest, MakeSpan, OnFailure, OnResponse,
    TraceLayer,
};
use tracing::{info_span, Span};

pub type VaultTraceLayer = TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    RequestSpan,
    DefaultOnRequest,
    LogResponse,
    DefaultOnBodyChunk,
    DefaultOnEos,
    LogFailure,
>;

pub fn logging_layer() -> VaultTraceLayer {
    TraceLayer::new_for_http()
        .make_span_with(RequestSpan)
        .on_response(LogResponse)
        .on_failure(LogFailure)
}

#[derive(Debug, Clone, Copy)]
pub struct RequestSpan;

impl<B> MakeSpan<B> for RequestSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        info_span!(
            "http_request",
            method = %request.method(),
            path = %request.uri().path(),
            query = ?request.uri().query(),
        )
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LogResponse;

impl<B> OnResponse<B> for LogResponse {
    fn on_response(self, response: &Response<B>, latency: Duration, _span: &Span) {
        let status = response.status().as_u16();
        let latency_ms = latency.as_millis() as u64;

        if response.status().is_success() {
            tracing::info!(status, latency_ms, "request completed");
        } else if response.status().is_client_error() {
            tracing::warn!(status, latency_ms, "client error response");
        } else {
            tracing::error!(status, latency_ms, "server error response");
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LogFailure;

impl<F: Display> OnFailure<F> for LogFailure {
    fn on_failure(&mut self, failure: F, latency: Duration, _span: &Span) {
        tracing::error!(latency_ms = latency.as_millis() as u64, error = %failure, "request failed");
    }
}
