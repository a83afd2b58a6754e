use std::net::{IpAddr, SocketAddr};
use std::time::Instant;

use axum::{
    extract::{ConnectInfo, Request},
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Log every request with a short correlation id, its outcome and latency.
pub async fn request_logging(req: Request, next: Next) -> Response {
    let request_id = short_request_id();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let peer = remote_ip(&req).map(|ip| ip.to_string()).unwrap_or_else(|| "unknown".to_string());

    let span = tracing::info_span!("request", %request_id, %method, %path, remote_ip = %peer);

    async move {
        tracing::info!("request started");
        let started = Instant::now();

        let mut res = next.run(req).await;

        let elapsed_ms = started.elapsed().as_millis() as u64;
        let status = res.status().as_u16();
        tracing::info!(status, elapsed_ms, "request completed");

        if let Ok(value) = HeaderValue::from_str(&request_id) {
            res.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        res
    }
    .instrument(span)
    .await
}

/// Peer address, present when the server was started with connect info.
fn remote_ip(req: &Request) -> Option<IpAddr> {
    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
}

/// Last 8 hex chars of a v7 UUID (the random tail, not the timestamp head).
fn short_request_id() -> String {
    let simple = Uuid::now_v7().simple().to_string();
    simple[simple.len() - 8..].to_string()
}
