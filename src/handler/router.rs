//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method check, health probe
//! interception, then static file serving. Writes one access line per request.

use crate::config::AppState;
use crate::handler::static_files;
use crate::http::{self, path};
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::{REFERER, USER_AGENT};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Request targets answered with the liveness response instead of a file
pub const HEALTH_PATHS: [&str; 3] = ["/health", "/healthz", "/_health"];

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method().clone();
    let target = req
        .uri()
        .path_and_query()
        .map_or_else(|| req.uri().path().to_string(), ToString::to_string);

    let mut response = route_request(&method, &target, &state).await;
    http::stamp_response(&mut response, &state.settings.http.server_name);

    if state.settings.logging.access_log {
        let mut entry = AccessLogEntry::new(peer_addr.ip().to_string(), method.to_string(), target);
        entry.version = format!("{:?}", req.version());
        entry.status = response.status().as_u16();
        entry.body_bytes = response.body().size_hint().exact().unwrap_or(0);
        entry.referer = header_string(&req, REFERER);
        entry.user_agent = header_string(&req, USER_AGENT);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.settings.logging.access_log_format);
    }

    Ok(response)
}

fn header_string<B>(req: &Request<B>, name: hyper::header::HeaderName) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

/// Whether the raw request target is one of the health aliases. The query is
/// part of the comparison: `/healthz?x=1` is a file lookup.
pub fn is_health_target(target: &str) -> bool {
    HEALTH_PATHS.contains(&target)
}

/// Route request by method and target
async fn route_request(method: &Method, target: &str, state: &AppState) -> Response<Full<Bytes>> {
    let is_head = match *method {
        Method::GET => false,
        Method::HEAD => true,
        _ => {
            logger::log_debug(&format!("Unsupported method: {method}"));
            return http::build_501_response(method);
        }
    };

    let target = path::collapse_leading_slashes(target);

    // Health probes win over a file of the same name
    if is_health_target(target) {
        return http::build_health_response(is_head);
    }

    static_files::serve(state, target, is_head).await
}
