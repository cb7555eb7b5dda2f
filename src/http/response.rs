//! HTTP response building module
//!
//! Builders for each response the server sends, decoupled from routing.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, DATE, SERVER};
use hyper::{Method, Response, StatusCode};

/// Drop the body for HEAD while keeping the headers computed from it
fn body_for(data: Bytes, is_head: bool) -> Full<Bytes> {
    if is_head {
        Full::new(Bytes::new())
    } else {
        Full::new(data)
    }
}

/// Build the liveness response: `200 text/plain "ok"`
pub fn build_health_response(is_head: bool) -> Response<Full<Bytes>> {
    let body = Bytes::from_static(b"ok");
    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "text/plain; charset=utf-8")
        .header("Content-Length", body.len())
        .body(body_for(body, is_head))
        .unwrap_or_else(|e| {
            log_build_error("health", &e);
            Response::new(Full::new(Bytes::from_static(b"ok")))
        })
}

/// Build 200 response for a regular file
pub fn build_file_response(
    data: Bytes,
    content_type: &str,
    last_modified: Option<&str>,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", content_type)
        .header("Content-Length", data.len());

    if let Some(modified) = last_modified {
        builder = builder.header("Last-Modified", modified);
    }

    builder.body(body_for(data, is_head)).unwrap_or_else(|e| {
        log_build_error("200", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Build 200 response carrying a generated directory listing
pub fn build_listing_response(html: String, is_head: bool) -> Response<Full<Bytes>> {
    let body = Bytes::from(html);
    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "text/html; charset=utf-8")
        .header("Content-Length", body.len())
        .body(body_for(body, is_head))
        .unwrap_or_else(|e| {
            log_build_error("listing", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 301 redirect, used to add the trailing slash to a directory path
pub fn build_redirect_response(location: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::MOVED_PERMANENTLY)
        .header("Location", location)
        .header("Content-Length", 0)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("301", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 404 Not Found response
pub fn build_404_response(reason: &'static str, is_head: bool) -> Response<Full<Bytes>> {
    build_error_response(StatusCode::NOT_FOUND, reason.to_string(), is_head)
}

/// Build 501 response for a method the file server does not implement
pub fn build_501_response(method: &Method) -> Response<Full<Bytes>> {
    let mut resp = build_error_response(
        StatusCode::NOT_IMPLEMENTED,
        format!("Unsupported method ('{method}')"),
        false,
    );
    resp.headers_mut()
        .insert("Allow", HeaderValue::from_static("GET, HEAD"));
    resp
}

fn build_error_response(status: StatusCode, message: String, is_head: bool) -> Response<Full<Bytes>> {
    let body = Bytes::from(format!("{} {message}\n", status.as_u16()));
    Response::builder()
        .status(status)
        .header("Content-Type", "text/plain; charset=utf-8")
        .header("Content-Length", body.len())
        .header("Connection", "close")
        .body(body_for(body, is_head))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            let mut resp = Response::new(Full::new(Bytes::new()));
            *resp.status_mut() = status;
            resp
        })
}

/// Add the `Server` and `Date` headers every response carries
pub fn stamp_response(resp: &mut Response<Full<Bytes>>, server_name: &str) {
    let headers = resp.headers_mut();
    if let Ok(value) = HeaderValue::from_str(server_name) {
        headers.insert(SERVER, value);
    }
    if let Ok(value) = HeaderValue::from_str(&super::date::now()) {
        headers.insert(DATE, value);
    }
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
