//! Request rewriting and upstream dispatch.
//!
//! # Responsibilities
//! - Rewrite the request URI to the upstream base + remainder path
//! - Rewrite the Host header to the upstream's authority
//! - Pass method, body, and all other headers through unmodified
//! - Relay the upstream response; buffer it first when capture is on
//!
//! # Design Decisions
//! - One dispatch per request, no retries, no explicit timeout; a
//!   hung upstream holds only its own handling task
//! - A malformed configured target URL is a config defect surfaced
//!   per-request as a 500, matching the error taxonomy
//! - Capture persistence completes before the response is released
//!   to the client; failures there are warnings, never client errors

use axum::body::Body;
use axum::http::uri::Authority;
use axum::http::{header, HeaderValue, Request, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use http_body_util::BodyExt;
use hyper_util::client::legacy::{connect::HttpConnector, Client};

use crate::capture::CaptureStore;

/// Build the rewritten upstream URI and the authority to present in
/// the Host header. The query string carries over verbatim.
fn upstream_target(
    target: &str,
    remainder: &str,
    query: Option<&str>,
) -> Result<(Uri, Authority), String> {
    let base: Uri = target.parse().map_err(|err| format!("{err}: {target}"))?;
    let authority = base
        .authority()
        .cloned()
        .ok_or_else(|| format!("no host in {target}"))?;

    let base_str = target.trim_end_matches('/');
    let rewritten = match query {
        Some(q) => format!("{base_str}{remainder}?{q}"),
        None => format!("{base_str}{remainder}"),
    };
    let uri = rewritten.parse().map_err(|err| format!("{err}: {rewritten}"))?;

    Ok((uri, authority))
}

/// Forward one request to its resolved upstream and relay the
/// response. When a capture store is given, the response body is
/// buffered, persisted best-effort, and re-exposed to the client from
/// the same bytes.
pub async fn dispatch(
    client: &Client<HttpConnector, Body>,
    capture: Option<&CaptureStore>,
    service: &str,
    target: &str,
    remainder: &str,
    request: Request<Body>,
) -> Response {
    let (uri, authority) = match upstream_target(target, remainder, request.uri().query()) {
        Ok(parts) => parts,
        Err(err) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Invalid target URL: {err}"),
            )
                .into_response();
        }
    };

    tracing::info!(
        "Proxying request: {} {} -> {}{}",
        request.method(),
        request.uri().path(),
        target,
        remainder
    );

    let (parts, body) = request.into_parts();
    let mut builder = Request::builder().method(parts.method.clone()).uri(uri);
    if let Some(headers) = builder.headers_mut() {
        for (name, value) in parts.headers.iter() {
            if name != &header::HOST {
                headers.append(name.clone(), value.clone());
            }
        }
        // Name-based virtual hosting on the upstream needs its own host.
        if let Ok(host) = HeaderValue::from_str(authority.as_str()) {
            headers.insert(header::HOST, host);
        }
    }

    let upstream_req = match builder.body(body) {
        Ok(req) => req,
        Err(err) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to build upstream request: {err}"),
            )
                .into_response();
        }
    };

    let response = match client.request(upstream_req).await {
        Ok(resp) => resp,
        Err(err) => {
            tracing::error!(service = %service, error = %err, "Upstream request failed");
            return (
                StatusCode::BAD_GATEWAY,
                format!("Upstream request failed: {err}"),
            )
                .into_response();
        }
    };

    let (parts, body) = response.into_parts();
    match capture {
        Some(store) => {
            let bytes = match body.collect().await {
                Ok(collected) => collected.to_bytes(),
                Err(err) => {
                    return (
                        StatusCode::BAD_GATEWAY,
                        format!("Failed to read upstream response: {err}"),
                    )
                        .into_response();
                }
            };
            // A "/" remainder means the bare service path was hit;
            // recorded as the empty path ("root" in the filename).
            let capture_path = if remainder == "/" { "" } else { remainder };
            if let Err(err) = store
                .save(service, capture_path, parts.status, &parts.headers, &bytes)
                .await
            {
                tracing::warn!(service = %service, error = %err, "Failed to save response");
            }
            Response::from_parts(parts, Body::from(bytes))
        }
        None => Response::from_parts(parts, Body::new(body)),
    }
}
