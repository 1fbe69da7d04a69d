//! Response hardening for the JSON API

use axum::{
    extract::Request,
    http::{header, HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};

/// Sent on every response. The API serves JSON only, so nothing may be framed, sniffed
/// or loaded as a subresource.
const API_HEADERS: [(&str, &str); 4] = [
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("referrer-policy", "no-referrer"),
    ("content-security-policy", "default-src 'none'"),
];

const HSTS: &str = "max-age=31536000; includeSubDomains";

/// Whether the client reached us over TLS, directly or through a terminating proxy.
fn served_over_tls(req: &Request) -> bool {
    let forwarded = req
        .headers()
        .get("x-forwarded-proto")
        .and_then(|proto| proto.to_str().ok())
        .is_some_and(|proto| proto.eq_ignore_ascii_case("https"));

    forwarded || req.uri().scheme() == Some(&axum::http::uri::Scheme::HTTPS)
}

fn apply_api_headers(headers: &mut HeaderMap, tls: bool) {
    for (name, value) in API_HEADERS {
        headers.insert(HeaderName::from_static(name), HeaderValue::from_static(value));
    }
    if tls {
        headers.insert(header::STRICT_TRANSPORT_SECURITY, HeaderValue::from_static(HSTS));
    }
}

/// Adds the API header set to every response; HSTS only for TLS requests.
///
/// Authentication happens in front of this service.
pub async fn security_headers_middleware(req: Request, next: Next) -> Response {
    let tls = served_over_tls(&req);
    let mut response = next.run(req).await;
    apply_api_headers(response.headers_mut(), tls);
    response
}
