//! HTTP request handlers.

pub(crate) mod assets;
pub(crate) mod find;
pub(crate) mod pages;
pub(crate) mod root;

#[cfg(test)]
pub(crate) mod test_support;

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use percent_encoding::{AsciiSet, CONTROLS, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters escaped in URL paths we send back to the client.
const PATH: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Percent-encode a decoded URL path.
pub(crate) fn encode_path(path: &str) -> String {
    utf8_percent_encode(path, PATH).to_string()
}

/// URL of the root page with an "unknown slug" hint.
pub(crate) fn root_url_with_hint(slug: &str) -> String {
    format!("/?was={}", utf8_percent_encode(slug, NON_ALPHANUMERIC))
}

/// 302 redirect to an already-encoded `location`.
pub(crate) fn found(location: &str) -> Response {
    match HeaderValue::from_str(location) {
        Ok(value) => (StatusCode::FOUND, [(header::LOCATION, value)]).into_response(),
        Err(_) => StatusCode::BAD_REQUEST.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_path() {
        assert_eq!(encode_path("/app/docs/intro"), "/app/docs/intro");
        assert_eq!(encode_path("/app/my page"), "/app/my%20page");
        assert_eq!(encode_path("/app/café"), "/app/caf%C3%A9");
        assert_eq!(encode_path("/app/100%?"), "/app/100%25%3F");
    }

    #[test]
    fn test_root_url_with_hint() {
        assert_eq!(root_url_with_hint("shop"), "/?was=shop");
        assert_eq!(root_url_with_hint("a&b"), "/?was=a%26b");
    }

    #[test]
    fn test_found() {
        let response = found("/app/");

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[header::LOCATION], "/app/");
    }
}
