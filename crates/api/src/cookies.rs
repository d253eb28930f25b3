//! Session cookie plumbing over raw headers.

use axum::http::{HeaderMap, HeaderValue, header};

/// Name of the session cookie carrying the signed token.
pub const SESSION_COOKIE: &str = "token";

/// Pull a named cookie out of the `Cookie` request header.
pub fn parse_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    for pair in raw.split(';') {
        let mut parts = pair.trim().splitn(2, '=');
        let key = parts.next()?;
        if key == name {
            return Some(parts.next().unwrap_or_default().to_string());
        }
    }
    None
}

fn cookie_attributes(production: bool) -> &'static str {
    // Cross-site frontends need SameSite=None, which browsers only accept
    // together with Secure.
    if production {
        "HttpOnly; Secure; SameSite=None; Path=/"
    } else {
        "HttpOnly; SameSite=Lax; Path=/"
    }
}

/// `Set-Cookie` value installing the session token.
pub fn session_cookie(token: &str, production: bool) -> HeaderValue {
    let value = format!("{SESSION_COOKIE}={token}; {}", cookie_attributes(production));
    // Token is base64url and the attributes are static ASCII.
    HeaderValue::from_str(&value).unwrap_or_else(|_| HeaderValue::from_static(""))
}

/// `Set-Cookie` value that expires the session cookie immediately.
pub fn clear_session_cookie(production: bool) -> HeaderValue {
    let value = format!(
        "{SESSION_COOKIE}=; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT; {}",
        cookie_attributes(production)
    );
    HeaderValue::from_str(&value).unwrap_or_else(|_| HeaderValue::from_static(""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_named_cookie_among_many() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("a=1; token=abc.def.ghi; b=2"),
        );
        assert_eq!(parse_cookie(&headers, "token").as_deref(), Some("abc.def.ghi"));
        assert_eq!(parse_cookie(&headers, "missing"), None);
    }

    #[test]
    fn missing_header_yields_none() {
        assert_eq!(parse_cookie(&HeaderMap::new(), "token"), None);
    }

    #[test]
    fn production_cookie_is_cross_site() {
        let value = session_cookie("t", true);
        let s = value.to_str().unwrap();
        assert!(s.contains("Secure"));
        assert!(s.contains("SameSite=None"));
    }

    #[test]
    fn clear_cookie_expires_in_the_past() {
        let value = clear_session_cookie(false);
        let s = value.to_str().unwrap();
        assert!(s.contains("Max-Age=0"));
        assert!(s.starts_with("token=;"));
    }
}
