//! Target URL validation and normalization.
//!
//! Every target is checked and canonicalized before storage so that what a
//! short code redirects to is always a well-formed absolute http(s) URL.

use url::Url;

use crate::error::LinkError;

/// Validates `input` as an absolute http(s) URL and returns its canonical
/// form.
///
/// # Rules
///
/// 1. Only `http` and `https` schemes are accepted; `javascript:`, `data:`,
///    `file:` and friends are rejected outright.
/// 2. The host is lowercased (the `url` crate does this on parse).
/// 3. Fragments are stripped: they never reach the server on redirect.
/// 4. Path, query, and explicit non-default ports are preserved as-is.
///
/// # Errors
///
/// Returns [`LinkError::InvalidTarget`] for anything that fails to parse or
/// uses a disallowed scheme.
pub fn normalize_target(input: &str) -> Result<String, LinkError> {
    let mut url = Url::parse(input).map_err(|e| LinkError::InvalidTarget(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(LinkError::InvalidTarget(format!(
                "scheme '{other}' is not allowed"
            )));
        }
    }

    if url.host_str().is_none() {
        return Err(LinkError::InvalidTarget("missing host".to_string()));
    }

    url.set_fragment(None);

    Ok(url.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https() {
        assert_eq!(
            normalize_target("http://example.com").unwrap(),
            "http://example.com/"
        );
        assert_eq!(
            normalize_target("https://example.com/a/b?q=1").unwrap(),
            "https://example.com/a/b?q=1"
        );
    }

    #[test]
    fn test_lowercases_host() {
        assert_eq!(
            normalize_target("https://EXAMPLE.COM/Path").unwrap(),
            "https://example.com/Path"
        );
    }

    #[test]
    fn test_strips_fragment() {
        assert_eq!(
            normalize_target("https://example.com/page#section").unwrap(),
            "https://example.com/page"
        );
    }

    #[test]
    fn test_preserves_custom_port() {
        assert_eq!(
            normalize_target("http://example.com:8080/api").unwrap(),
            "http://example.com:8080/api"
        );
    }

    #[test]
    fn test_rejects_relative_and_garbage() {
        assert!(matches!(
            normalize_target("not a url"),
            Err(LinkError::InvalidTarget(_))
        ));
        assert!(matches!(
            normalize_target("example.com/no-scheme"),
            Err(LinkError::InvalidTarget(_))
        ));
        assert!(matches!(
            normalize_target(""),
            Err(LinkError::InvalidTarget(_))
        ));
    }

    #[test]
    fn test_rejects_dangerous_schemes() {
        for input in [
            "javascript:alert('xss')",
            "data:text/plain,hello",
            "file:///etc/passwd",
            "ftp://example.com/file.txt",
            "mailto:someone@example.com",
        ] {
            assert!(
                matches!(normalize_target(input), Err(LinkError::InvalidTarget(_))),
                "accepted: {input}"
            );
        }
    }
}
