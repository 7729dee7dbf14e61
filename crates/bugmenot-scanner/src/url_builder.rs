use crate::error::{FetchError, Result};

/// Path every listing page lives under.
pub const VIEW_PATH: &str = "/view/";

/// Build `<base>/view/<term>` with the term percent-encoded.
pub fn build_query_url(base_url: &str, term: &str) -> Result<String> {
    let term = term.trim();
    if term.is_empty() {
        return Err(FetchError::InvalidTerm(
            "search term must not be empty".to_string(),
        ));
    }

    let base = base_url.trim().trim_end_matches('/');
    if !(base.starts_with("http://") || base.starts_with("https://")) {
        return Err(FetchError::InvalidBaseUrl(base_url.to_string()));
    }

    let url = format!("{base}{VIEW_PATH}{}", urlencoding::encode(term));
    tracing::debug!("Built query URL {}", url);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_for_domain() {
        let url = build_query_url("http://bugmenot.com", "theathletic.com").expect("build url");
        assert_eq!(url, "http://bugmenot.com/view/theathletic.com");
    }

    #[test]
    fn test_build_url_encodes_term() {
        let url = build_query_url("https://bugmenot.com/", " news site/å ").expect("build url");
        assert_eq!(url, "https://bugmenot.com/view/news%20site%2F%C3%A5");
    }

    #[test]
    fn test_blank_term_rejected() {
        let err = build_query_url("http://bugmenot.com", "   ").expect_err("blank term");
        assert!(matches!(err, FetchError::InvalidTerm(_)));
    }

    #[test]
    fn test_non_http_base_rejected() {
        let err = build_query_url("bugmenot.com", "example.com").expect_err("no scheme");
        assert!(matches!(err, FetchError::InvalidBaseUrl(_)));
    }
}
