// src/utils/url.rs

//! URL and record identifier utilities.

/// Extract the network location (`host[:port]`) from a URL, lowercased.
///
/// # Examples
/// ```
/// use decade_facets::utils::url::netloc;
///
/// assert_eq!(
///     netloc("http://Repo.X.edu:8080/item/1"),
///     Some("repo.x.edu:8080".to_string())
/// );
/// ```
pub fn netloc(url: &str) -> Option<String> {
    let scheme_end = url.find("://")?;
    let after_scheme = &url[scheme_end + 3..];
    let location = after_scheme
        .split(|c| c == '/' || c == '?' || c == '#')
        .next()?;
    Some(location.to_lowercase())
}

/// Whether a string is an absolute http(s) URL with a host.
pub fn is_http_url(value: &str) -> bool {
    match url::Url::parse(value.trim()) {
        Ok(parsed) => {
            matches!(parsed.scheme(), "http" | "https") && parsed.host_str().is_some()
        }
        Err(_) => false,
    }
}

/// Lowercased extension (with leading dot) of the last path segment.
pub fn path_extension(value: &str) -> Option<String> {
    let parsed = url::Url::parse(value.trim()).ok()?;
    let last = parsed.path_segments()?.last()?;
    let dot = last.rfind('.')?;
    if dot == 0 {
        return None;
    }
    Some(last[dot..].to_lowercase())
}

/// Whether an identifier follows the `scheme:authority:local` form.
///
/// The local part may itself contain colons.
pub fn is_namespaced_identifier(identifier: &str, scheme: &str) -> bool {
    let components: Vec<&str> = identifier.splitn(3, ':').collect();
    components.len() == 3 && components[0] == scheme
}

/// Local part of a namespaced identifier, or the whole identifier otherwise.
pub fn local_identifier<'a>(identifier: &'a str, scheme: &str) -> &'a str {
    if is_namespaced_identifier(identifier, scheme) {
        identifier.splitn(3, ':').nth(2).unwrap_or(identifier)
    } else {
        identifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_netloc() {
        assert_eq!(
            netloc("http://repo.x.edu/item/bbb-1000"),
            Some("repo.x.edu".to_string())
        );
        assert_eq!(
            netloc("https://Example.COM?q=1"),
            Some("example.com".to_string())
        );
        assert_eq!(netloc("invalid-url"), None);
    }

    #[test]
    fn test_is_http_url() {
        assert!(is_http_url("http://archives.x.edu/a/b"));
        assert!(is_http_url(" https://repo.x.edu/item/1 "));
        assert!(!is_http_url("ftp://repo.x.edu/file"));
        assert!(!is_http_url("bbb-1000"));
        assert!(!is_http_url("urn:isbn:0451450523"));
    }

    #[test]
    fn test_path_extension() {
        assert_eq!(
            path_extension("http://repo.x.edu/thumbs/1.JPG"),
            Some(".jpg".to_string())
        );
        assert_eq!(path_extension("http://repo.x.edu/item/1"), None);
        assert_eq!(path_extension("http://repo.x.edu/"), None);
    }

    #[test]
    fn test_namespaced_identifier() {
        assert!(is_namespaced_identifier("oai:repo.x.edu:bbb-1000", "oai"));
        assert!(is_namespaced_identifier("oai:repo.x.edu:a:b", "oai"));
        assert!(!is_namespaced_identifier("oai:bbb-1000", "oai"));
        assert!(!is_namespaced_identifier("urn:repo.x.edu:bbb-1000", "oai"));
    }

    #[test]
    fn test_local_identifier() {
        assert_eq!(local_identifier("oai:repo.x.edu:a:b", "oai"), "a:b");
        assert_eq!(local_identifier("bbb-1000", "oai"), "bbb-1000");
    }
}
