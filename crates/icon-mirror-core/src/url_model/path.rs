//! File name extraction from an image URL path.

/// Returns the final path segment of `url`, used as the on-disk image name.
///
/// Query and fragment are ignored. Returns `None` when the path ends in `/`,
/// is empty, or the segment is `.`/`..`. The segment is taken from the raw
/// string, never re-encoded: `央视.png` stays `央视.png` and an upstream
/// `%E5%A4%AE.png` stays escaped, so the name matches what the CDN serves.
pub fn file_name_from_url(url: &str) -> Option<String> {
    let without_suffix = url.split(['?', '#']).next().unwrap_or_default();
    let segment = last_segment(raw_path(without_suffix));
    if segment.is_empty() || segment == "." || segment == ".." {
        return None;
    }
    Some(segment.to_string())
}

/// Path part of `url` as written. Absolute URLs lose scheme and authority;
/// anything else is already a path.
fn raw_path(url: &str) -> &str {
    if url::Url::parse(url).is_err() {
        return url;
    }
    match url.split_once("://") {
        Some((_, rest)) => rest.find('/').map(|i| &rest[i..]).unwrap_or_default(),
        None => url,
    }
}

fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal() {
        assert_eq!(
            file_name_from_url("https://host/x/logo.png").as_deref(),
            Some("logo.png")
        );
        assert_eq!(
            file_name_from_url("https://example.com/single").as_deref(),
            Some("single")
        );
    }

    #[test]
    fn root_or_trailing_slash() {
        assert_eq!(file_name_from_url("https://example.com/"), None);
        assert_eq!(file_name_from_url("https://example.com"), None);
        assert_eq!(file_name_from_url("https://example.com/icons/"), None);
    }

    #[test]
    fn with_query_and_fragment() {
        assert_eq!(
            file_name_from_url("https://example.com/a/tv.png?v=3#top").as_deref(),
            Some("tv.png")
        );
    }

    #[test]
    fn keeps_percent_encoding() {
        assert_eq!(
            file_name_from_url("https://example.com/%E5%9B%BE.png").as_deref(),
            Some("%E5%9B%BE.png")
        );
    }

    #[test]
    fn keeps_non_ascii_literal() {
        assert_eq!(
            file_name_from_url("https://emby-icon.vercel.app/img/央视.png").as_deref(),
            Some("央视.png")
        );
    }

    #[test]
    fn keeps_spaces_literal() {
        assert_eq!(
            file_name_from_url("https://h/x/my icon.png").as_deref(),
            Some("my icon.png")
        );
    }

    #[test]
    fn authority_only_has_no_name() {
        assert_eq!(file_name_from_url("https://example.com?x=/a.png"), None);
        assert_eq!(file_name_from_url("https://example.com/.."), None);
    }

    #[test]
    fn relative_path_fallback() {
        assert_eq!(
            file_name_from_url("img/channels/cctv1.png?x=1").as_deref(),
            Some("cctv1.png")
        );
        assert_eq!(file_name_from_url("img/.."), None);
    }
}
