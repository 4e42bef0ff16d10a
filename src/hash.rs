//! Identifier extraction.
//! Finds the per-user menu hash in a page URL: first the `hash` query
//! parameter, then the path segment right after a `menu` route segment.
//! Absence is a normal outcome (the page shows its static menu).

use url::Url;

pub const QUERY_PARAM: &str = "hash";
pub const ROUTE_MARKER: &str = "menu";
pub const MIN_HASH_LEN: usize = 16;

/// Returns the menu identifier embedded in `page_url`, if any.
pub fn extract(page_url: &str) -> Option<String> {
    let url = Url::parse(page_url).ok()?;
    extract_from_url(&url)
}

fn extract_from_url(url: &Url) -> Option<String> {
    from_query(url).or_else(|| from_path(url))
}

/// True when `candidate` is long enough and uses only `[A-Za-z0-9+/=_-]`.
fn is_valid(candidate: &str) -> bool {
    candidate.len() >= MIN_HASH_LEN
        && candidate
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '=' | '_' | '-'))
}

fn from_query(url: &Url) -> Option<String> {
    let (_, value) = url.query_pairs().find(|(key, _)| key == QUERY_PARAM)?;
    is_valid(&value).then(|| value.into_owned())
}

fn from_path(url: &Url) -> Option<String> {
    let mut segments = url.path_segments()?;
    segments.find(|segment| *segment == ROUTE_MARKER)?;
    let candidate = segments.next()?;
    is_valid(candidate).then(|| candidate.to_string())
}
