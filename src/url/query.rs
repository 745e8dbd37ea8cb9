//! Query-marker extraction from link targets
//!
//! Listing and detail links on the site carry their meaning in query markers
//! (`id=`, `date=`, `yr=`, `page`). These helpers read them straight from the
//! raw `href` text, without resolving the link first.

use regex::Regex;
use std::sync::LazyLock;

/// Movie ids may contain word characters, spaces and `-(),':.`
static MOVIE_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"id=([\w\-(),':\s.]+).htm").expect("hardcoded regex pattern is valid")
});

static DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("hardcoded regex pattern is valid"));

static YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{4}").expect("hardcoded regex pattern is valid"));

/// Extracts the canonical movie id from a detail link
///
/// Returns `None` unless the id pattern matches exactly once.
///
/// ```
/// use boxoffice_crawler::url::extract_movie_id;
///
/// assert_eq!(extract_movie_id("/movies/?id=starwars4.htm"), Some("starwars4".to_string()));
/// assert_eq!(extract_movie_id("/movies/?page=daily"), None);
/// ```
pub fn extract_movie_id(href: &str) -> Option<String> {
    let mut matches = MOVIE_ID.captures_iter(href);
    let first = matches.next()?;
    if matches.next().is_some() {
        return None;
    }
    first.get(1).map(|m| m.as_str().to_string())
}

/// Returns the value of a `key=` query marker, up to the next `&`
pub fn query_value<'a>(href: &'a str, key: &str) -> Option<&'a str> {
    let query = href.split_once('?').map(|(_, q)| q).unwrap_or(href);
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
}

/// Parses the first run of ASCII digits in `text`
pub fn first_number(text: &str) -> Option<u32> {
    DIGITS.find(text).and_then(|m| m.as_str().parse().ok())
}

/// Parses the first four-digit run in `text` as a year
pub fn extract_year(text: &str) -> Option<u32> {
    YEAR.find(text).and_then(|m| m.as_str().parse().ok())
}
