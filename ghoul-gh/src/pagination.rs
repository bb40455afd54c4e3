//! `Link` header parsing for paginated list endpoints.

use std::sync::LazyLock;

use regex::Regex;
use reqwest::header::{HeaderMap, LINK};

static LINK_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r#"<([^>]+)>\s*;\s*rel="([^"]+)""#).expect("Failed to compile Link header regex"));

/// URL of the `rel="next"` page, if the response has one
pub fn next_page_url(headers: &HeaderMap) -> Option<String> {
  headers
    .get_all(LINK)
    .iter()
    .filter_map(|value| value.to_str().ok())
    .find_map(|value| find_relation(value, "next"))
}

fn find_relation(link_header: &str, relation: &str) -> Option<String> {
  LINK_REGEX.captures_iter(link_header).find_map(|captures| {
    let rels = captures.get(2)?.as_str();
    if rels.split_whitespace().any(|rel| rel == relation) {
      captures.get(1).map(|url| url.as_str().to_string())
    } else {
      None
    }
  })
}
