//! Result extraction from the DuckDuckGo lite results page.
//!
//! The page is a table where each hit is a `a.result-link` row followed by
//! a `td.result-snippet` row. Both are walked in a single document-order
//! pass so each snippet binds to the link directly above it; a hit with no
//! snippet row simply keeps an empty snippet.
//!
//! The markup belongs to a third party and can change at any time. Anything
//! unexpected yields fewer (possibly zero) results, never an error.

use scraper::{Html, Selector};
use url::Url;

use super::filter::domain_of;
use super::SearchResult;

const HIT_SELECTOR: &str = "a.result-link, td.result-snippet";

/// Host the provider uses for its own redirect and ad links.
const PROVIDER_HOST: &str = "duckduckgo.com";

/// Extract up to `limit` results from a results page.
pub fn extract_results(html: &str, limit: usize) -> Vec<SearchResult> {
    let selector = match Selector::parse(HIT_SELECTOR) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(error = ?e, "result selector failed to parse");
            return Vec::new();
        }
    };

    let document = Html::parse_document(html);
    let mut results: Vec<SearchResult> = Vec::new();
    // Whether the last link seen was kept; snippets of dropped links are skipped.
    let mut last_link_kept = false;

    for element in document.select(&selector) {
        if element.value().name() == "a" {
            if results.len() >= limit {
                break;
            }
            last_link_kept = false;

            let Some(url) = element.value().attr("href").and_then(resolve_href) else {
                continue;
            };
            let Some(domain) = domain_of(&url) else {
                continue;
            };

            let mut title = collapse_whitespace(&element.text().collect::<String>());
            if title.is_empty() {
                title = url.clone();
            }

            results.push(SearchResult {
                title,
                url,
                snippet: String::new(),
                domain,
            });
            last_link_kept = true;
        } else if last_link_kept {
            if let Some(hit) = results.last_mut() {
                if hit.snippet.is_empty() {
                    hit.snippet = collapse_whitespace(&element.text().collect::<String>());
                }
            }
        }
    }

    results
}

/// Turn a result `href` into an absolute http(s) URL.
///
/// Protocol-relative links get `https:`. Provider redirect links
/// (`/l/?uddg=<target>`) are unwrapped to their target. Other links on the
/// provider host are ads or navigation and are dropped.
pub fn resolve_href(href: &str) -> Option<String> {
    let href = href.trim();
    let absolute = if href.starts_with("//") {
        format!("https:{href}")
    } else {
        href.to_string()
    };

    let parsed = Url::parse(&absolute).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }

    let host = parsed.host_str()?.to_ascii_lowercase();
    let on_provider = host == PROVIDER_HOST || host.ends_with(".duckduckgo.com");
    if !on_provider {
        return Some(parsed.to_string());
    }

    if !parsed.path().starts_with("/l/") {
        return None;
    }

    let target = parsed
        .query_pairs()
        .find(|(k, _)| k == "uddg")
        .map(|(_, v)| v.into_owned())?;

    let target = Url::parse(&target).ok()?;
    match target.scheme() {
        "http" | "https" => Some(target.to_string()),
        _ => None,
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
