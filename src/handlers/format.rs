use std::fmt::Write;

use crate::search::{AllowList, SearchResult};

/// Render results as numbered text blocks.
///
/// `category` is inserted into the header (e.g. "ftrack documentation")
/// when the results come from a scoped search.
pub fn format_results(query: &str, results: &[SearchResult], category: Option<&str>) -> String {
    if results.is_empty() {
        return no_results(query);
    }

    let noun = if results.len() == 1 { "result" } else { "results" };
    let mut out = match category {
        Some(category) => format!("Found {} {category} {noun} for query: '{query}'\n", results.len()),
        None => format!("Found {} {noun} for query: '{query}'\n", results.len()),
    };

    for (i, result) in results.iter().enumerate() {
        let _ = write!(
            out,
            "\n{}. {}\n   URL: {}\n   Domain: {}\n",
            i + 1,
            result.title,
            result.url,
            result.domain
        );
        if !result.snippet.is_empty() {
            let _ = writeln!(out, "   {}", result.snippet);
        }
    }

    out
}

pub fn no_results(query: &str) -> String {
    format!("No results found for query: '{query}'")
}

pub fn format_allow_list(allow_list: &AllowList) -> String {
    if allow_list.is_empty() {
        return "No domain restrictions configured - all domains allowed".to_string();
    }

    let mut out = String::from("Allowed domains:\n");
    for domain in allow_list.domains() {
        let _ = writeln!(out, "- {domain}");
    }
    out
}
