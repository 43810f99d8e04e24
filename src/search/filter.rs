use url::Url;

use super::SearchResult;

/// Ordered, normalized set of hostname suffixes that search results are
/// restricted to. An empty list means no restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList {
    domains: Vec<String>,
}

impl AllowList {
    /// Build an allow-list from raw entries.
    ///
    /// Entries are trimmed and lower-cased, a leading `*.` or `.` and any
    /// trailing `.` are stripped. Empty entries are dropped and duplicates
    /// keep their first position.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut domains: Vec<String> = Vec::new();
        for entry in entries {
            let normalized = normalize_domain(entry.as_ref());
            if normalized.is_empty() || domains.contains(&normalized) {
                continue;
            }
            domains.push(normalized);
        }
        Self { domains }
    }

    /// Parse a comma-separated list, e.g. `"ftrack.com, docs.rs"`.
    pub fn from_csv(raw: &str) -> Self {
        Self::new(raw.split(','))
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    pub fn domains(&self) -> &[String] {
        &self.domains
    }

    pub fn is_allowed(&self, domain: &str) -> bool {
        is_allowed(domain, &self.domains)
    }

    pub fn filter(&self, results: Vec<SearchResult>) -> Vec<SearchResult> {
        filter_results(results, &self.domains)
    }
}

/// Decide whether `domain` passes `allow_list`.
///
/// An empty list allows everything. Otherwise the domain must equal an entry
/// or end with `"." + entry`, ignoring ASCII case.
pub fn is_allowed<S: AsRef<str>>(domain: &str, allow_list: &[S]) -> bool {
    if allow_list.is_empty() {
        return true;
    }

    let domain = normalize_domain(domain);
    if domain.is_empty() {
        return false;
    }

    allow_list.iter().any(|entry| {
        let entry = normalize_domain(entry.as_ref());
        if entry.is_empty() {
            return false;
        }
        domain == entry
            || (domain.len() > entry.len()
                && domain.ends_with(entry.as_str())
                && domain.as_bytes()[domain.len() - entry.len() - 1] == b'.')
    })
}

/// Keep the results whose domain passes `allow_list`, in their original order.
pub fn filter_results<S: AsRef<str>>(
    results: Vec<SearchResult>,
    allow_list: &[S],
) -> Vec<SearchResult> {
    if allow_list.is_empty() {
        return results;
    }
    results
        .into_iter()
        .filter(|r| is_allowed(&r.domain, allow_list))
        .collect()
}

/// Hostname of an absolute URL, lower-cased. `None` for anything that does
/// not parse or has no host.
pub fn domain_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    let host = normalize_domain(host);
    if host.is_empty() {
        None
    } else {
        Some(host)
    }
}

fn normalize_domain(raw: &str) -> String {
    let trimmed = raw.trim();
    let trimmed = trimmed
        .strip_prefix("*.")
        .or_else(|| trimmed.strip_prefix('.'))
        .unwrap_or(trimmed);
    trimmed.trim_end_matches('.').to_ascii_lowercase()
}
