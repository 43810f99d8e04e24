//! DuckDuckGo client against a local mock provider.

use std::fmt::Write;
use std::time::Duration;

use mcp_web_search_server::config::SearchSettings;
use mcp_web_search_server::search::{AllowList, DuckDuckGoClient, SearchProvider, SearchRequest};
use url::Url;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings_for(mock: &MockServer) -> SearchSettings {
    SearchSettings {
        endpoint: Url::parse(&format!("{}/lite/", mock.uri())).unwrap(),
        user_agent: "test-browser/1.0".into(),
        timeout: Duration::from_secs(5),
    }
}

/// A results page with `n` hits on alternating domains.
fn page(n: usize) -> String {
    let mut html = String::from("<html><body><table>");
    for i in 0..n {
        let host = if i % 2 == 0 { "docs.example.com" } else { "other.org" };
        let _ = write!(
            html,
            "<tr><td><a rel=\"nofollow\" href=\"https://{host}/page{i}\" class='result-link'>Page {i}</a></td></tr>\
             <tr><td class='result-snippet'>Snippet {i}</td></tr>"
        );
    }
    html.push_str("</table></body></html>");
    html
}

#[tokio::test]
async fn sends_query_and_user_agent() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/lite/"))
        .and(query_param("q", "rust & \"tokio\" select!"))
        .and(header("user-agent", "test-browser/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page(2)))
        .expect(1)
        .mount(&mock)
        .await;

    let client = DuckDuckGoClient::new(&settings_for(&mock)).unwrap();
    let request = SearchRequest::new("rust & \"tokio\" select!", AllowList::default(), 10);
    let results = client.search(&request).await;

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].title, "Page 0");
    assert_eq!(results[0].snippet, "Snippet 0");
    assert_eq!(results[1].domain, "other.org");
}

#[tokio::test]
async fn filters_then_truncates() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/lite/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page(20)))
        .mount(&mock)
        .await;

    let client = DuckDuckGoClient::new(&settings_for(&mock)).unwrap();
    let request = SearchRequest::new("q", AllowList::new(["example.com"]), 3);
    let results = client.search(&request).await;

    let urls: Vec<&str> = results.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            "https://docs.example.com/page0",
            "https://docs.example.com/page2",
            "https://docs.example.com/page4",
        ]
    );
}

#[tokio::test]
async fn overfetch_is_bounded() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/lite/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page(20)))
        .mount(&mock)
        .await;

    let client = DuckDuckGoClient::new(&settings_for(&mock)).unwrap();
    // Only the first 3 raw hits are considered, and just one of them is on other.org.
    let request = SearchRequest::new("q", AllowList::new(["other.org"]), 1);
    let results = client.search(&request).await;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].url, "https://other.org/page1");

    let request = SearchRequest::new("q", AllowList::new(["nowhere.net"]), 5);
    assert!(client.search(&request).await.is_empty());
}

#[tokio::test]
async fn http_error_yields_empty_results() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string(page(5)))
        .mount(&mock)
        .await;

    let client = DuckDuckGoClient::new(&settings_for(&mock)).unwrap();
    let request = SearchRequest::new("q", AllowList::default(), 10);
    assert!(client.search(&request).await.is_empty());
}

#[tokio::test]
async fn unreachable_provider_yields_empty_results() {
    let settings = SearchSettings {
        endpoint: Url::parse("http://127.0.0.1:9/lite/").unwrap(),
        user_agent: "test-browser/1.0".into(),
        timeout: Duration::from_secs(2),
    };
    let client = DuckDuckGoClient::new(&settings).unwrap();
    let request = SearchRequest::new("q", AllowList::default(), 10);
    assert!(client.search(&request).await.is_empty());
}

#[tokio::test]
async fn unexpected_markup_yields_empty_results() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>Please verify you are human</body></html>"))
        .mount(&mock)
        .await;

    let client = DuckDuckGoClient::new(&settings_for(&mock)).unwrap();
    let request = SearchRequest::new("q", AllowList::default(), 10);
    assert!(client.search(&request).await.is_empty());
}
