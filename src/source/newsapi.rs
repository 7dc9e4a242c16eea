//! newsapi.org source.
//!
//! Queries the `v2/everything` search endpoint with the topic as the query
//! string and decodes the JSON response with [`serde`].

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use super::{Article, DataSource};

/// Endpoint used when no override is configured.
pub const DEFAULT_ENDPOINT: &str = "https://newsapi.org/v2/everything";

/// Query used when no topic is selected; the endpoint requires one.
const DEFAULT_QUERY: &str = "technology";

#[derive(Debug, Deserialize)]
struct Response {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    articles: Vec<RawArticle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArticle {
    #[serde(default)]
    source: RawSource,
    title: Option<String>,
    description: Option<String>,
    content: Option<String>,
    url: Option<String>,
    published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Deserialize)]
struct RawSource {
    name: Option<String>,
}

/// Search-backed source for newsapi.org.
pub struct NewsApiSource {
    pub endpoint: String,
    api_key: String,
    client: reqwest::blocking::Client,
}

impl NewsApiSource {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT, api_key)
    }

    pub fn with_endpoint(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            client: reqwest::blocking::Client::new(),
        }
    }

    /// Decode a response body into [`Article`]s.
    ///
    /// Pure so tests can feed canned JSON.  An `"error"` status is turned
    /// into an `Err` carrying the API's message.
    pub fn parse_response(json: &str) -> Result<Vec<Article>> {
        let resp: Response = serde_json::from_str(json).context("decoding news api response")?;
        if resp.status != "ok" {
            bail!(
                "news api returned {}: {}",
                resp.status,
                resp.message.as_deref().unwrap_or("no message")
            );
        }

        Ok(resp
            .articles
            .into_iter()
            .map(|raw| {
                let description = raw.description.unwrap_or_default();
                let body = raw.content.unwrap_or_else(|| description.clone());
                Article {
                    title: raw.title.unwrap_or_else(|| "(untitled)".into()),
                    source_name: raw.source.name.unwrap_or_else(|| "News API".into()),
                    description,
                    body,
                    link: raw.url,
                    published: raw.published_at,
                }
            })
            .collect())
    }
}

impl DataSource for NewsApiSource {
    fn name(&self) -> &str {
        "News API"
    }

    fn fetch(&self, topic: Option<&str>) -> Result<Vec<Article>> {
        let query = topic.unwrap_or(DEFAULT_QUERY);
        let text = self
            .client
            .get(&self.endpoint)
            .query(&[("q", query), ("apiKey", self.api_key.as_str())])
            .send()
            .and_then(|resp| resp.error_for_status())
            .with_context(|| format!("requesting {}", self.endpoint))?
            .text()
            .with_context(|| format!("reading response from {}", self.endpoint))?;

        let articles = Self::parse_response(&text)?;
        debug!(query, count = articles.len(), "news api search complete");
        Ok(articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Serve one canned HTTP response on a local port and return its URL.
    fn serve_once(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf);
            stream.write_all(response.as_bytes()).unwrap();
        });
        format!("http://{addr}/v2/everything")
    }

    #[test]
    fn parse_response_maps_fields() {
        let json = r#"{
            "status": "ok",
            "totalResults": 2,
            "articles": [
                {
                    "source": {"id": null, "name": "Space News"},
                    "title": "Starship flies",
                    "description": "Historic launch",
                    "content": "SpaceX has launched...",
                    "url": "https://example.com/starship",
                    "publishedAt": "2024-03-14T12:00:00Z"
                },
                {
                    "source": {"name": null},
                    "title": null,
                    "description": "Only a description",
                    "content": null,
                    "url": null,
                    "publishedAt": null
                }
            ]
        }"#;

        let items = NewsApiSource::parse_response(json).unwrap();
        assert_eq!(items.len(), 2);

        assert_eq!(items[0].title, "Starship flies");
        assert_eq!(items[0].source_name, "Space News");
        assert_eq!(items[0].body, "SpaceX has launched...");
        assert_eq!(items[0].link.as_deref(), Some("https://example.com/starship"));
        assert!(items[0].published.is_some());

        assert_eq!(items[1].title, "(untitled)");
        assert_eq!(items[1].source_name, "News API");
        assert_eq!(items[1].body, "Only a description");
    }

    #[test]
    fn parse_response_surfaces_api_errors() {
        let json = r#"{"status":"error","code":"apiKeyInvalid","message":"Your API key is invalid."}"#;
        let err = NewsApiSource::parse_response(json).unwrap_err();
        assert!(err.to_string().contains("Your API key is invalid."));
    }

    #[test]
    fn parse_response_accepts_zero_results() {
        let json = r#"{"status":"ok","totalResults":0,"articles":[]}"#;
        assert!(NewsApiSource::parse_response(json).unwrap().is_empty());
    }

    #[test]
    fn parse_response_rejects_garbage() {
        assert!(NewsApiSource::parse_response("<html>").is_err());
    }

    #[test]
    fn fetch_reports_http_status_instead_of_decode_error() {
        let url = serve_once(
            "HTTP/1.1 503 Service Unavailable\r\nContent-Type: text/html\r\nContent-Length: 13\r\nConnection: close\r\n\r\n<html></html>",
        );
        let src = NewsApiSource::with_endpoint(url, "key");

        let err = format!("{:#}", src.fetch(Some("rust")).unwrap_err());
        assert!(err.contains("503"), "unexpected error: {err}");
        assert!(!err.contains("decoding"), "unexpected error: {err}");
    }

    #[test]
    fn fetch_decodes_a_successful_response() {
        let body = r#"{"status":"ok","articles":[{"title":"Hit","description":"d"}]}"#;
        let response: &'static str = Box::leak(
            format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            )
            .into_boxed_str(),
        );
        let src = NewsApiSource::with_endpoint(serve_once(response), "key");

        let items = src.fetch(None).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Hit");
    }
}
