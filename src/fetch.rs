//! Listing page fetch capability.
//!
//! The orchestrator only sees [`PageFetcher`]. [`HttpFetcher`] is the real
//! transport; [`MockFetcher`] serves canned bodies in tests.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use tracing::{debug, warn};

use crate::config::ExtractorConfig;
use crate::error::{FetchError, FetchResult};

/// Fetch one page body. A single attempt; errors are not retried.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> FetchResult<String>;
}

/// reqwest-backed fetcher sending browser-like identification headers.
pub struct HttpFetcher {
    client: reqwest::Client,
    headers: HeaderMap,
}

impl HttpFetcher {
    pub fn new(config: &ExtractorConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Use a caller-built client (custom timeout, proxy, ...).
    pub fn with_client(client: reqwest::Client, config: &ExtractorConfig) -> Self {
        let mut headers = HeaderMap::new();
        for (name, value) in [
            (USER_AGENT, &config.user_agent),
            (ACCEPT, &config.accept),
            (ACCEPT_LANGUAGE, &config.accept_language),
        ] {
            match HeaderValue::from_str(value) {
                Ok(v) => {
                    headers.insert(name, v);
                }
                Err(_) => warn!(header = %name, "Skipping header with invalid characters"),
            }
        }
        Self { client, headers }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<String> {
        debug!(url = %url, "HTTP fetch starting");
        let response = self
            .client
            .get(url)
            .headers(self.headers.clone())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        debug!(url = %url, bytes = body.len(), "HTTP fetch complete");
        Ok(body)
    }
}

enum Canned {
    Body(String),
    Fail(String),
}

/// Test fetcher with canned responses per URL.
///
/// Unknown URLs fail with [`FetchError::Other`]. Every requested URL is
/// recorded, so tests can assert on the built listing URL.
#[derive(Default)]
pub struct MockFetcher {
    responses: Arc<RwLock<HashMap<String, Canned>>>,
    requests: Arc<RwLock<Vec<String>>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `url`.
    pub fn with_page(self, url: impl Into<String>, body: impl Into<String>) -> Self {
        if let Ok(mut responses) = self.responses.write() {
            responses.insert(url.into(), Canned::Body(body.into()));
        }
        self
    }

    /// Fail requests for `url` with `reason`.
    pub fn with_failure(self, url: impl Into<String>, reason: impl Into<String>) -> Self {
        if let Ok(mut responses) = self.responses.write() {
            responses.insert(url.into(), Canned::Fail(reason.into()));
        }
        self
    }

    /// URLs requested so far, in call order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.read().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<String> {
        if let Ok(mut requests) = self.requests.write() {
            requests.push(url.to_string());
        }
        let responses = self
            .responses
            .read()
            .map_err(|_| FetchError::Other("mock state poisoned".into()))?;
        match responses.get(url) {
            Some(Canned::Body(body)) => Ok(body.clone()),
            Some(Canned::Fail(reason)) => Err(FetchError::Other(reason.clone())),
            None => Err(FetchError::Other(format!("no canned response for {}", url))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Accept one connection, answer with `status_line`, return the request head.
    async fn serve_once(status_line: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {}\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
                status_line
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            String::from_utf8_lossy(&request).to_lowercase()
        });
        (base, handle)
    }

    #[tokio::test]
    async fn test_mock_serves_and_records() {
        let mock = MockFetcher::new()
            .with_page("https://a.test/x", "<html></html>")
            .with_failure("https://a.test/y", "boom");

        assert_eq!(mock.fetch("https://a.test/x").await.unwrap(), "<html></html>");
        assert!(matches!(
            mock.fetch("https://a.test/y").await,
            Err(FetchError::Other(reason)) if reason == "boom"
        ));
        assert!(mock.fetch("https://a.test/z").await.is_err());
        assert_eq!(
            mock.requests(),
            vec!["https://a.test/x", "https://a.test/y", "https://a.test/z"]
        );
    }

    #[tokio::test]
    async fn test_http_fetch_connection_refused() {
        let fetcher = HttpFetcher::new(&ExtractorConfig::default());
        let result = fetcher.fetch("http://127.0.0.1:9/mumbai/restaurants").await;
        assert!(matches!(result, Err(FetchError::Request(_))));
    }

    #[tokio::test]
    async fn test_http_fetch_non_success_status() {
        let (base, server) = serve_once("404 Not Found").await;
        let fetcher = HttpFetcher::new(&ExtractorConfig::default());
        let url = format!("{}/mumbai/restaurants", base);

        let result = fetcher.fetch(&url).await;
        match result {
            Err(FetchError::Status { status, url: failed }) => {
                assert_eq!(status, 404);
                assert_eq!(failed, url);
            }
            other => panic!("expected status error, got {:?}", other),
        }

        let request = server.await.unwrap();
        assert!(request.starts_with("get /mumbai/restaurants http/1.1"));
        for (name, value) in [
            ("user-agent", crate::config::DEFAULT_USER_AGENT),
            ("accept", crate::config::DEFAULT_ACCEPT),
            ("accept-language", crate::config::DEFAULT_ACCEPT_LANGUAGE),
        ] {
            let line = format!("\r\n{}: {}\r\n", name, value.to_lowercase());
            assert!(request.contains(&line), "missing {} in {}", line.trim(), request);
        }
    }
}
