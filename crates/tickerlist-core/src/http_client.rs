use std::collections::VecDeque;
use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;

/// GET request envelope used by the fetchers.
///
/// Query parameters are kept apart from the URL so that logs and error
/// messages can show the endpoint without leaking the API key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            query: Vec::new(),
        }
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((name.into(), value.to_string()));
        self
    }

    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// URL with every query parameter percent-encoded and appended.
    pub fn full_url(&self) -> String {
        if self.query.is_empty() {
            return self.url.clone();
        }

        let encoded = self
            .query
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    urlencoding::encode(key),
                    urlencoding::encode(value)
                )
            })
            .collect::<Vec<_>>()
            .join("&");
        let separator = if self.url.contains('?') { '&' } else { '?' };
        format!("{}{separator}{encoded}", self.url)
    }

    /// URL without its query string, safe to log.
    pub fn endpoint(&self) -> &str {
        self.url
            .split_once('?')
            .map_or(self.url.as_str(), |(path, _)| path)
    }
}

/// HTTP response envelope returned by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok_json(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn with_status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Transport-level HTTP error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpError {
    message: String,
}

impl HttpError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for HttpError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for HttpError {}

/// Transport contract used by every fetcher.
pub trait HttpClient: Send + Sync {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>>;
}

/// Production HTTP client backed by reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(concat!("tickerlist/", env!("CARGO_PKG_VERSION")))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for ReqwestHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        Box::pin(async move {
            // reqwest embeds the full URL in its errors; strip it so the key stays out of logs.
            let response = self.client.get(request.full_url()).send().await.map_err(|e| {
                let e = e.without_url();
                if e.is_timeout() {
                    HttpError::new(format!("request timeout: {e}"))
                } else if e.is_connect() {
                    HttpError::new(format!("connection failed: {e}"))
                } else if e.is_builder() {
                    HttpError::new(format!("invalid request: {e}"))
                } else {
                    HttpError::new(format!("request failed: {e}"))
                }
            })?;

            let status = response.status().as_u16();
            let body = response.text().await.map_err(|e| {
                HttpError::new(format!("failed to read response body: {}", e.without_url()))
            })?;

            Ok(HttpResponse { status, body })
        })
    }
}

/// Offline transport that replays canned responses in order and records
/// every request it receives.
#[derive(Debug, Default)]
pub struct ScriptedHttpClient {
    responses: Mutex<VecDeque<Result<HttpResponse, HttpError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, response: HttpResponse) -> Self {
        self.push(Ok(response));
        self
    }

    pub fn with_json(self, body: impl Into<String>) -> Self {
        self.with_response(HttpResponse::ok_json(body))
    }

    pub fn with_error(self, error: HttpError) -> Self {
        self.push(Err(error));
        self
    }

    fn push(&self, entry: Result<HttpResponse, HttpError>) {
        if let Ok(mut responses) = self.responses.lock() {
            responses.push_back(entry);
        }
    }

    /// Requests received so far, in call order.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    pub fn remaining(&self) -> usize {
        self.responses
            .lock()
            .map(|responses| responses.len())
            .unwrap_or_default()
    }
}

impl HttpClient for ScriptedHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }
        let next = self
            .responses
            .lock()
            .ok()
            .and_then(|mut responses| responses.pop_front());

        Box::pin(async move {
            next.unwrap_or_else(|| Err(HttpError::new("no scripted response left")))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_url_encodes_query_parameters() {
        let request = HttpRequest::get("https://example.test/stocks/list")
            .with_query("apiKey", "a b&c")
            .with_query("page", 2);

        assert_eq!(
            request.full_url(),
            "https://example.test/stocks/list?apiKey=a%20b%26c&page=2"
        );
    }

    #[test]
    fn full_url_extends_existing_query_string() {
        let request = HttpRequest::get("https://example.test/v3/reference/tickers?cursor=abc")
            .with_query("apiKey", "demo");

        assert_eq!(
            request.full_url(),
            "https://example.test/v3/reference/tickers?cursor=abc&apiKey=demo"
        );
        assert_eq!(
            request.endpoint(),
            "https://example.test/v3/reference/tickers"
        );
    }

    #[test]
    fn request_is_url_plus_query() {
        let request = HttpRequest::get("https://example.test/v1/meta/exchanges")
            .with_query("apiKey", "demo");

        assert_eq!(
            request,
            HttpRequest {
                url: String::from("https://example.test/v1/meta/exchanges"),
                query: vec![(String::from("apiKey"), String::from("demo"))],
            }
        );
    }

    #[tokio::test]
    async fn scripted_client_replays_in_order_then_fails() {
        let client = ScriptedHttpClient::new()
            .with_json("{\"first\":true}")
            .with_response(HttpResponse::with_status(503, ""));

        let first = client
            .execute(HttpRequest::get("https://example.test/a"))
            .await
            .expect("first response");
        assert!(first.is_success());

        let second = client
            .execute(HttpRequest::get("https://example.test/b"))
            .await
            .expect("second response");
        assert_eq!(second.status, 503);

        let exhausted = client
            .execute(HttpRequest::get("https://example.test/c"))
            .await
            .expect_err("script is exhausted");
        assert_eq!(exhausted.message(), "no scripted response left");
        assert_eq!(client.requests().len(), 3);
    }
}
