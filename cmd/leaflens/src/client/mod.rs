use anyhow::{Context, Result};
use leaflens_core::{LeafError, LeafResult};
use reqwest::{Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use std::time::{Duration, Instant};
use tracing::debug;

/// JSON-over-HTTP client bound to one provider.
///
/// Failures are reported as `LeafError`s tagged with the provider name so
/// the orchestrators can log and recover per provider.
pub struct ApiClient {
    provider: &'static str,
    base_url: String,
    client: Client,
    timeout: Duration,
    headers: Vec<(&'static str, String)>,
}

impl ApiClient {
    pub fn new(provider: &'static str, base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            provider,
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout,
            headers: Vec::new(),
        })
    }

    /// Send `name: value` with every request
    pub fn with_header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    pub fn provider(&self) -> &'static str {
        self.provider
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> LeafResult<T> {
        let request = self.client.get(self.url(path)).query(query);
        self.send(request).await
    }

    pub async fn post<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> LeafResult<R> {
        let request = self.client.post(self.url(path)).json(body);
        self.send(request).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, mut request: RequestBuilder) -> LeafResult<T> {
        for (name, value) in &self.headers {
            request = request.header(*name, value);
        }

        let started = Instant::now();
        let response = request.send().await.map_err(|e| self.transport_error(e))?;
        debug!(
            provider = self.provider,
            status = response.status().as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Provider responded"
        );

        self.read(response).await
    }

    async fn read<T: DeserializeOwned>(&self, response: Response) -> LeafResult<T> {
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(LeafError::Status {
                provider: self.provider,
                status,
                body,
            });
        }

        let bytes = response.bytes().await.map_err(|e| self.transport_error(e))?;
        serde_json::from_slice(&bytes).map_err(|e| LeafError::malformed(self.provider, e.to_string()))
    }

    fn transport_error(&self, e: reqwest::Error) -> LeafError {
        if e.is_timeout() {
            LeafError::Timeout {
                provider: self.provider,
                after: self.timeout,
            }
        } else {
            LeafError::provider(self.provider, e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> ApiClient {
        ApiClient::new("test", &format!("{}/", server.uri()), Duration::from_secs(2)).unwrap()
    }

    #[tokio::test]
    async fn test_get_sends_headers_and_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/items"))
            .and(query_param("q", "fern"))
            .and(header("X-Key", "secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
            .expect(1)
            .mount(&server)
            .await;

        let body: Value = client(&server)
            .with_header("X-Key", "secret")
            .get("/items", &[("q", "fern")])
            .await
            .unwrap();
        assert_eq!(body["ok"], true);
    }

    #[tokio::test]
    async fn test_error_status_carries_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
            .mount(&server)
            .await;

        let err = client(&server)
            .post::<_, Value>("/items", &json!({}))
            .await
            .unwrap_err();
        match err {
            LeafError::Status { provider, status, body } => {
                assert_eq!(provider, "test");
                assert_eq!(status, 429);
                assert_eq!(body, "slow down");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_non_json_body_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = client(&server).get::<Value>("/", &[]).await.unwrap_err();
        assert!(matches!(err, LeafError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn test_slow_server_maps_to_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new("test", &server.uri(), Duration::from_millis(50)).unwrap();
        let err = client.get::<Value>("/", &[]).await.unwrap_err();
        assert!(err.is_timeout());
    }
}
