use super::client::HttpClient;
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;

/// An [`HttpClient`] wrapper that injects `Authorization: Bearer <token>`
/// into every request.
pub struct Bearer<C> {
    inner: C,
    header_value: String,
}

impl<C> Bearer<C> {
    pub fn new(inner: C, token: &str) -> Self {
        Self {
            inner,
            header_value: format!("Bearer {token}"),
        }
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for Bearer<C> {
    async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        let value = self
            .header_value
            .parse()
            .expect("bearer token produced an invalid header value");
        req.headers_mut().insert(AUTHORIZATION, value);
        self.inner.execute(req).await
    }
}
