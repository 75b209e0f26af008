//! Resource Loader
//!
//! HTTP GET requests for stylesheets and font files. The blocking reqwest
//! client runs on smol's blocking thread pool so callers stay async.

use std::collections::HashMap;
use std::time::Duration;

use crate::{NetError, Response, Result};

/// Loader configuration
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// User agent string. A plain, non-browser agent makes the css2 API
    /// answer with TrueType sources, which the font database can load.
    pub user_agent: String,
    /// Connection timeout
    pub connect_timeout: Duration,
    /// Whole-request timeout
    pub request_timeout: Duration,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("typecase/{}", env!("CARGO_PKG_VERSION")),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl LoaderConfig {
    pub fn user_agent(mut self, ua: &str) -> Self {
        self.user_agent = ua.to_string();
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// GET request configuration
#[derive(Debug, Default, Clone)]
pub struct Request {
    pub url: String,
    pub headers: HashMap<String, String>,
}

impl Request {
    pub fn get(url: &str) -> Self {
        Self {
            url: url.to_string(),
            ..Default::default()
        }
    }

    /// Stylesheet request with a CSS `Accept` header
    pub fn stylesheet(url: &str) -> Self {
        Self::get(url).with_header("Accept", "text/css,*/*;q=0.1")
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }
}

/// Load resources from network
#[derive(Debug, Clone)]
pub struct ResourceLoader {
    client: reqwest::blocking::Client,
}

impl ResourceLoader {
    pub fn new() -> Result<Self> {
        Self::with_config(LoaderConfig::default())
    }

    pub fn with_config(config: LoaderConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent)
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| NetError::Network(e.to_string()))?;

        Ok(Self { client })
    }

    /// Fetch a URL with GET
    pub async fn fetch(&self, url: &str) -> Result<Response> {
        self.request(Request::get(url)).await
    }

    /// Perform a request. Non-2xx statuses are errors.
    pub async fn request(&self, req: Request) -> Result<Response> {
        tracing::info!("HTTP GET {}", req.url);

        let client = self.client.clone();
        let response = smol::unblock(move || send_blocking(&client, req)).await?;

        if !response.is_success() {
            return Err(NetError::HttpError { status: response.status });
        }
        Ok(response)
    }
}

fn send_blocking(client: &reqwest::blocking::Client, req: Request) -> Result<Response> {
    let mut builder = client.get(&req.url);
    for (name, value) in &req.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }

    let response = builder.send().map_err(|e| NetError::Network(e.to_string()))?;
    let status = response.status().as_u16();
    let body = response.bytes().map_err(|e| NetError::Network(e.to_string()))?.to_vec();

    Ok(Response { status, body })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let req = Request::stylesheet("https://fonts.googleapis.com/css2?family=Inter");
        assert_eq!(req.url, "https://fonts.googleapis.com/css2?family=Inter");
        assert_eq!(req.headers.get("Accept").unwrap(), "text/css,*/*;q=0.1");
    }

    #[test]
    fn test_config_builder() {
        let config = LoaderConfig::default()
            .user_agent("TestAgent/1.0")
            .request_timeout(Duration::from_secs(5));
        assert_eq!(config.user_agent, "TestAgent/1.0");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert!(LoaderConfig::default().user_agent.starts_with("typecase/"));
    }

    #[test]
    fn test_response_helpers() {
        let response = Response {
            status: 200,
            body: b"@font-face {}".to_vec(),
        };
        assert!(response.is_success());
        assert_eq!(response.text().unwrap(), "@font-face {}");
        assert!(!Response { status: 404, body: vec![] }.is_success());
    }

    #[test]
    fn test_unreachable_host_is_error() {
        let loader = ResourceLoader::with_config(
            LoaderConfig::default().connect_timeout(Duration::from_millis(200)),
        ).unwrap();
        let result = smol::block_on(loader.fetch("http://127.0.0.1:9/unreachable.css"));
        assert!(matches!(result, Err(NetError::Network(_))));
    }
}
