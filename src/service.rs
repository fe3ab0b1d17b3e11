use reqwest::Method;
use reqwest::blocking::{Client as HttpClient, RequestBuilder};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::error::{Error, Result, format_service_error};

/// Header carrying the tenant zone on every request.
pub const ZONE_ID_HEADER: &str = "predix-zone-id";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// How the body of a GET response should be returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    #[default]
    Json,
    /// Raw body text, used for endpoints such as analytic logs.
    Text,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Json(Value),
    Text(String),
}

impl Response {
    /// Returns the JSON body, parsing it if the service handed back text.
    pub fn into_json(self, url: &Url) -> Result<Value> {
        match self {
            Response::Json(v) => Ok(v),
            Response::Text(t) => parse_json(url, &t),
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Response::Json(v) => v.to_string(),
            Response::Text(t) => t,
        }
    }
}

/// The HTTP calls the catalog issues. Implemented by [`HttpService`]; tests
/// and callers with their own transport can provide another implementation.
pub trait Service {
    fn get(&self, url: &Url, format: ResponseFormat) -> Result<Response>;
    fn post(&self, url: &Url, body: &Value) -> Result<Value>;
    fn put(&self, url: &Url, body: &Value) -> Result<Value>;
}

/// Supplies bearer tokens for outgoing requests.
///
/// Obtaining and refreshing tokens (e.g. against UAA) is up to the
/// implementation; the service only asks for the current one.
pub trait TokenProvider: Send + Sync {
    fn bearer_token(&self) -> anyhow::Result<String>;
}

/// A fixed token, e.g. one handed over by a platform sidecar.
#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl std::fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("StaticToken(..)")
    }
}

impl TokenProvider for StaticToken {
    fn bearer_token(&self) -> anyhow::Result<String> {
        Ok(self.0.clone())
    }
}

/// Blocking HTTP implementation of [`Service`] bound to one zone.
#[derive(Clone)]
pub struct HttpService {
    zone_id: String,
    timeout: Duration,
    verify: bool,
    token: Option<Arc<dyn TokenProvider>>,

    http: HttpClient,
}

impl std::fmt::Debug for HttpService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpService")
            .field("zone_id", &self.zone_id)
            .field("timeout", &self.timeout)
            .field("verify", &self.verify)
            .field("token", &self.token.as_ref().map(|_| ".."))
            .finish()
    }
}

impl HttpService {
    pub fn new(zone_id: impl Into<String>) -> Result<Self> {
        let zone_id = zone_id.into();
        let http = build_http(&zone_id, DEFAULT_TIMEOUT, true)?;

        Ok(Self {
            zone_id,
            timeout: DEFAULT_TIMEOUT,
            verify: true,
            token: None,
            http,
        })
    }

    pub fn zone_id(&self) -> &str {
        &self.zone_id
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.http = build_http(&self.zone_id, timeout, self.verify)?;
        self.timeout = timeout;
        Ok(self)
    }

    /// Whether to verify TLS certificates.
    pub fn with_verify(mut self, verify: bool) -> Result<Self> {
        self.http = build_http(&self.zone_id, self.timeout, verify)?;
        self.verify = verify;
        Ok(self)
    }

    pub fn with_token_provider(mut self, provider: impl TokenProvider + 'static) -> Self {
        self.token = Some(Arc::new(provider));
        self
    }

    fn apply_auth(&self, req: RequestBuilder) -> Result<RequestBuilder> {
        match &self.token {
            Some(provider) => {
                let token = provider.bearer_token().map_err(Error::Token)?;
                Ok(req.header(AUTHORIZATION, format!("Bearer {}", token.trim())))
            }
            None => Ok(req),
        }
    }

    fn send(&self, method: Method, url: &Url, body: Option<&Value>) -> Result<String> {
        tracing::debug!(%method, %url, "sending catalog request");

        let req = self.http.request(method.clone(), url.clone());
        let mut req = self.apply_auth(req)?;
        if let Some(body) = body {
            req = req.json(body);
        }
        let resp = req.send()?;

        let status = resp.status();
        let text = resp.text()?;
        tracing::debug!(%method, %url, %status, "received catalog response");

        if !status.is_success() {
            tracing::warn!(%method, %url, %status, "catalog request failed");
            return Err(format_service_error(status, url.as_str(), &text));
        }

        Ok(text)
    }
}

fn build_http(zone_id: &str, timeout: Duration, verify: bool) -> Result<HttpClient> {
    let mut default_headers = HeaderMap::new();
    default_headers.insert(
        USER_AGENT,
        HeaderValue::from_str(&format!("predix-analytics-rs/{}", env!("CARGO_PKG_VERSION")))
            .unwrap_or(HeaderValue::from_static("predix-analytics-rs")),
    );
    let zone = HeaderValue::from_str(zone_id).map_err(|_| {
        Error::InvalidArgument(format!("zone id is not a valid header value: {:?}", zone_id))
    })?;
    default_headers.insert(ZONE_ID_HEADER, zone);

    let mut builder = HttpClient::builder()
        .default_headers(default_headers)
        .timeout(timeout);

    if !verify {
        builder = builder.danger_accept_invalid_certs(true);
    }

    Ok(builder.build()?)
}

fn parse_json(url: &Url, text: &str) -> Result<Value> {
    // Some endpoints acknowledge with an empty 2xx body.
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|source| Error::Decode {
        url: url.to_string(),
        source,
    })
}

impl Service for HttpService {
    fn get(&self, url: &Url, format: ResponseFormat) -> Result<Response> {
        let text = self.send(Method::GET, url, None)?;
        match format {
            ResponseFormat::Json => parse_json(url, &text).map(Response::Json),
            ResponseFormat::Text => Ok(Response::Text(text)),
        }
    }

    fn post(&self, url: &Url, body: &Value) -> Result<Value> {
        let text = self.send(Method::POST, url, Some(body))?;
        parse_json(url, &text)
    }

    fn put(&self, url: &Url, body: &Value) -> Result<Value> {
        let text = self.send(Method::PUT, url, Some(body))?;
        parse_json(url, &text)
    }
}
