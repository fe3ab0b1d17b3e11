use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors returned by the catalog client and its HTTP service.
#[derive(Debug, Error)]
pub enum Error {
    /// A required setting was neither passed explicitly nor found in the environment.
    #[error("{key} environment unset")]
    MissingConfiguration { key: String },

    #[error("{0}")]
    InvalidArgument(String),

    /// A method restricted to one catalog type was called on another.
    #[error("function '{function}' can only be invoked on a {attribute} of {required}")]
    CapabilityMismatch {
        function: &'static str,
        attribute: &'static str,
        required: String,
    },

    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("API request failed: HTTP {status} for url ({url})\n{message}")]
    Api {
        status: StatusCode,
        url: String,
        message: String,
    },

    #[error("HTTP transport error")]
    Transport(#[from] reqwest::Error),

    #[error("failed to parse API JSON (url={url})")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to obtain bearer token")]
    Token(#[source] anyhow::Error),
}

/// Error payloads seen from the UAA-protected services; fields vary by endpoint.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct ServiceErrorResponse {
    #[serde(default)]
    pub(crate) message: Option<String>,
    #[serde(default)]
    pub(crate) error: Option<String>,
    #[serde(default)]
    pub(crate) error_description: Option<String>,
    #[serde(default)]
    pub(crate) detail: Option<String>,
}

pub(crate) fn format_service_error(status: StatusCode, url: &str, body: &str) -> Error {
    let message = match serde_json::from_str::<ServiceErrorResponse>(body) {
        Ok(e) => {
            let title = e
                .message
                .as_deref()
                .or(e.error_description.as_deref())
                .or(e.error.as_deref())
                .unwrap_or("");
            let detail = e.detail.as_deref().unwrap_or("");
            match (title.is_empty(), detail.is_empty()) {
                (true, true) => body.to_string(),
                (false, true) => title.to_string(),
                (true, false) => detail.to_string(),
                (false, false) => format!("{}\n{}", title, detail),
            }
        }
        Err(_) => body.to_string(),
    };

    // Token problems are the usual cause of 401/403; provide explicit remediation.
    let message = if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        format!(
            "authentication/authorization failed.\n- Check that the bearer token was issued for this zone\n- Ensure the token is not expired\n\nServer message: {}",
            if message.is_empty() { "(none)" } else { &message }
        )
    } else {
        message
    };

    Error::Api {
        status,
        url: url.to_string(),
        message,
    }
}
