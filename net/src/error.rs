use core::fmt;

/// Error type produced by the request helper.
#[derive(Debug, Clone)]
pub enum Error {
    /// No URL was supplied in the request settings.
    MissingUrl,
    /// The `before_send` hook returned `false`.
    Aborted,
    /// The timeout elapsed before the network call settled.
    Timeout {
        /// The configured timeout in milliseconds.
        ms: u32,
    },
    /// The server answered with a non-2xx status.
    Http {
        /// The HTTP status code.
        status: u16,
        /// The response body text, when it could be read.
        body: Option<String>,
    },
    /// The network call itself failed.
    Transport(String),
    /// The response body could not be decoded as its advertised type.
    Decode(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingUrl => write!(f, "a URL is required for the request"),
            Self::Aborted => write!(f, "request aborted by the before-send hook"),
            Self::Timeout { ms } => write!(f, "request timed out after {ms}ms"),
            Self::Http { status, .. } => write!(f, "HTTP error, status {status}"),
            Self::Transport(msg) => write!(f, "network error: {msg}"),
            Self::Decode(msg) => write!(f, "failed to decode response: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for Error {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        value
            .as_string()
            .map_or_else(|| Self::Transport(format!("{value:?}")), Self::Transport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_descriptive() {
        assert_eq!(
            Error::MissingUrl.to_string(),
            "a URL is required for the request"
        );
        assert_eq!(
            Error::Timeout { ms: 250 }.to_string(),
            "request timed out after 250ms"
        );
        assert_eq!(
            Error::Http {
                status: 503,
                body: None
            }
            .to_string(),
            "HTTP error, status 503"
        );
    }
}
