//! Response classification.
//!
//! The decoder is chosen from the response's content-type header and the
//! decoded body is handed back as a tagged union, so callers handle every
//! shape exhaustively instead of sniffing dynamic types.

/// The decoder selected for a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// `application/json` content, parsed into a JSON value.
    Json,
    /// Any `text` content, decoded to a string.
    Text,
    /// XML content, parsed into a document.
    Xml,
    /// Everything else, handed over as raw bytes.
    Binary,
}

impl Kind {
    /// Classifies a content-type header value. A missing header falls back
    /// to binary.
    #[must_use]
    pub fn from_content_type(header: Option<&str>) -> Self {
        let Some(content_type) = header else {
            return Self::Binary;
        };
        let content_type = content_type.to_ascii_lowercase();
        if content_type.contains("application/json") {
            Self::Json
        } else if content_type.contains("text") {
            Self::Text
        } else if content_type.contains("xml") {
            Self::Xml
        } else {
            Self::Binary
        }
    }
}

/// A decoded response body.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub enum Body {
    /// A parsed JSON value.
    Json(serde_json::Value),
    /// A decoded text body.
    Text(String),
    /// A parsed XML document.
    Xml(web_sys::Document),
    /// Raw response bytes.
    Binary(Vec<u8>),
}

/// A successful response: the HTTP status plus the decoded body.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code.
    pub status: u16,
    /// The decoded body.
    pub body: Body,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_wins_over_everything() {
        assert_eq!(
            Kind::from_content_type(Some("application/json; charset=utf-8")),
            Kind::Json
        );
    }

    #[test]
    fn any_text_type_decodes_to_a_string() {
        assert_eq!(Kind::from_content_type(Some("text/html")), Kind::Text);
        assert_eq!(Kind::from_content_type(Some("text/plain")), Kind::Text);
        // `text/xml` advertises itself as text first.
        assert_eq!(Kind::from_content_type(Some("text/xml")), Kind::Text);
    }

    #[test]
    fn xml_without_a_text_prefix_is_parsed() {
        assert_eq!(
            Kind::from_content_type(Some("application/xml")),
            Kind::Xml
        );
        assert_eq!(
            Kind::from_content_type(Some("image/svg+xml")),
            Kind::Xml
        );
    }

    #[test]
    fn anything_else_is_binary() {
        assert_eq!(
            Kind::from_content_type(Some("application/octet-stream")),
            Kind::Binary
        );
        assert_eq!(Kind::from_content_type(Some("image/png")), Kind::Binary);
        assert_eq!(Kind::from_content_type(None), Kind::Binary);
    }

    #[test]
    fn classification_ignores_case() {
        assert_eq!(
            Kind::from_content_type(Some("Application/JSON")),
            Kind::Json
        );
    }
}
