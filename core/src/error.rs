use core::fmt;

/// Error type shared by the DOM-facing layers.
#[derive(Debug, Clone)]
pub enum Error {
    /// The DOM APIs are not accessible (e.g., when executed outside of a browser).
    DomUnavailable,
    /// The provided string is not a usable HTML fragment.
    InvalidMarkup(String),
    /// Wrapper around JavaScript exceptions.
    Js(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DomUnavailable => write!(f, "DOM is not available"),
            Self::InvalidMarkup(markup) => {
                write!(f, "cannot create an element from markup `{markup}`")
            }
            Self::Js(msg) => write!(f, "JavaScript error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for Error {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        value
            .as_string()
            .map_or_else(|| Self::Js(format!("{value:?}")), Self::Js)
    }
}

#[cfg(target_arch = "wasm32")]
impl From<Error> for wasm_bindgen::JsValue {
    fn from(value: Error) -> Self {
        Self::from(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_failure() {
        assert_eq!(Error::DomUnavailable.to_string(), "DOM is not available");
        assert_eq!(
            Error::InvalidMarkup("oops".into()).to_string(),
            "cannot create an element from markup `oops`"
        );
        assert_eq!(
            Error::Js("boom".into()).to_string(),
            "JavaScript error: boom"
        );
    }
}
