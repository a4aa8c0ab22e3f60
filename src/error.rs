use thiserror::Error;
use wasm_bindgen::JsValue;

pub type Result<T> = std::result::Result<T, EnhanceError>;

#[derive(Debug, Error)]
pub enum EnhanceError {
    #[error("no window or document available")]
    NoWindow,

    #[error("element not found: {selector}")]
    MissingElement { selector: String },

    /// A DOM call rejected with a JS exception.
    #[error("javascript call failed: {0}")]
    Js(String),

    #[error(transparent)]
    Config(#[from] serde_json::Error),
}

impl From<JsValue> for EnhanceError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value));
        EnhanceError::Js(message)
    }
}

impl EnhanceError {
    pub fn missing(selector: &str) -> Self {
        EnhanceError::MissingElement {
            selector: selector.to_string(),
        }
    }
}
