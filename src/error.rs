use thiserror::Error;
use wasm_bindgen::JsValue;

/// Fatal startup failures. The page cannot animate without these, so they are
/// reported once from the exported entrypoint instead of per frame.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("no global window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("no #{0} canvas element")]
    MissingCanvas(&'static str),
    #[error("2d context unavailable on #{0}")]
    NoContext(&'static str),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("browser call failed: {0}")]
    Js(String),
}

impl From<JsValue> for SetupError {
    fn from(value: JsValue) -> Self {
        SetupError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<SetupError> for JsValue {
    fn from(err: SetupError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("friction must be in [0, 1), got {0}")]
    Friction(f64),
    #[error("attraction gain must be in [0, {max}), got {value}")]
    Gain { value: f64, max: f64 },
    #[error("{field} must be finite and non-negative, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("alpha {field} must be in [0, 1], got {value}")]
    Alpha { field: &'static str, value: f64 },
    #[cfg(feature = "serde_json")]
    #[error("config json: {0}")]
    Json(String),
}
