use wasm_bindgen::JsValue;

/// Errors surfaced by the effect engines and their browser glue.
///
/// None of these is fatal to the page: mount-time errors are returned to the
/// host, per-frame errors are logged and the frame is dropped.
#[derive(Debug, thiserror::Error)]
pub enum EffectError {
    #[error("drawing surface unavailable")]
    SurfaceUnavailable,
    #[error("browser window or document unavailable")]
    BrowserUnavailable,
    #[error("javascript error: {0}")]
    Js(String),
    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl EffectError {
    /// Wrap a thrown `JsValue`.
    #[must_use]
    pub fn js(value: &JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<JsValue> for EffectError {
    fn from(value: JsValue) -> Self {
        Self::js(&value)
    }
}
