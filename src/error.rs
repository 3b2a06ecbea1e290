use thiserror::Error;

/// Failures while wiring the game to the page. None of these are retried;
/// the stage reports them and never starts its frame loop.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    #[error("no global `window` exists")]
    NoWindow,
    #[error("canvas element is not mounted")]
    CanvasMissing,
    #[error("2d drawing context unavailable")]
    ContextUnavailable,
    #[error("failed to load sprite image `{0}`")]
    AssetLoad(String),
    #[error("browser call failed: {0}")]
    Host(String),
}

impl From<wasm_bindgen::JsValue> for GameError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        GameError::Host(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}
