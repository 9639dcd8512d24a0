use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MountError {
    #[error("no window available")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    #[error("missing element: {0}")]
    MissingElement(&'static str),

    #[error("JS error: {0}")]
    Js(String),
}

impl MountError {
    /// Missing markup is expected on pages that don't carry every widget.
    pub fn is_missing_markup(&self) -> bool {
        matches!(self, MountError::MissingElement(_))
    }
}

impl From<JsValue> for MountError {
    fn from(value: JsValue) -> Self {
        MountError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

pub type Result<T> = std::result::Result<T, MountError>;
