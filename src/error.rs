use thiserror::Error;

use crate::types::WidgetErrorKind;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Player not ready")]
    NotReady,

    #[error("Playback restricted due to safety settings")]
    Restricted,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Widget error: {0}")]
    Widget(WidgetErrorKind),

    #[error("Bridge error: {0}")]
    Bridge(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl serde::Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(self.to_string().as_ref())
    }
}

pub type AppResult<T> = Result<T, AppError>;
