use thiserror::Error;

#[derive(Debug, Error)]
pub enum WheelError {
    #[error("invalid wheel configuration: {0}")]
    Config(String),

    #[error("invalid prize list: {0}")]
    Segments(String),

    #[error("invalid milestone list: {0}")]
    Milestones(String),

    #[error("invalid milestone progress: {0}")]
    Progress(String),

    #[error("invalid reset timestamp `{0}`")]
    ResetTimestamp(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("unreadable response body: {0}")]
    Body(String),
}

impl From<serde_json::Error> for WheelError {
    fn from(err: serde_json::Error) -> Self {
        WheelError::Body(err.to_string())
    }
}
