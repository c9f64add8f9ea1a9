use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid keyframe path: {0}")]
    InvalidPath(String),

    #[error("Malformed frame token: {0:?}")]
    MalformedFrameToken(String),

    #[error("Stale tween completion for handle {0}")]
    StaleTweenCompletion(u64),

    #[error("Cell source error: {0}")]
    CellSource(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
