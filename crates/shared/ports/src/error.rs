use thiserror::Error;

/// Errors raised when arming or disarming a time source
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeSourceError {
    #[error("No async runtime available to drive the timer")]
    NoRuntime,

    #[error("Invalid timer interval: {0}")]
    InvalidInterval(String),
}

pub type TimeSourceResult<T> = std::result::Result<T, TimeSourceError>;
