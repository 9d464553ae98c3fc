use thiserror::Error;

/// Failure while fetching or decoding one progress snapshot.
///
/// The polling loop treats every variant the same way: logged, then the
/// next poll proceeds on schedule. No variant aborts a session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PollError {
    #[error("invalid base url: {0}")]
    InvalidUrl(String),
    #[error("http status {0}")]
    HttpStatus(u16),
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("invalid progress payload: {0}")]
    InvalidBody(String),
}
