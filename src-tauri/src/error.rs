use thiserror::Error;

#[derive(Debug, Error)]
pub enum ForgeMateError {
    /// Covers file I/O, XML parse, and XML serialize failures in the
    /// preference save path.
    #[error("Preferences error: {0}")]
    Preferences(String),
}

impl From<ForgeMateError> for String {
    fn from(err: ForgeMateError) -> Self {
        err.to_string()
    }
}
