use std::fmt;

/// Failure of a single component request. Every variant is local to one user
/// interaction and never affects the next one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppError {
    Network(String),
    Timeout(String),
    Http { status: u16, message: String },
    Parse(String),
    Serialization(String),
}

impl AppError {
    /// HTTP status of a non-success response, if this error carries one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Network(message) => write!(formatter, "Network error: {message}"),
            AppError::Timeout(message) => write!(formatter, "Timeout: {message}"),
            AppError::Http { status, message } => {
                write!(formatter, "Request failed ({status}): {message}")
            }
            AppError::Parse(message) => write!(formatter, "Response error: {message}"),
            AppError::Serialization(message) => {
                write!(formatter, "Request error: {message}")
            }
        }
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::AppError;

    #[test]
    fn display_includes_status() {
        let err = AppError::Http {
            status: 400,
            message: "bad input".to_string(),
        };
        assert_eq!(err.to_string(), "Request failed (400): bad input");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn transport_errors_have_no_status() {
        assert_eq!(AppError::Network("refused".to_string()).status(), None);
        assert_eq!(AppError::Timeout("slow".to_string()).status(), None);
    }
}
