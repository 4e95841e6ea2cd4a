use dioxus::prelude::ServerFnError;
use serde::{Deserialize, Serialize};

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// How a failed call should be treated by whoever receives it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Transport failures, server errors and unexpected responses.
    Network,
    /// No session, or the session is no longer accepted.
    Unauthorized,
    /// The session is valid but lacks permission (HTTP 403).
    Forbidden,
}

impl ErrorKind {
    pub fn status_code(self) -> u16 {
        match self {
            ErrorKind::Network => 502,
            ErrorKind::Unauthorized => 401,
            ErrorKind::Forbidden => 403,
        }
    }

    pub fn from_status_code(code: u16) -> Self {
        match code {
            401 => ErrorKind::Unauthorized,
            403 => ErrorKind::Forbidden,
            _ => ErrorKind::Network,
        }
    }
}

/// A serializable error for client rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Network, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    pub fn is_forbidden(&self) -> bool {
        self.kind == ErrorKind::Forbidden
    }

    /// Recover the kind of a server function failure from its status code.
    pub fn from_server_fn(err: &ServerFnError) -> Self {
        match err {
            ServerFnError::ServerError { message, code, .. } => {
                Self::new(ErrorKind::from_status_code(*code), message.clone())
            }
            other => Self::network(other.to_string()),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

// `Error` deliberately does not implement `std::error::Error`, which keeps this
// blanket conversion coherent.
impl<E> From<E> for Error
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        // The alternate Display includes the whole context chain.
        Self::network(format!("{:#}", err.into()))
    }
}

impl From<Error> for ServerFnError {
    fn from(err: Error) -> Self {
        ServerFnError::ServerError {
            message: err.message,
            code: err.kind.status_code(),
            details: None,
        }
    }
}

#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::internal_anyhow_dont_use!($($arg)*)
    };
}
