mod envelope;
mod error;
mod role;
mod session;
mod user;

pub use envelope::{ApiResponse, AuthResponse, LoginRequest, RegisterRequest};
pub use error::{Error, ErrorKind, Result};
pub use role::{Filter, Role};
pub use session::{SESSION_COOKIE_NAME, UserSession, decode_session, encode_session};
pub use user::{SessionUser, UserId, UserRecord};

#[doc(hidden)]
pub use anyhow::anyhow as internal_anyhow_dont_use;
