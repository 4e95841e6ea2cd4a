mod auth_routes;
mod backend;
mod config;
mod session_cookie;

use std::sync::OnceLock;

use axum::Router;
use axum::http::{HeaderMap, header::COOKIE};
use dioxus::fullstack::FullstackContext;
use secrecy::SecretString;
use tracing_subscriber::EnvFilter;
use types::{Error, Result, SESSION_COOKIE_NAME, UserSession, err};

use crate::auth_routes::auth_router;
pub use crate::backend::BackendClient;
pub use crate::config::Config;

struct State {
    config: Config,
    backend: BackendClient,
}

static STATE: OnceLock<State> = OnceLock::new();

/// Load configuration, connect the user API client and return the auth routes.
pub fn init() -> anyhow::Result<Router> {
    let config = Config::load()?;
    let backend = BackendClient::new(&config)?;

    tracing::info!(api_url = %config.api_url, "using user API");

    STATE
        .set(State { config, backend })
        .map_err(|_| anyhow::anyhow!("server already initialized"))?;

    Ok(auth_router())
}

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn state() -> Result<&'static State> {
    Ok(STATE.get().ok_or_else(|| err!("server is not initialized"))?)
}

pub fn backend() -> Result<&'static BackendClient> {
    Ok(&state()?.backend)
}

/// Extract the user session from the request cookie.
pub async fn get_session_from_cookie() -> Result<UserSession> {
    let headers: HeaderMap = FullstackContext::extract().await?;
    session_from_headers(&headers, &state()?.config.session_secret)
}

/// Find the session cookie among the request headers and verify it.
fn session_from_headers(headers: &HeaderMap, secret: &SecretString) -> Result<UserSession> {
    let mut cookies = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|header| header.split(';'))
        .map(str::trim)
        .peekable();

    if cookies.peek().is_none() {
        return Err(Error::unauthorized("no cookies in request"));
    }

    let token = cookies
        .find_map(|cookie| cookie.strip_prefix(SESSION_COOKIE_NAME)?.strip_prefix('='))
        .ok_or_else(|| Error::unauthorized("session cookie not found"))?;

    session_cookie::open(token, secret).map_err(|error| Error::unauthorized(error.message))
}

/// Require a signed-in user, returning their session.
pub async fn require_session() -> Result<UserSession> {
    get_session_from_cookie().await.map_err(|error| {
        tracing::debug!(%error, "rejecting request without a valid session");
        Error::unauthorized(error.message)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use types::{ErrorKind, Role, SessionUser};

    fn secret() -> SecretString {
        "cookie-signing-key".to_string().into()
    }

    fn session() -> UserSession {
        UserSession {
            user: SessionUser {
                id: 5,
                username: "sam".into(),
                full_name: "Sam Student".into(),
                role: Role::Student,
            },
            email: "sam@uni.edu".into(),
            access_token: "student-jwt".to_string().into(),
        }
    }

    fn headers(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    fn assert_unauthorized(headers: &HeaderMap) {
        let error = session_from_headers(headers, &secret()).unwrap_err();
        assert_eq!(error.kind, ErrorKind::Unauthorized, "{error}");
    }

    #[test]
    fn missing_cookie_header_is_unauthorized() {
        assert_unauthorized(&HeaderMap::new());
    }

    #[test]
    fn unrelated_cookies_are_unauthorized() {
        assert_unauthorized(&headers("theme=dark; useradmin_session_old=abc"));
    }

    #[test]
    fn tampered_cookie_is_unauthorized() {
        let token = session_cookie::seal(&session(), &secret()).unwrap();
        let (payload, signature) = token.split_once('.').unwrap();
        let tampered = format!("{payload}x.{signature}");

        assert_unauthorized(&headers(&format!("{SESSION_COOKIE_NAME}={tampered}")));
    }

    #[test]
    fn foreign_or_malformed_cookie_is_unauthorized() {
        let token = session_cookie::seal(&session(), &"another-key".to_string().into()).unwrap();
        assert_unauthorized(&headers(&format!("{SESSION_COOKIE_NAME}={token}")));
        assert_unauthorized(&headers(&format!("{SESSION_COOKIE_NAME}=not-a-session")));
    }

    #[test]
    fn valid_cookie_is_found_among_others() {
        let token = session_cookie::seal(&session(), &secret()).unwrap();
        let headers = headers(&format!("theme=dark; {SESSION_COOKIE_NAME}={token}; lang=en"));

        let found = session_from_headers(&headers, &secret()).unwrap();
        assert_eq!(found.user, session().user);
    }
}
