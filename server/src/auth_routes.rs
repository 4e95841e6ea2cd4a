use axum::{
    Form, Router,
    http::header::SET_COOKIE,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use cookie::{Cookie, SameSite};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use types::{RegisterRequest, Result, Role, SESSION_COOKIE_NAME, UserSession};

use crate::{session_cookie, state};

pub fn auth_router() -> Router {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/logout", get(logout).post(logout))
}

#[derive(Deserialize)]
struct LoginForm {
    username: String,
    password: SecretString,
}

async fn login(Form(form): Form<LoginForm>) -> Response {
    let username = form.username.clone();

    match login_inner(form).await {
        Ok(cookie) => {
            tracing::info!(%username, "signed in");
            ([(SET_COOKIE, cookie)], Redirect::to("/")).into_response()
        }
        Err(error) => {
            tracing::warn!(%username, %error, "sign in failed");
            back_with_error("/login", &error.message).into_response()
        }
    }
}

/// Return to `page`, showing `message` through its `error` query parameter.
fn back_with_error(page: &str, message: &str) -> Redirect {
    // Percent-encoded, so spaces never turn into `+`.
    Redirect::to(&format!("{page}?error={}", urlencoding::encode(message)))
}

/// Authenticate against the user API and build the session cookie.
async fn login_inner(form: LoginForm) -> Result<String> {
    let state = state()?;

    let auth = state.backend.login(&form.username, &form.password).await?;
    let session = UserSession::from(auth);
    let token = session_cookie::seal(&session, &state.config.session_secret)?;

    Ok(Cookie::build((SESSION_COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config.secure_cookies)
        .build()
        .to_string())
}

#[derive(Deserialize)]
struct RegisterForm {
    username: String,
    email: String,
    password: SecretString,
    full_name: String,
    role: Role,
}

async fn register(Form(form): Form<RegisterForm>) -> Redirect {
    match register_inner(&form).await {
        Ok(message) => {
            tracing::info!(username = %form.username, role = %form.role, %message, "registered");
            Redirect::to("/login")
        }
        Err(error) => {
            tracing::warn!(username = %form.username, %error, "registration failed");
            back_with_error("/register", &error.message)
        }
    }
}

async fn register_inner(form: &RegisterForm) -> Result<String> {
    let state = state()?;

    state
        .backend
        .register(&RegisterRequest {
            username: &form.username,
            email: &form.email,
            password: form.password.expose_secret(),
            full_name: &form.full_name,
            role: form.role,
        })
        .await
}

async fn logout() -> impl IntoResponse {
    // Clear the session cookie
    let cookie = Cookie::build((SESSION_COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(cookie::time::Duration::ZERO)
        .build();

    tracing::info!("signed out");
    ([(SET_COOKIE, cookie.to_string())], Redirect::to("/login"))
}
