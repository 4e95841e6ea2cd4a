use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use types::{
    ApiResponse, AuthResponse, Error, LoginRequest, RegisterRequest, Result, Role, UserId,
    UserRecord,
};

use crate::Config;

trait ReqwestExt {
    async fn try_send<T: DeserializeOwned>(self) -> Result<T>;
}

impl ReqwestExt for RequestBuilder {
    async fn try_send<T: DeserializeOwned>(self) -> Result<T> {
        let response = self.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        match serde_json::from_slice(&body) {
            Ok(r) => Ok(r),
            Err(error) => {
                tracing::debug!(%error, %status, "failed to parse response");
                Err(error.into())
            }
        }
    }
}

/// Map a non-success response to an error, keeping the backend's message if
/// it sent one.
fn status_error(status: StatusCode, body: &[u8]) -> Error {
    let message = serde_json::from_slice::<ApiResponse<serde_json::Value>>(body)
        .ok()
        .map(|envelope| envelope.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| format!("user API responded with {status}"));

    match status {
        StatusCode::UNAUTHORIZED => Error::unauthorized(message),
        StatusCode::FORBIDDEN => Error::forbidden(message),
        _ => Error::network(message),
    }
}

/// Client for the remote user management API.
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: Url,
}

impl BackendClient {
    pub fn new(config: &Config) -> reqwest::Result<Self> {
        let client = Client::builder().timeout(config.request_timeout()).build()?;

        // Endpoints are joined relative to the base, so it must end in a slash
        // to keep any path prefix.
        let mut base_url = config.api_url.clone();
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    fn request(&self, method: Method, path: &str, token: &SecretString) -> Result<RequestBuilder> {
        Ok(self
            .client
            .request(method, self.endpoint(path)?)
            .bearer_auth(token.expose_secret()))
    }

    pub async fn login(&self, username: &str, password: &SecretString) -> Result<AuthResponse> {
        self.client
            .post(self.endpoint("api/auth/login")?)
            .json(&LoginRequest {
                username,
                password: password.expose_secret(),
            })
            .try_send()
            .await
    }

    /// Create an account, returning the API's confirmation message.
    pub async fn register(&self, request: &RegisterRequest<'_>) -> Result<String> {
        let response = self
            .client
            .post(self.endpoint("api/auth/register")?)
            .json(request)
            .try_send::<ApiResponse<serde_json::Value>>()
            .await?;
        let message = response.message.clone();

        response.into_result().map(|_| message)
    }

    pub async fn list_users(&self, token: &SecretString) -> Result<Vec<UserRecord>> {
        self.request(Method::GET, "api/users", token)?
            .try_send::<ApiResponse<Vec<UserRecord>>>()
            .await?
            .into_data()
    }

    pub async fn list_users_by_role(
        &self,
        token: &SecretString,
        role: Role,
    ) -> Result<Vec<UserRecord>> {
        self.request(Method::GET, &format!("api/users/role/{role}"), token)?
            .try_send::<ApiResponse<Vec<UserRecord>>>()
            .await?
            .into_data()
    }

    pub async fn delete_user(&self, token: &SecretString, id: UserId) -> Result<()> {
        self.request(Method::DELETE, &format!("api/users/{id}"), token)?
            .try_send::<ApiResponse<serde_json::Value>>()
            .await?
            .into_result()
            .map(drop)
    }

    pub async fn toggle_user_status(&self, token: &SecretString, id: UserId) -> Result<()> {
        self.request(Method::PATCH, &format!("api/users/{id}/toggle-status"), token)?
            .try_send::<ApiResponse<serde_json::Value>>()
            .await?
            .into_result()
            .map(drop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Json, Router,
        extract::Path,
        http::{HeaderMap, StatusCode},
        response::IntoResponse,
        routing::{delete, get, patch, post},
    };
    use serde_json::{Value, json};
    use types::ErrorKind;

    const ADMIN_TOKEN: &str = "admin-jwt";
    const STUDENT_TOKEN: &str = "student-jwt";

    fn user(id: i64, role: &str, active: bool) -> Value {
        json!({
            "id": id,
            "username": format!("user{id}"),
            "email": format!("user{id}@uni.edu"),
            "fullName": format!("User {id}"),
            "role": role,
            "active": active,
            "createdAt": "2024-09-01T08:00:00"
        })
    }

    /// Only the admin token may manage users, like the real API.
    fn require_admin(headers: &HeaderMap) -> Result<(), StatusCode> {
        match headers.get("authorization").and_then(|v| v.to_str().ok()) {
            Some(value) if value == format!("Bearer {ADMIN_TOKEN}") => Ok(()),
            Some(_) => Err(StatusCode::FORBIDDEN),
            None => Err(StatusCode::UNAUTHORIZED),
        }
    }

    async fn list(headers: HeaderMap) -> impl IntoResponse {
        if let Err(status) = require_admin(&headers) {
            return status.into_response();
        }
        Json(json!({
            "success": true,
            "message": "Users retrieved successfully",
            "data": [user(1, "ADMIN", true), user(2, "STUDENT", false)]
        }))
        .into_response()
    }

    async fn list_by_role(headers: HeaderMap, Path(role): Path<String>) -> impl IntoResponse {
        if let Err(status) = require_admin(&headers) {
            return status.into_response();
        }
        Json(json!({
            "success": true,
            "message": "Users retrieved successfully",
            "data": [user(3, &role, true)]
        }))
        .into_response()
    }

    async fn remove(headers: HeaderMap, Path(id): Path<i64>) -> impl IntoResponse {
        if let Err(status) = require_admin(&headers) {
            return status.into_response();
        }
        if id == 404 {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "success": false,
                    "message": "Failed to delete user: User not found with id: 404"
                })),
            )
                .into_response();
        }
        Json(json!({"success": true, "message": "User deleted successfully!"})).into_response()
    }

    async fn toggle(headers: HeaderMap, Path(_id): Path<i64>) -> impl IntoResponse {
        if let Err(status) = require_admin(&headers) {
            return status.into_response();
        }
        Json(json!({"success": true, "message": "User status updated successfully!"}))
            .into_response()
    }

    async fn login(Json(body): Json<Value>) -> impl IntoResponse {
        if body["password"] != "hunter2" {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"success": false, "message": "Login failed: Bad credentials"})),
            )
                .into_response();
        }
        Json(json!({
            "token": ADMIN_TOKEN,
            "type": "Bearer",
            "id": 1,
            "username": body["username"],
            "email": "root@uni.edu",
            "fullName": "Root Admin",
            "role": "ADMIN"
        }))
        .into_response()
    }

    async fn register(Json(body): Json<Value>) -> impl IntoResponse {
        if body["username"] == "root" {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"success": false, "message": "Username already exists!"})),
            )
                .into_response();
        }
        if body["fullName"].as_str().is_none_or(str::is_empty) || body["role"].is_null() {
            return StatusCode::UNPROCESSABLE_ENTITY.into_response();
        }
        Json(json!({"success": true, "message": "User registered successfully!"})).into_response()
    }

    async fn spawn_backend() -> BackendClient {
        spawn_backend_at("").await
    }

    /// Serve the fake API under `prefix`, as a gateway would.
    async fn spawn_backend_at(prefix: &str) -> BackendClient {
        let api = Router::new()
            .route("/api/auth/login", post(login))
            .route("/api/auth/register", post(register))
            .route("/api/users", get(list))
            .route("/api/users/role/{role}", get(list_by_role))
            .route("/api/users/{id}", delete(remove))
            .route("/api/users/{id}/toggle-status", patch(toggle));
        let app = if prefix.is_empty() {
            api
        } else {
            Router::new().nest(prefix, api)
        };

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let config = Config {
            api_url: format!("http://{addr}{prefix}").parse().unwrap(),
            session_secret: "unused".to_string().into(),
            secure_cookies: false,
            request_timeout_secs: 5,
        };
        BackendClient::new(&config).unwrap()
    }

    fn token(s: &str) -> SecretString {
        s.to_string().into()
    }

    #[tokio::test]
    async fn login_returns_session_details() {
        let backend = spawn_backend().await;

        let auth = backend.login("root", &token("hunter2")).await.unwrap();
        assert_eq!(auth.id, 1);
        assert_eq!(auth.role, Role::Admin);
        assert_eq!(auth.token.expose_secret(), ADMIN_TOKEN);
    }

    #[tokio::test]
    async fn bad_credentials_carry_backend_message() {
        let backend = spawn_backend().await;

        let error = backend.login("root", &token("wrong")).await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::Network);
        assert_eq!(error.message, "Login failed: Bad credentials");
    }

    #[tokio::test]
    async fn lists_users_in_api_order() {
        let backend = spawn_backend().await;

        let users = backend.list_users(&token(ADMIN_TOKEN)).await.unwrap();
        let ids: Vec<_> = users.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(!users[1].active);
    }

    #[tokio::test]
    async fn lists_users_by_role_path() {
        let backend = spawn_backend().await;

        let users = backend
            .list_users_by_role(&token(ADMIN_TOKEN), Role::Lecturer)
            .await
            .unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].role, Role::Lecturer);
    }

    #[tokio::test]
    async fn forbidden_and_unauthorized_are_distinguished() {
        let backend = spawn_backend().await;

        let error = backend.list_users(&token(STUDENT_TOKEN)).await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::Forbidden);

        let error = backend
            .list_users_by_role(&token(STUDENT_TOKEN), Role::Admin)
            .await
            .unwrap_err();
        assert!(error.is_forbidden());
    }

    #[tokio::test]
    async fn mutations_succeed_for_admins() {
        let backend = spawn_backend().await;

        backend.delete_user(&token(ADMIN_TOKEN), 2).await.unwrap();
        backend.toggle_user_status(&token(ADMIN_TOKEN), 2).await.unwrap();
    }

    #[tokio::test]
    async fn failed_delete_reports_reason() {
        let backend = spawn_backend().await;

        let error = backend.delete_user(&token(ADMIN_TOKEN), 404).await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::Network);
        assert!(error.message.contains("User not found"));
    }

    #[tokio::test]
    async fn mutations_are_forbidden_for_others() {
        let backend = spawn_backend().await;

        let error = backend
            .toggle_user_status(&token(STUDENT_TOKEN), 7)
            .await
            .unwrap_err();
        assert_eq!(error.kind, ErrorKind::Forbidden);
    }

    fn registration(username: &str) -> RegisterRequest<'_> {
        RegisterRequest {
            username,
            email: "new@uni.edu",
            password: "s3cret",
            full_name: "New Student",
            role: Role::Student,
        }
    }

    #[tokio::test]
    async fn register_returns_confirmation() {
        let backend = spawn_backend().await;

        let message = backend.register(&registration("newbie")).await.unwrap();
        assert_eq!(message, "User registered successfully!");
    }

    #[tokio::test]
    async fn register_reports_duplicate_username() {
        let backend = spawn_backend().await;

        let error = backend.register(&registration("root")).await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::Network);
        assert_eq!(error.message, "Username already exists!");
    }

    #[tokio::test]
    async fn api_url_path_prefix_is_kept() {
        let backend = spawn_backend_at("/users-svc").await;

        let users = backend.list_users(&token(ADMIN_TOKEN)).await.unwrap();
        assert_eq!(users.len(), 2);
        backend.login("root", &token("hunter2")).await.unwrap();
    }

    #[test]
    fn status_error_falls_back_to_status_text() {
        let error = status_error(StatusCode::BAD_GATEWAY, b"<html>oops</html>");
        assert_eq!(error.kind, ErrorKind::Network);
        assert!(error.message.contains("502"));
    }
}
