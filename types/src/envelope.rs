use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::{Result, Role, SessionUser, UserId, UserSession, err};

/// The `{success, message, data}` wrapper around every `/api/users` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Fail unless the backend reported success.
    pub fn into_result(self) -> Result<Option<T>> {
        if self.success {
            Ok(self.data)
        } else {
            Err(err!("{}", self.message).into())
        }
    }

    pub fn into_data(self) -> Result<T> {
        self.into_result()?
            .ok_or_else(|| err!("response is missing its data").into())
    }
}

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Body of `/api/auth/register`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub full_name: &'a str,
    pub role: Role,
}

/// Returned by `/api/auth/login`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: SecretString,
    #[serde(rename = "type", default)]
    pub token_type: Option<String>,
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: Role,
}

impl From<AuthResponse> for UserSession {
    fn from(auth: AuthResponse) -> Self {
        Self {
            user: SessionUser {
                id: auth.id,
                username: auth.username,
                full_name: auth.full_name,
                role: auth.role,
            },
            email: auth.email,
            access_token: auth.token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UserRecord;
    use secrecy::ExposeSecret;

    #[test]
    fn unwraps_successful_list() {
        let json = r#"{
            "success": true,
            "message": "Users retrieved successfully",
            "data": [
                {"id":1,"username":"root","email":"r@x.io","fullName":"Root","role":"ADMIN","active":true}
            ]
        }"#;

        let response: ApiResponse<Vec<UserRecord>> = serde_json::from_str(json).unwrap();
        let users = response.into_data().unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].username, "root");
    }

    #[test]
    fn reports_backend_failure_message() {
        let json = r#"{"success": false, "message": "Failed to delete user: User not found with id: 9"}"#;

        let response: ApiResponse<()> = serde_json::from_str(json).unwrap();
        let error = response.into_result().unwrap_err();
        assert_eq!(error.message, "Failed to delete user: User not found with id: 9");
    }

    #[test]
    fn missing_data_is_an_error() {
        let json = r#"{"success": true, "message": "ok"}"#;
        let response: ApiResponse<Vec<UserRecord>> = serde_json::from_str(json).unwrap();
        assert!(response.into_data().is_err());
    }

    #[test]
    fn login_response_becomes_session() {
        let json = r#"{
            "token": "eyJhbGciOi",
            "type": "Bearer",
            "id": 3,
            "username": "tlee",
            "email": "t@uni.edu",
            "fullName": "Terry Lee",
            "role": "LECTURER"
        }"#;

        let auth: AuthResponse = serde_json::from_str(json).unwrap();
        let session = UserSession::from(auth);
        assert_eq!(session.user.id, 3);
        assert_eq!(session.user.role, Role::Lecturer);
        assert_eq!(session.email, "t@uni.edu");
        assert_eq!(session.access_token.expose_secret(), "eyJhbGciOi");
    }

    #[test]
    fn register_request_uses_api_field_names() {
        let request = RegisterRequest {
            username: "sam",
            email: "sam@uni.edu",
            password: "pw",
            full_name: "Sam Student",
            role: Role::Student,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["fullName"], "Sam Student");
        assert_eq!(json["role"], "STUDENT");
    }
}
