use dioxus::prelude::*;
use types::{Role, SessionUser, UserId, UserRecord};

#[post("/api/current-user")]
pub async fn get_current_user() -> ServerFnResult<Option<SessionUser>> {
    match server::get_session_from_cookie().await {
        Ok(session) => Ok(Some(session.user)),
        Err(_) => Ok(None),
    }
}

#[post("/api/users")]
pub async fn list_users() -> ServerFnResult<Vec<UserRecord>> {
    let session = server::require_session().await?;
    Ok(server::backend()?
        .list_users(&session.access_token)
        .await?)
}

#[post("/api/users/by-role")]
pub async fn list_users_by_role(role: Role) -> ServerFnResult<Vec<UserRecord>> {
    let session = server::require_session().await?;
    Ok(server::backend()?
        .list_users_by_role(&session.access_token, role)
        .await?)
}

#[post("/api/users/delete")]
pub async fn delete_user(user_id: UserId) -> ServerFnResult<()> {
    let session = server::require_session().await?;
    server::backend()?
        .delete_user(&session.access_token, user_id)
        .await?;
    Ok(())
}

#[post("/api/users/toggle-status")]
pub async fn toggle_user_status(user_id: UserId) -> ServerFnResult<()> {
    let session = server::require_session().await?;
    server::backend()?
        .toggle_user_status(&session.access_token, user_id)
        .await?;
    Ok(())
}
