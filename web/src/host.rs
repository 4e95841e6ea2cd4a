use dioxus::document::eval;
use dioxus::prelude::*;
use types::{Error, Result, Role, UserId, UserRecord};
use ui::{Host, Notice, UserDirectory};

use crate::Route;

/// The user directory, reached through the server functions.
pub struct ServerDirectory;

impl UserDirectory for ServerDirectory {
    async fn list_all_users(&self) -> Result<Vec<UserRecord>> {
        api::list_users().await.map_err(|e| Error::from_server_fn(&e))
    }

    async fn list_users_by_role(&self, role: Role) -> Result<Vec<UserRecord>> {
        api::list_users_by_role(role)
            .await
            .map_err(|e| Error::from_server_fn(&e))
    }

    async fn delete_user(&self, id: UserId) -> Result<()> {
        api::delete_user(id)
            .await
            .map_err(|e| Error::from_server_fn(&e))
    }

    async fn toggle_user_status(&self, id: UserId) -> Result<()> {
        api::toggle_user_status(id)
            .await
            .map_err(|e| Error::from_server_fn(&e))
    }
}

/// Native browser dialogs plus the router.
pub struct BrowserHost;

impl Host for BrowserHost {
    async fn confirm(&self, prompt: &str) -> bool {
        let js = format!("return window.confirm({});", js_string(prompt));
        match eval(&js).join::<bool>().await {
            Ok(confirmed) => confirmed,
            Err(error) => {
                tracing::warn!(?error, "confirmation dialog failed");
                false
            }
        }
    }

    async fn notify(&self, notice: Notice) {
        let js = format!("window.alert({}); return null;", js_string(notice.message()));
        if let Err(error) = eval(&js).join::<()>().await {
            tracing::warn!(?error, ?notice, "alert failed");
        }
    }

    async fn logout(&self) {
        let js = r#"
            await fetch("/auth/logout", { method: "POST", credentials: "same-origin" });
            return null;
        "#;
        if let Err(error) = eval(js).join::<()>().await {
            tracing::warn!(?error, "logout request failed");
        }
    }

    fn redirect_to_login(&self, reason: Option<&str>) {
        navigator().replace(Route::Login {
            error: reason.map(str::to_owned),
        });
    }
}

/// Quote `text` as a JavaScript string literal.
fn js_string(text: &str) -> String {
    serde_json::Value::from(text).to_string()
}
