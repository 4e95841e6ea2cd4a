use std::collections::VecDeque;

use types::{Result, Role, UserId, UserRecord};

use crate::user_list::{Effect, Event, Notice, Transition, ViewState, transition};

/// The remote user directory.
#[allow(async_fn_in_trait)]
pub trait UserDirectory {
    async fn list_all_users(&self) -> Result<Vec<UserRecord>>;
    async fn list_users_by_role(&self, role: Role) -> Result<Vec<UserRecord>>;
    async fn delete_user(&self, id: UserId) -> Result<()>;
    async fn toggle_user_status(&self, id: UserId) -> Result<()>;
}

/// Whatever the view runs inside: dialogs, session and navigation.
#[allow(async_fn_in_trait)]
pub trait Host {
    async fn confirm(&self, prompt: &str) -> bool;
    async fn notify(&self, notice: Notice);
    async fn logout(&self);
    fn redirect_to_login(&self, reason: Option<&str>);
}

/// Perform one effect, returning the event that reports its outcome.
pub async fn execute<D, H>(effect: Effect, directory: &D, host: &H) -> Option<Event>
where
    D: UserDirectory,
    H: Host,
{
    match effect {
        Effect::Fetch { token, filter } => {
            let outcome = match filter.role() {
                None => directory.list_all_users().await,
                Some(role) => directory.list_users_by_role(role).await,
            };
            Some(Event::FetchSettled { token, outcome })
        }
        Effect::Confirm(action) => {
            let confirmed = host.confirm(action.prompt()).await;
            Some(Event::ConfirmationAnswered { action, confirmed })
        }
        Effect::DeleteUser(id) => Some(Event::DeleteSettled {
            id,
            outcome: directory.delete_user(id).await,
        }),
        Effect::ToggleStatus(id) => Some(Event::ToggleSettled {
            id,
            outcome: directory.toggle_user_status(id).await,
        }),
        Effect::Notify(notice) => {
            host.notify(notice).await;
            None
        }
        Effect::Logout => {
            host.logout().await;
            None
        }
        Effect::RedirectToLogin { reason } => {
            host.redirect_to_login(reason.as_deref());
            None
        }
    }
}

/// Feed `event` through the view and run every resulting effect, one at a
/// time, until nothing is left to do.
pub async fn drive<D, H>(mut state: ViewState, event: Event, directory: &D, host: &H) -> ViewState
where
    D: UserDirectory,
    H: Host,
{
    let mut queue = VecDeque::from([event]);

    while let Some(event) = queue.pop_front() {
        let Transition { state: next, effects } = transition(state, event);
        state = next;

        for effect in effects {
            if let Some(follow_up) = execute(effect, directory, host).await {
                queue.push_back(follow_up);
            }
        }
    }

    state
}
