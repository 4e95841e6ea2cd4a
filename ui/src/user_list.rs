//! State machine behind the user list.
//!
//! Every interaction is an [`Event`]. [`transition`] consumes the current
//! [`ViewState`] and returns the next snapshot together with the [`Effect`]s
//! the host has to perform. Effects report back through further events, so
//! the state itself never waits on anything.

use tracing::{debug, warn};
use types::{Error, ErrorKind, Filter, SessionUser, UserId, UserRecord};

/// Identifies one issued fetch. Only the latest one may update the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    viewer: SessionUser,
    records: Vec<UserRecord>,
    is_loading: bool,
    filter: Filter,
    pending: Option<RequestToken>,
    issued: u64,
}

impl ViewState {
    pub fn new(viewer: SessionUser) -> Self {
        Self {
            viewer,
            records: Vec::new(),
            is_loading: true,
            filter: Filter::All,
            pending: None,
            issued: 0,
        }
    }

    pub fn viewer(&self) -> &SessionUser {
        &self.viewer
    }

    pub fn records(&self) -> &[UserRecord] {
        &self.records
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    /// The fetch whose result is still awaited, if any.
    pub fn pending(&self) -> Option<RequestToken> {
        self.pending
    }

    fn begin_fetch(&mut self) -> Effect {
        self.issued += 1;
        let token = RequestToken(self.issued);
        self.pending = Some(token);
        self.is_loading = true;

        Effect::Fetch {
            token,
            filter: self.filter,
        }
    }

    fn settle_fetch(
        &mut self,
        token: RequestToken,
        outcome: Result<Vec<UserRecord>, Error>,
    ) -> Vec<Effect> {
        if self.pending != Some(token) {
            debug!(?token, pending = ?self.pending, "discarding stale user list response");
            return Vec::new();
        }

        self.pending = None;
        self.is_loading = false;

        match outcome {
            Ok(records) => {
                self.records = records;
                Vec::new()
            }
            Err(error) => {
                warn!(%error, kind = ?error.kind, filter = %self.filter, "failed to fetch users");
                match error.kind {
                    ErrorKind::Forbidden => vec![Effect::Notify(Notice::PermissionDenied)],
                    ErrorKind::Unauthorized => vec![
                        Effect::Logout,
                        Effect::RedirectToLogin {
                            reason: Some(error.message),
                        },
                    ],
                    ErrorKind::Network => Vec::new(),
                }
            }
        }
    }

    fn admin_only(&self, action: &str) -> bool {
        if !self.viewer.is_admin() {
            warn!(viewer = %self.viewer.username, action, "ignoring admin action");
            return false;
        }
        true
    }
}

/// An action waiting on the operator's confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    Delete(UserId),
}

impl PendingAction {
    pub fn prompt(self) -> &'static str {
        match self {
            PendingAction::Delete(_) => "Are you sure you want to delete this user?",
        }
    }
}

/// A blocking message shown to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    PermissionDenied,
    UserDeleted,
    DeleteFailed,
    StatusUpdated,
    StatusUpdateFailed,
}

impl Notice {
    pub fn message(self) -> &'static str {
        match self {
            Notice::PermissionDenied => "You do not have permission to view users",
            Notice::UserDeleted => "User deleted successfully",
            Notice::DeleteFailed => "Failed to delete user",
            Notice::StatusUpdated => "User status updated",
            Notice::StatusUpdateFailed => "Failed to update status",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Mounted,
    FilterSelected(Filter),
    FetchSettled {
        token: RequestToken,
        outcome: Result<Vec<UserRecord>, Error>,
    },
    DeleteRequested(UserId),
    ConfirmationAnswered {
        action: PendingAction,
        confirmed: bool,
    },
    DeleteSettled {
        id: UserId,
        outcome: Result<(), Error>,
    },
    ToggleRequested(UserId),
    ToggleSettled {
        id: UserId,
        outcome: Result<(), Error>,
    },
    LogoutRequested,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// List all users for [`Filter::All`], otherwise the users of that role.
    Fetch {
        token: RequestToken,
        filter: Filter,
    },
    Confirm(PendingAction),
    DeleteUser(UserId),
    ToggleStatus(UserId),
    Notify(Notice),
    Logout,
    /// Leave for the login page, telling the operator why if `reason` is set.
    RedirectToLogin { reason: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: ViewState,
    pub effects: Vec<Effect>,
}

pub fn transition(mut state: ViewState, event: Event) -> Transition {
    let effects = match event {
        Event::Mounted => vec![state.begin_fetch()],
        Event::FilterSelected(filter) => {
            if !state.admin_only("filter") || filter == state.filter {
                Vec::new()
            } else {
                state.filter = filter;
                vec![state.begin_fetch()]
            }
        }
        Event::FetchSettled { token, outcome } => state.settle_fetch(token, outcome),
        Event::DeleteRequested(id) => {
            if state.admin_only("delete") {
                vec![Effect::Confirm(PendingAction::Delete(id))]
            } else {
                Vec::new()
            }
        }
        Event::ConfirmationAnswered { action, confirmed } => {
            match action {
                PendingAction::Delete(id) if confirmed && state.admin_only("delete") => {
                    vec![Effect::DeleteUser(id)]
                }
                PendingAction::Delete(id) => {
                    debug!(id, "delete cancelled");
                    Vec::new()
                }
            }
        }
        Event::DeleteSettled { id, outcome } => match outcome {
            Ok(()) => vec![Effect::Notify(Notice::UserDeleted), state.begin_fetch()],
            Err(error) => {
                warn!(id, %error, "failed to delete user");
                vec![Effect::Notify(Notice::DeleteFailed)]
            }
        },
        Event::ToggleRequested(id) => {
            if state.admin_only("toggle status") {
                vec![Effect::ToggleStatus(id)]
            } else {
                Vec::new()
            }
        }
        Event::ToggleSettled { id, outcome } => match outcome {
            Ok(()) => vec![Effect::Notify(Notice::StatusUpdated), state.begin_fetch()],
            Err(error) => {
                warn!(id, %error, "failed to toggle user status");
                vec![Effect::Notify(Notice::StatusUpdateFailed)]
            }
        },
        Event::LogoutRequested => {
            vec![Effect::Logout, Effect::RedirectToLogin { reason: None }]
        }
    };

    Transition { state, effects }
}
