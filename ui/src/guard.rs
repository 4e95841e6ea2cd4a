use types::SessionUser;

/// Authentication state as reported by the session owner.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    pub user: Option<SessionUser>,
    pub loading: bool,
}

impl SessionState {
    pub fn loading() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }

    pub fn resolved(user: Option<SessionUser>) -> Self {
        Self {
            user,
            loading: false,
        }
    }
}

/// What a protected route should show for a given session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard<'a> {
    Loading,
    RedirectToLogin,
    Render(&'a SessionUser),
}

pub fn guard(session: &SessionState) -> Guard<'_> {
    if session.loading {
        return Guard::Loading;
    }

    match &session.user {
        Some(user) => Guard::Render(user),
        None => Guard::RedirectToLogin,
    }
}
