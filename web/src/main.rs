use dioxus::prelude::*;

mod host;
mod views;

use types::SessionUser;
use ui::{Guard, SessionState, guard};
use views::{Dashboard, Login, Register};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[route("/login?:error")]
    Login { error: Option<String> },
    #[route("/register?:error")]
    Register { error: Option<String> },
    #[layout(AuthenticatedLayout)]
        #[route("/")]
        Dashboard {},
}

impl Route {
    pub fn login() -> Self {
        Route::Login { error: None }
    }
}

fn main() {
    #[cfg(feature = "server")]
    {
        server::init_tracing();
        dioxus::serve(|| async move {
            let routes = server::init()?;

            Ok(dioxus::server::router(App).merge(routes))
        });
    }

    #[cfg(all(feature = "web", not(feature = "server")))]
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Title { "User Management" }
        document::Link { rel: "stylesheet", href: asset!("/assets/main.css") }

        Router::<Route> {}
    }
}

#[component]
fn AuthenticatedLayout() -> Element {
    let user = use_server_future(api::get_current_user)?;

    let session = match &*user.read() {
        None => SessionState::loading(),
        Some(Ok(current)) => SessionState::resolved(current.clone()),
        Some(Err(error)) => {
            tracing::warn!(%error, "failed to look up current user");
            SessionState::resolved(None)
        }
    };

    match guard(&session) {
        Guard::Loading => rsx! {
            div { class: "loading", "Loading..." }
        },
        Guard::RedirectToLogin => {
            navigator().replace(Route::login());
            rsx! {}
        }
        Guard::Render(user) => rsx! {
            SignedIn { user: user.clone() }
        },
    }
}

/// Shares the signed-in user with everything below the layout.
#[component]
fn SignedIn(user: SessionUser) -> Element {
    use_context_provider(|| user);

    rsx! {
        main { class: "main-content",
            Outlet::<Route> {}
        }
    }
}
