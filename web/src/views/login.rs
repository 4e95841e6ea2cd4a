use dioxus::prelude::*;

use crate::Route;

#[component]
pub fn Login(error: Option<String>) -> Element {
    rsx! {
        div { class: "login-page",
            div { class: "login-card",
                div { class: "login-header",
                    h1 { class: "login-title", "User Management" }
                    p { class: "login-subtitle", "Sign in to continue" }
                }
                if let Some(error) = error {
                    div { class: "login-error", "{error}" }
                }
                form {
                    action: "/auth/login",
                    method: "post",
                    div { class: "form-group",
                        label { class: "form-label", r#for: "username", "Username" }
                        input {
                            id: "username",
                            name: "username",
                            class: "form-input",
                            r#type: "text",
                            autocomplete: "username",
                            required: true,
                        }
                    }
                    div { class: "form-group",
                        label { class: "form-label", r#for: "password", "Password" }
                        input {
                            id: "password",
                            name: "password",
                            class: "form-input",
                            r#type: "password",
                            autocomplete: "current-password",
                            required: true,
                        }
                    }
                    button {
                        r#type: "submit",
                        class: "btn btn-primary login-btn",
                        "Sign in"
                    }
                }
                p { class: "login-footer",
                    "No account yet? "
                    Link { to: Route::Register { error: None }, "Register" }
                }
            }
        }
    }
}
