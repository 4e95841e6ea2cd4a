use dioxus::prelude::*;
use types::Role;

use crate::Route;

#[component]
pub fn Register(error: Option<String>) -> Element {
    rsx! {
        div { class: "login-page",
            div { class: "login-card",
                div { class: "login-header",
                    h1 { class: "login-title", "Create account" }
                    p { class: "login-subtitle", "Register to use User Management" }
                }
                if let Some(error) = error {
                    div { class: "login-error", "{error}" }
                }
                form {
                    action: "/auth/register",
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
                        label { class: "form-label", r#for: "full_name", "Full name" }
                        input {
                            id: "full_name",
                            name: "full_name",
                            class: "form-input",
                            r#type: "text",
                            autocomplete: "name",
                            required: true,
                        }
                    }
                    div { class: "form-group",
                        label { class: "form-label", r#for: "email", "Email" }
                        input {
                            id: "email",
                            name: "email",
                            class: "form-input",
                            r#type: "email",
                            autocomplete: "email",
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
                            autocomplete: "new-password",
                            required: true,
                        }
                    }
                    div { class: "form-group",
                        label { class: "form-label", r#for: "role", "Role" }
                        select { id: "role", name: "role", class: "form-input",
                            for role in Role::ALL {
                                option {
                                    key: "{role}",
                                    value: "{role}",
                                    selected: role == Role::Student,
                                    "{role}"
                                }
                            }
                        }
                    }
                    button {
                        r#type: "submit",
                        class: "btn btn-primary login-btn",
                        "Register"
                    }
                }
                p { class: "login-footer",
                    "Already have an account? "
                    Link { to: Route::login(), "Sign in" }
                }
            }
        }
    }
}
