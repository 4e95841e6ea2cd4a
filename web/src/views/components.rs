use dioxus::prelude::*;
use types::{Filter, Role};

#[component]
pub fn RoleBadge(role: Role) -> Element {
    let class = match role {
        Role::Admin => "badge badge-admin",
        Role::Lecturer => "badge badge-lecturer",
        Role::Student => "badge badge-student",
    };

    rsx! {
        span { class, "{role}" }
    }
}

#[component]
pub fn StatusBadge(active: bool, label: &'static str) -> Element {
    rsx! {
        span {
            class: if active { "badge badge-active" } else { "badge badge-inactive" },
            "{label}"
        }
    }
}

/// One button per filter, with the active one highlighted.
#[component]
pub fn FilterBar(active: Filter, on_select: EventHandler<Filter>) -> Element {
    rsx! {
        div { class: "card filter-bar",
            for filter in Filter::ALL {
                button {
                    key: "{filter}",
                    class: if filter == active { "btn btn-primary" } else { "btn btn-secondary" },
                    onclick: move |_| on_select.call(filter),
                    "{filter.label()}"
                }
            }
        }
    }
}
