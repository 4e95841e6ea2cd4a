use dioxus::prelude::*;
use types::SessionUser;
use ui::{Event, TableBody, Transition, ViewState, execute, project, transition};

use super::components::{FilterBar, RoleBadge, StatusBadge};
use crate::host::{BrowserHost, ServerDirectory};

/// Apply `event` to the view and run its effects in order on a new task.
/// Follow-up events come back through here, so separate events overlap.
fn dispatch(mut view: Signal<ViewState>, event: Event) {
    let Transition { state, effects } = transition(view.peek().clone(), event);
    view.set(state);

    if effects.is_empty() {
        return;
    }

    spawn(async move {
        for effect in effects {
            if let Some(next) = execute(effect, &ServerDirectory, &BrowserHost).await {
                dispatch(view, next);
            }
        }
    });
}

#[component]
pub fn Dashboard() -> Element {
    let viewer = use_context::<SessionUser>();
    let view = use_signal(|| ViewState::new(viewer.clone()));

    // Fetch users on mount
    use_effect(move || dispatch(view, Event::Mounted));

    let users_table = project(&view.read());
    let colspan = users_table.columns.len();

    rsx! {
        div {
            div { class: "page-header",
                div { class: "page-header-content",
                    h1 { class: "page-title", "Dashboard" }
                }
                div { class: "page-header-actions",
                    div { class: "header-user",
                        p { class: "text-muted text-sm", "Welcome," }
                        p { class: "header-user-name", "{viewer.full_name}" }
                        p { class: "header-user-role", "{viewer.role}" }
                    }
                    button {
                        class: "btn btn-danger",
                        onclick: move |_| dispatch(view, Event::LogoutRequested),
                        "Logout"
                    }
                }
            }

            if let Some(active) = users_table.filter_bar {
                FilterBar {
                    active,
                    on_select: move |filter| dispatch(view, Event::FilterSelected(filter)),
                }
            }

            div { class: "card",
                div { class: "table-container",
                    table {
                        thead {
                            tr {
                                for column in users_table.columns.iter() {
                                    th { "{column.title()}" }
                                }
                            }
                        }
                        tbody {
                            {
                                match &users_table.body {
                                    TableBody::Rows(rows) => rsx! {
                                        for row in rows.iter() {
                                            {
                                                let id = row.id;
                                                rsx! {
                                                    tr { key: "{id}",
                                                        td { "{row.id}" }
                                                        td { "{row.username}" }
                                                        td { "{row.full_name}" }
                                                        td { "{row.email}" }
                                                        td { RoleBadge { role: row.role } }
                                                        td {
                                                            StatusBadge {
                                                                active: row.active,
                                                                label: row.status_label(),
                                                            }
                                                        }
                                                        if row.actions {
                                                            td { class: "row-actions",
                                                                button {
                                                                    class: "btn btn-warning btn-sm",
                                                                    onclick: move |_| dispatch(view, Event::ToggleRequested(id)),
                                                                    "Toggle"
                                                                }
                                                                button {
                                                                    class: "btn btn-danger btn-sm",
                                                                    onclick: move |_| dispatch(view, Event::DeleteRequested(id)),
                                                                    "Delete"
                                                                }
                                                            }
                                                        }
                                                    }
                                                }
                                            }
                                        }
                                    },
                                    placeholder => rsx! {
                                        tr {
                                            td { class: "table-placeholder", colspan: "{colspan}",
                                                {placeholder.placeholder().unwrap_or_default()}
                                            }
                                        }
                                    },
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
