use types::{Filter, Role, UserId};

use crate::user_list::ViewState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Id,
    Username,
    FullName,
    Email,
    Role,
    Status,
    Actions,
}

impl Column {
    pub fn title(self) -> &'static str {
        match self {
            Column::Id => "ID",
            Column::Username => "Username",
            Column::FullName => "Full Name",
            Column::Email => "Email",
            Column::Role => "Role",
            Column::Status => "Status",
            Column::Actions => "Actions",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: UserId,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub role: Role,
    pub active: bool,
    pub actions: bool,
}

impl Row {
    pub fn status_label(&self) -> &'static str {
        if self.active { "Active" } else { "Inactive" }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableBody {
    Loading,
    Empty,
    Rows(Vec<Row>),
}

impl TableBody {
    /// Text of the single placeholder row, when there is one.
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            TableBody::Loading => Some("Loading..."),
            TableBody::Empty => Some("No users found"),
            TableBody::Rows(_) => None,
        }
    }
}

/// Everything the user table renders, derived from one state snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub columns: Vec<Column>,
    /// The highlighted filter; `None` hides the filter bar.
    pub filter_bar: Option<Filter>,
    pub body: TableBody,
}

pub fn project(state: &ViewState) -> TableView {
    let admin = state.viewer().is_admin();

    let mut columns = vec![
        Column::Id,
        Column::Username,
        Column::FullName,
        Column::Email,
        Column::Role,
        Column::Status,
    ];
    if admin {
        columns.push(Column::Actions);
    }

    let body = if state.is_loading() {
        TableBody::Loading
    } else if state.records().is_empty() {
        TableBody::Empty
    } else {
        TableBody::Rows(
            state
                .records()
                .iter()
                .map(|user| Row {
                    id: user.id,
                    username: user.username.clone(),
                    full_name: user.full_name.clone(),
                    email: user.email.clone(),
                    role: user.role,
                    active: user.active,
                    actions: admin,
                })
                .collect(),
        )
    };

    TableView {
        columns,
        filter_bar: admin.then_some(state.filter()),
        body,
    }
}
