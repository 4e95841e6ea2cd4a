use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Lecturer,
    Student,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Lecturer, Role::Student];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Lecturer => "LECTURER",
            Role::Student => "STUDENT",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| crate::err!("unknown role: {s}").into())
    }
}

/// Which subset of users the dashboard lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Filter {
    #[default]
    All,
    Admin,
    Lecturer,
    Student,
}

impl Filter {
    pub const ALL: [Filter; 4] = [Filter::All, Filter::Admin, Filter::Lecturer, Filter::Student];

    /// The role to query by, or `None` for every user.
    pub fn role(self) -> Option<Role> {
        match self {
            Filter::All => None,
            Filter::Admin => Some(Role::Admin),
            Filter::Lecturer => Some(Role::Lecturer),
            Filter::Student => Some(Role::Student),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "All Users",
            Filter::Admin => "Admins",
            Filter::Lecturer => "Lecturers",
            Filter::Student => "Students",
        }
    }
}

impl From<Role> for Filter {
    fn from(role: Role) -> Self {
        match role {
            Role::Admin => Filter::Admin,
            Role::Lecturer => Filter::Lecturer,
            Role::Student => Filter::Student,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.role() {
            Some(role) => role.fmt(f),
            None => f.write_str("ALL"),
        }
    }
}
