//! Platform independent core of the dashboard: the route guard decision, the
//! user list state machine, and the table it renders to.

mod effects;
mod guard;
mod table;
mod user_list;

pub use effects::{Host, UserDirectory, drive, execute};
pub use guard::{Guard, SessionState, guard};
pub use table::{Column, Row, TableBody, TableView, project};
pub use user_list::{
    Effect, Event, Notice, PendingAction, RequestToken, Transition, ViewState, transition,
};
