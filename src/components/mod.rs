//! The two user-facing components. Each one owns its state, exposes a pure
//! `view()` and receives network completions through `receive`, which is the
//! only place state transitions happen.

pub mod ui;
pub mod user_add;
pub mod users_list;

pub use ui::{Alert, AlertKind, Spinner, LOADING_TEXT};
pub use user_add::{FormSubmissionState, UserAdd};
pub use users_list::{ListingState, UsersList};

/// Where a component instance is in its lifecycle. Completions delivered to an
/// instance that is not mounted are dropped.
///
/// `Created` is only seen by the listing, which mounts explicitly to start its
/// load. A form has nothing to load and is mounted when it is constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Created,
    Mounted,
    Unmounted,
}

impl Lifecycle {
    #[must_use]
    pub const fn is_mounted(self) -> bool {
        matches!(self, Self::Mounted)
    }
}
