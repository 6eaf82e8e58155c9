//! Users listing. Loads once at mount and renders `"{last_name} {first_name}"`
//! per user in server order. Any failure clears the loading indicator and keeps
//! the error so the view can show it.

use super::{
    ui::{Alert, AlertKind, Spinner},
    Lifecycle,
};
use crate::client::{AppError, UserRecord, UsersApi};
use leptos::prelude::*;
use leptos::tachys::view::RenderHtml;
use tracing::{debug, info, warn};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListingState {
    pub loading: bool,
    pub items: Vec<String>,
    pub error: Option<AppError>,
}

impl Default for ListingState {
    fn default() -> Self {
        Self {
            loading: true,
            items: Vec::new(),
            error: None,
        }
    }
}

#[derive(Debug)]
pub struct UsersList {
    state: ListingState,
    lifecycle: Lifecycle,
}

impl Default for UsersList {
    fn default() -> Self {
        Self::new()
    }
}

impl UsersList {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: ListingState::default(),
            lifecycle: Lifecycle::Created,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &ListingState {
        &self.state
    }

    #[must_use]
    pub const fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Mount the listing and run its one load. Mounting twice does not reload.
    pub async fn mount<A: UsersApi>(&mut self, api: &A) {
        if self.lifecycle != Lifecycle::Created {
            debug!("listing already mounted, skipping load");
            return;
        }
        self.lifecycle = Lifecycle::Mounted;

        let outcome = api.list_users().await;
        self.receive(outcome);
    }

    pub fn unmount(&mut self) {
        self.lifecycle = Lifecycle::Unmounted;
    }

    /// Apply the completion of the load. Only the first completion of a
    /// mounted listing changes state.
    pub fn receive(&mut self, outcome: Result<Vec<UserRecord>, AppError>) {
        if !self.lifecycle.is_mounted() {
            debug!("dropping load completion for a listing that is not mounted");
            return;
        }
        if !self.state.loading {
            debug!("listing already loaded, ignoring completion");
            return;
        }

        match outcome {
            Ok(records) => {
                info!("loaded {} users", records.len());
                self.state = ListingState {
                    loading: false,
                    items: records.iter().map(UserRecord::display_name).collect(),
                    error: None,
                };
            }
            Err(err) => {
                warn!("loading users failed: {}", err);
                self.state.loading = false;
                self.state.error = Some(err);
            }
        }
    }

    pub fn view(&self) -> impl IntoView {
        let entries = if self.state.loading {
            view! { <Spinner /> }.into_any()
        } else {
            self.state
                .items
                .iter()
                .cloned()
                .map(|item| view! { <li>{item}</li> })
                .collect_view()
                .into_any()
        };

        let error = self.state.error.as_ref().map(|err| {
            view! { <Alert kind=AlertKind::Error message=err.to_string() /> }
        });

        view! {
            <div>
                <h2>"List of users"</h2>
                <ul>{entries}</ul>
                {error}
            </div>
        }
    }

    #[must_use]
    pub fn to_html(&self) -> String {
        self.view().to_html()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::client::{NewUserRequest, NewUserResponse};
    use crate::components::LOADING_TEXT;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeApi {
        outcome: Result<Vec<UserRecord>, AppError>,
        calls: AtomicUsize,
    }

    impl FakeApi {
        fn new(outcome: Result<Vec<UserRecord>, AppError>) -> Self {
            Self {
                outcome,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl UsersApi for FakeApi {
        async fn create_user(&self, _user: &NewUserRequest) -> Result<NewUserResponse, AppError> {
            Err(AppError::Network("not used".to_string()))
        }

        async fn list_users(&self) -> Result<Vec<UserRecord>, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }
    }

    fn user(first: &str, last: &str) -> UserRecord {
        UserRecord {
            first_name: first.to_string(),
            last_name: last.to_string(),
        }
    }

    fn li_count(html: &str) -> usize {
        html.matches("<li").count()
    }

    #[test]
    fn renders_loading_before_mount() {
        let listing = UsersList::new();
        assert_eq!(listing.state(), &ListingState::default());

        let html = listing.to_html();
        assert!(html.contains(LOADING_TEXT), "{html}");
        assert_eq!(li_count(&html), 0);
    }

    #[tokio::test]
    async fn loads_display_names_in_server_order() {
        let api = FakeApi::new(Ok(vec![user("Jo", "Lee"), user("Sam", "Kim")]));
        let mut listing = UsersList::new();

        listing.mount(&api).await;

        assert_eq!(
            listing.state(),
            &ListingState {
                loading: false,
                items: vec!["Lee Jo".to_string(), "Kim Sam".to_string()],
                error: None,
            }
        );

        let html = listing.to_html();
        assert_eq!(li_count(&html), 2);
        let lee = html.find("Lee Jo").unwrap();
        let kim = html.find("Kim Sam").unwrap();
        assert!(lee < kim, "{html}");
        assert!(!html.contains(LOADING_TEXT), "{html}");
    }

    #[tokio::test]
    async fn transport_failure_renders_an_empty_list() {
        let api = FakeApi::new(Err(AppError::Network("connection refused".to_string())));
        let mut listing = UsersList::new();

        listing.mount(&api).await;

        assert!(!listing.state().loading);
        assert!(listing.state().items.is_empty());
        assert!(matches!(listing.state().error, Some(AppError::Network(_))));

        let html = listing.to_html();
        assert!(!html.contains(LOADING_TEXT), "{html}");
        assert!(html.contains("<ul"), "{html}");
        assert_eq!(li_count(&html), 0);
    }

    #[tokio::test]
    async fn server_error_clears_loading_with_explicit_error() {
        let api = FakeApi::new(Err(AppError::Http {
            status: 500,
            message: "Request failed.".to_string(),
        }));
        let mut listing = UsersList::new();

        listing.mount(&api).await;

        assert_eq!(
            listing.state(),
            &ListingState {
                loading: false,
                items: Vec::new(),
                error: Some(AppError::Http {
                    status: 500,
                    message: "Request failed.".to_string(),
                }),
            }
        );
        let html = listing.to_html();
        assert!(html.contains("Request failed (500)"), "{html}");
    }

    #[tokio::test]
    async fn item_count_and_text_match_records() {
        let records = vec![
            user("Ada", "Lovelace"),
            user(" padded", "trailing "),
            user("", ""),
            user("Grace", "Hopper"),
        ];
        let api = FakeApi::new(Ok(records.clone()));
        let mut listing = UsersList::new();

        listing.mount(&api).await;

        let items = &listing.state().items;
        assert_eq!(items.len(), records.len());
        for (item, record) in items.iter().zip(&records) {
            assert_eq!(item, &format!("{} {}", record.last_name, record.first_name));
        }
        assert_eq!(li_count(&listing.to_html()), records.len());
    }

    #[tokio::test]
    async fn mounts_and_loads_only_once() {
        let api = FakeApi::new(Ok(vec![user("Jo", "Lee")]));
        let mut listing = UsersList::new();

        listing.mount(&api).await;
        listing.mount(&api).await;
        listing.receive(Ok(vec![user("Sam", "Kim")]));

        assert_eq!(api.calls.load(Ordering::SeqCst), 1);
        assert_eq!(listing.state().items, vec!["Lee Jo".to_string()]);
    }

    #[test]
    fn completion_after_unmount_is_dropped() {
        let mut listing = UsersList::new();
        listing.unmount();

        listing.receive(Ok(vec![user("Jo", "Lee")]));

        assert_eq!(listing.state(), &ListingState::default());
    }

    #[test]
    fn completion_before_mount_is_dropped() {
        let mut listing = UsersList::new();

        listing.receive(Err(AppError::Network("early".to_string())));

        assert!(listing.state().loading);
    }
}
