//! Server-rendered pages hosting the components. Each request gets fresh
//! component instances; dropping the request future drops them too.

use crate::client::UsersApi;
use crate::components::{UserAdd, UsersList};
use axum::{
    extract::{Extension, Form},
    response::Html,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::instrument;

/// Form fields posted by the user creation form.
#[derive(Debug, Default, Deserialize)]
pub struct UserAddInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub job: String,
}

/// Wraps rendered component markup in a minimal document.
fn page(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\"><title>{title}</title></head><body>{body}</body></html>"
    ))
}

fn mount_point(id: &str, markup: &str) -> String {
    format!("<div id=\"{id}\">{markup}</div>")
}

pub async fn user_add_form() -> Html<String> {
    page("Add a user", &mount_point("user-add", &UserAdd::new().to_html()))
}

#[instrument(skip(api))]
pub async fn user_add_submit<A>(
    Extension(api): Extension<Arc<A>>,
    Form(input): Form<UserAddInput>,
) -> Html<String>
where
    A: UsersApi + Send + Sync + 'static,
{
    let mut form = UserAdd::new();
    form.set_name(input.name);
    form.set_job(input.job);

    form.submit(api.as_ref()).await;

    page("Add a user", &mount_point("user-add", &form.to_html()))
}

#[instrument(skip(api))]
pub async fn users_list<A>(Extension(api): Extension<Arc<A>>) -> Html<String>
where
    A: UsersApi + Send + Sync + 'static,
{
    let mut listing = UsersList::new();
    listing.mount(api.as_ref()).await;

    page("List of users", &mount_point("users-list", &listing.to_html()))
}

/// Both mount points, as the front-end shell lays them out.
#[instrument(skip(api))]
pub async fn home<A>(Extension(api): Extension<Arc<A>>) -> Html<String>
where
    A: UsersApi + Send + Sync + 'static,
{
    let mut listing = UsersList::new();
    listing.mount(api.as_ref()).await;

    let body = format!(
        "{}{}",
        mount_point("user-add", &UserAdd::new().to_html()),
        mount_point("users-list", &listing.to_html())
    );

    page(env!("CARGO_PKG_NAME"), &body)
}
