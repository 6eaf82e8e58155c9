//! User creation form. Inputs are controlled values owned by the component; a
//! successful submission records the server-assigned id, a failed one records
//! the error without touching the submission state.

use super::{
    ui::{Alert, AlertKind},
    Lifecycle,
};
use crate::client::{AppError, NewUserRequest, NewUserResponse, UsersApi};
use leptos::prelude::*;
use leptos::tachys::view::RenderHtml;
use tracing::{debug, info, warn};

/// Route the rendered form posts back to.
pub const FORM_ACTION: &str = "/users/new";
const SUCCESS_PREFIX: &str = "User added successfully. New ID: ";
const FAILURE_PREFIX: &str = "Submission failed. ";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormSubmissionState {
    pub submitted: bool,
    pub created_id: Option<String>,
}

#[derive(Debug)]
pub struct UserAdd {
    name: String,
    job: String,
    state: FormSubmissionState,
    failure: Option<AppError>,
    lifecycle: Lifecycle,
}

impl Default for UserAdd {
    fn default() -> Self {
        Self::new()
    }
}

impl UserAdd {
    /// An idle form with empty inputs. Construction is the mount: there is no
    /// `Created` phase because the form loads nothing.
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: String::new(),
            job: String::new(),
            state: FormSubmissionState::default(),
            failure: None,
            lifecycle: Lifecycle::Mounted,
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_job(&mut self, job: impl Into<String>) {
        self.job = job.into();
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn job(&self) -> &str {
        &self.job
    }

    #[must_use]
    pub const fn state(&self) -> &FormSubmissionState {
        &self.state
    }

    /// The error of the most recent submission, cleared by the next success.
    #[must_use]
    pub const fn failure(&self) -> Option<&AppError> {
        self.failure.as_ref()
    }

    #[must_use]
    pub const fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn unmount(&mut self) {
        self.lifecycle = Lifecycle::Unmounted;
    }

    /// Snapshot of the current inputs as a request payload.
    #[must_use]
    pub fn request(&self) -> NewUserRequest {
        NewUserRequest {
            name: self.name.clone(),
            job: self.job.clone(),
        }
    }

    /// Submit the current inputs and apply the outcome.
    pub async fn submit<A: UsersApi>(&mut self, api: &A) {
        if !self.lifecycle.is_mounted() {
            debug!("ignoring submit on a form that is not mounted");
            return;
        }

        let request = self.request();
        let outcome = api.create_user(&request).await;
        self.receive(outcome);
    }

    /// Apply the completion of a create request.
    pub fn receive(&mut self, outcome: Result<NewUserResponse, AppError>) {
        if !self.lifecycle.is_mounted() {
            debug!("dropping create completion for an unmounted form");
            return;
        }

        match outcome {
            Ok(created) => {
                info!("user created with id {}", created.id);
                self.state = FormSubmissionState {
                    submitted: true,
                    created_id: Some(created.id),
                };
                self.failure = None;
            }
            Err(err) => {
                warn!("user creation failed: {}", err);
                self.failure = Some(err);
            }
        }
    }

    pub fn view(&self) -> impl IntoView {
        let name = self.name.clone();
        let job = self.job.clone();

        let confirmation = self
            .state
            .created_id
            .clone()
            .filter(|_| self.state.submitted)
            .map(|id| {
                view! { <Alert kind=AlertKind::Success message=format!("{SUCCESS_PREFIX}{id}") /> }
            });

        let failure = self.failure.as_ref().map(|err| {
            view! { <Alert kind=AlertKind::Error message=format!("{FAILURE_PREFIX}{err}") /> }
        });

        view! {
            <div>
                <h2>"Add a user"</h2>
                <form method="post" action=FORM_ACTION>
                    <div class="form-field">
                        <label for="name">"New user's name:"</label>
                        <input type="text" id="name" name="name" value=name />
                    </div>

                    <div class="form-field">
                        <label for="job">"New user's job:"</label>
                        <input type="text" id="job" name="job" value=job />
                    </div>

                    <button type="submit">"Add user"</button>
                </form>
                {confirmation}
                {failure}
            </div>
        }
    }

    #[must_use]
    pub fn to_html(&self) -> String {
        self.view().to_html()
    }
}
