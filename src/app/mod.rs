//! Application module - handles core application logic
//!
//! [`App`] owns the rendered state and is the only place it changes. Each
//! user action is one async handler: it talks to the server through
//! [`RequestApi`], reloads the directory after a successful mutation and
//! reports the result on the shared notification slot.

use crate::config::ClientConfig;
use crate::interface::{Confirm, RequestApi, Timer};
use crate::model::{ApiOutcome, Directory, Severity, SignupParams, UnregisterParams};
use crate::notification::SharedNotifications;
use crate::view::{self, ListView, ParticipantEntry, Selector};

// Platform-specific modules
#[cfg(feature = "wasm")]
pub mod dom;

pub const SIGNUP_REJECTED_FALLBACK: &str = "An error occurred";
pub const SIGNUP_FAILED: &str = "Failed to sign up. Please try again.";
pub const UNREGISTER_REJECTED_FALLBACK: &str = "Failed to unregister participant";
pub const UNREGISTER_FAILED: &str = "Failed to unregister participant. Please try again.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub email: String,
    pub activity: String,
}

impl SignupForm {
    pub fn reset(&mut self) {
        self.email.clear();
        self.activity.clear();
    }

    /// Values the page inputs should hold after a repaint.
    ///
    /// Inputs keep whatever the user has entered unless a successful signup
    /// cleared the form. A selection that no longer names an activity falls
    /// back to the placeholder.
    pub fn repainted(entered: SignupForm, cleared: bool, selector: &Selector) -> SignupForm {
        if cleared {
            return SignupForm::default();
        }
        let SignupForm { email, activity } = entered;
        let activity = if selector.contains(&activity) {
            activity
        } else {
            String::new()
        };
        SignupForm { email, activity }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub list: ListView,
    pub selector: Selector,
    pub form: SignupForm,
    directory: Directory,
    form_cleared: bool,
}

impl AppState {
    /// Last directory loaded successfully.
    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    fn apply_directory(&mut self, directory: Directory) {
        self.list = ListView::render(&directory);
        self.selector.rebuild(&directory);
        self.directory = directory;
    }
}

/// Input events the page feeds into [`App::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    PageLoaded,
    /// The signup form was submitted with the values now in [`AppState::form`].
    SubmitSignup,
    DeleteClicked(ParticipantEntry),
}

pub struct App<C, F, T> {
    client: C,
    confirm: F,
    timer: T,
    state: AppState,
    notifications: SharedNotifications,
}

impl<C, F, T> App<C, F, T>
where
    C: RequestApi,
    F: Confirm,
    T: Timer,
{
    pub fn new(client: C, confirm: F, timer: T, config: &ClientConfig) -> Self {
        Self {
            client,
            confirm,
            timer,
            state: AppState::default(),
            notifications: SharedNotifications::new(config.notification_ttl),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn form_mut(&mut self) -> &mut SignupForm {
        &mut self.state.form
    }

    /// Whether a signup cleared the form since the last call.
    pub fn take_form_cleared(&mut self) -> bool {
        std::mem::take(&mut self.state.form_cleared)
    }

    pub fn notifications(&self) -> &SharedNotifications {
        &self.notifications
    }

    pub async fn dispatch(&mut self, event: UiEvent) {
        match event {
            UiEvent::PageLoaded => self.load_directory().await,
            UiEvent::SubmitSignup => self.submit_signup().await,
            UiEvent::DeleteClicked(entry) => self.unregister(&entry.activity, &entry.email).await,
        }
    }

    /// Replaces the list and selector with a fresh snapshot from the server.
    pub async fn load_directory(&mut self) {
        match self.client.get_activities().await {
            Ok(directory) => {
                log::debug!("loaded {} activities", directory.len());
                self.state.apply_directory(directory);
            }
            Err(e) => {
                log::error!("Error fetching activities: {e}");
                self.state.list = ListView::Failed;
            }
        }
    }

    /// Submits the form's email and activity verbatim.
    pub async fn submit_signup(&mut self) {
        let params = SignupParams {
            activity: self.state.form.activity.clone(),
            email: self.state.form.email.clone(),
        };

        match self.client.signup(params).await {
            Ok(ApiOutcome::Accepted { message }) => {
                self.state.form.reset();
                self.state.form_cleared = true;
                self.load_directory().await;
                self.show_message(message, Severity::Success).await;
            }
            Ok(ApiOutcome::Rejected { status, detail }) => {
                log::debug!("signup rejected with status {status}");
                let text = detail.unwrap_or_else(|| SIGNUP_REJECTED_FALLBACK.to_string());
                self.show_message(text, Severity::Error).await;
            }
            Err(e) => {
                log::error!("Error signing up: {e}");
                self.show_message(SIGNUP_FAILED, Severity::Error).await;
            }
        }
    }

    /// Asks for confirmation, then removes `email` from `activity`.
    pub async fn unregister(&mut self, activity: &str, email: &str) {
        if !self.confirm.confirm(&view::confirmation_prompt(activity, email)) {
            log::debug!("unregister of {email} from {activity} declined");
            return;
        }

        let params = UnregisterParams {
            activity: activity.to_string(),
            email: email.to_string(),
        };

        match self.client.unregister(params).await {
            Ok(ApiOutcome::Accepted { message }) => {
                self.load_directory().await;
                self.show_message(message, Severity::Success).await;
            }
            Ok(ApiOutcome::Rejected { status, detail }) => {
                log::debug!("unregister rejected with status {status}");
                let text = detail.unwrap_or_else(|| UNREGISTER_REJECTED_FALLBACK.to_string());
                self.show_message(text, Severity::Error).await;
            }
            Err(e) => {
                log::error!("Error unregistering participant: {e}");
                self.show_message(UNREGISTER_FAILED, Severity::Error).await;
            }
        }
    }

    pub async fn show_message(&self, text: impl Into<String>, severity: Severity) {
        let ticket = self.notifications.show(text, severity).await;
        self.timer.schedule_hide(self.notifications.clone(), ticket);
    }
}
