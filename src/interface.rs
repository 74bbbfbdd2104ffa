#![allow(async_fn_in_trait)] // traits are only implemented inside this crate and its tests

use crate::config::ClientConfig;
use crate::error::Result;
use crate::model::{ApiOutcome, Directory, SignupParams, UnregisterParams};
use crate::notification::{HideTicket, SharedNotifications};

/// Common trait for HTTP client functionality
pub trait HttpClient {
    /// Create a new HTTP client instance
    async fn new(config: &ClientConfig) -> Result<Self>
    where
        Self: Sized;
}

/// Common interface for all HTTP operations
///
/// `Err` means the request never produced a usable answer (network failure,
/// undecodable body). A server that answered but refused the mutation is an
/// `Ok(ApiOutcome::Rejected)`.
pub trait RequestApi {
    /// Fetch every activity with its roster
    async fn get_activities(&self) -> Result<Directory>;

    /// Sign a participant up for an activity
    async fn signup(&self, params: SignupParams) -> Result<ApiOutcome>;

    /// Remove a participant from an activity
    async fn unregister(&self, params: UnregisterParams) -> Result<ApiOutcome>;
}

/// Blocking yes/no question put to the user.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Runs the delayed hide of a notification.
pub trait Timer {
    fn schedule_hide(&self, notifications: SharedNotifications, ticket: HideTicket);
}
