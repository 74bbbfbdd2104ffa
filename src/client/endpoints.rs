use url::Url;

use crate::error::{ErrorKind, Result};

/// Builds the activity endpoint urls under a base url.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    pub fn new(base: Url) -> Self {
        Self { base }
    }

    /// `GET /activities`
    pub fn activities(&self) -> Result<Url> {
        Ok(self.base.join("activities")?)
    }

    /// `POST /activities/{activity}/signup?email={email}`
    pub fn signup(&self, activity: &str, email: &str) -> Result<Url> {
        self.participant_action(activity, "signup", email)
    }

    /// `DELETE /activities/{activity}/unregister?email={email}`
    pub fn unregister(&self, activity: &str, email: &str) -> Result<Url> {
        self.participant_action(activity, "unregister", email)
    }

    fn participant_action(&self, activity: &str, action: &str, email: &str) -> Result<Url> {
        let mut url = self.activities()?;
        // `.` and `..` names are dropped rather than encoded, as a browser fetch would
        url.path_segments_mut()
            .map_err(|_| ErrorKind::ParseError(format!("cannot append path to {}", self.base)))?
            .push(activity)
            .push(action);
        url.query_pairs_mut().append_pair("email", email);
        Ok(url)
    }
}
