use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;

/// Parameters for `POST /activities/{activity}/signup`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupParams {
    pub activity: String,
    pub email: String,
}

/// Parameters for `DELETE /activities/{activity}/unregister`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnregisterParams {
    pub activity: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
struct MessageBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct DetailBody {
    #[serde(default)]
    detail: Option<Value>,
}

/// How the server answered a mutation that reached it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiOutcome {
    Accepted { message: String },
    Rejected { status: u16, detail: Option<String> },
}

impl ApiOutcome {
    /// Decodes a mutation response. A body that is not the expected JSON is an
    /// error, the same as a request that never completed.
    pub fn from_response(status: u16, body: &str) -> Result<Self> {
        if (200..300).contains(&status) {
            let body: MessageBody = serde_json::from_str(body)?;
            Ok(ApiOutcome::Accepted {
                message: body.message,
            })
        } else {
            let body: DetailBody = serde_json::from_str(body)?;
            // validation errors carry a list here; only plain text is shown
            let detail = body
                .detail
                .and_then(|d| d.as_str().map(str::to_string))
                .filter(|d| !d.is_empty());
            Ok(ApiOutcome::Rejected { status, detail })
        }
    }
}
