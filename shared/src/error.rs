use serde::Deserialize;

/// Shown whenever a failure carries no message of its own.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("{message}")]
    Remote { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("You need to be logged in to do that.")]
    NotLoggedIn,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<ErrorItem>,
}

#[derive(Deserialize)]
struct ErrorItem {
    #[serde(default)]
    message: String,
}

impl ApiError {
    /// Turns a non-2xx response into an error, keeping the first message the
    /// remote side reported.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.errors.into_iter().map(|e| e.message).find(|m| !m.trim().is_empty()))
            .unwrap_or_default();
        ApiError::Remote { status, message }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message fit for an alert.
    pub fn user_message(&self) -> String {
        let msg = self.to_string();
        if msg.trim().is_empty() {
            GENERIC_ERROR_MESSAGE.to_string()
        } else {
            msg
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}
