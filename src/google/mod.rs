//! Clients for the Google OAuth and Calendar REST endpoints

pub mod gcal;
pub mod oauth;

use reqwest::Response;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GoogleError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Google rejected the call. `message` is whatever Google said, as-is.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Access token not provided")]
    MissingAccessToken,
}

pub type Result<T> = std::result::Result<T, GoogleError>;

// Calendar errors look like `{"error": {"code": 404, "message": "Not Found"}}`
// while the token endpoint answers `{"error": "invalid_grant", ...}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    Calendar {
        error: CalendarErrorDetail,
    },
    OAuth {
        error: String,
    },
}

#[derive(Deserialize)]
struct CalendarErrorDetail {
    message: String,
}

/// Turn a non-success response into [`GoogleError::Api`] and pass
/// successful ones through.
pub(crate) async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ErrorBody>(&text) {
        Ok(ErrorBody::Calendar { error }) => error.message,
        Ok(ErrorBody::OAuth { error }) => error,
        Err(_) if text.is_empty() => status.to_string(),
        Err(_) => text,
    };
    tracing::warn!("Google API request failed: {} - {}", status, message);

    Err(GoogleError::Api {
        status: status.as_u16(),
        message,
    })
}
