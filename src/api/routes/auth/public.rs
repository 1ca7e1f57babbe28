//! Public types for the auth API
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct AuthUrlResponse {
    pub url: String,
}

#[derive(Deserialize)]
pub struct ExchangeCodeQuery {
    // Collected as a list so a repeated `code` can be rejected
    #[serde(default)]
    pub code: Vec<String>,
}

impl ExchangeCodeQuery {
    /// The code, when exactly one was supplied.
    pub fn code(&self) -> Option<&str> {
        match self.code.as_slice() {
            [code] => Some(code.as_str()),
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct ExchangeCodeResponse {
    #[serde(rename = "accessToken")]
    pub access_token: String,
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
    pub client_id: String,
}
