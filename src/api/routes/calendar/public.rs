//! Public types for the calendar API
use serde::{Deserialize, Serialize};

use crate::google::gcal::EventDetails;

#[derive(Deserialize)]
pub struct EventBody {
    #[serde(rename = "eventDetails")]
    pub event_details: EventDetails,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    pub time_min: String,
    pub time_max: String,
    pub emails: Vec<String>,
}

#[derive(Serialize, Deserialize)]
pub struct CancelEventResponse {
    pub message: String,
}

#[derive(Serialize, Deserialize)]
pub struct RefreshTokenResponse {
    #[serde(rename = "accessToken")]
    pub access_token: String,
}
