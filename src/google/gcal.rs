//! Google Calendar v3 client for event writes and free/busy lookups

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Result, check_status};

pub const CALENDAR_API_URL: &str = "https://www.googleapis.com/calendar/v3";

/// Every write targets the authorized user's primary calendar.
pub const PRIMARY_CALENDAR: &str = "primary";

/// Either `dateTime` for timed events or `date` for all-day ones. `date`
/// and any other field travel in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventDateTime {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventAttendee {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReminderOverride {
    pub method: String,
    pub minutes: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventReminders {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_default: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overrides: Option<Vec<ReminderOverride>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Event body relayed to Google. The named fields are the ones callers
/// commonly set; anything else Google accepts rides along in `extra` at
/// every level. Nothing is required here, Google does the validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<EventDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<EventDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendees: Option<Vec<EventAttendee>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminders: Option<EventReminders>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct FreeBusyItem {
    pub id: String,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FreeBusyRequest {
    pub time_min: String,
    pub time_max: String,
    pub time_zone: String,
    pub items: Vec<FreeBusyItem>,
}

impl FreeBusyRequest {
    /// One item per email, in the order given.
    pub fn new(time_min: &str, time_max: &str, time_zone: &str, emails: &[String]) -> Self {
        Self {
            time_min: time_min.to_string(),
            time_max: time_max.to_string(),
            time_zone: time_zone.to_string(),
            items: emails
                .iter()
                .map(|email| FreeBusyItem { id: email.clone() })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct FreeBusyResponse {
    #[serde(default)]
    calendars: Map<String, Value>,
}

/// Calendar client armed with a single access token.
pub struct CalendarClient {
    http: reqwest::Client,
    access_token: String,
    base_url: String,
}

impl CalendarClient {
    pub fn new(http: reqwest::Client, access_token: &str, base_url: &str) -> Self {
        Self {
            http,
            access_token: access_token.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn events_url(&self) -> String {
        format!(
            "{}/calendars/{}/events",
            self.base_url,
            urlencoding::encode(PRIMARY_CALENDAR)
        )
    }

    fn event_url(&self, event_id: &str) -> String {
        format!("{}/{}", self.events_url(), urlencoding::encode(event_id))
    }

    /// Insert an event, notifying all attendees.
    #[tracing::instrument(skip(self, event), level = "info")]
    pub async fn insert_event(&self, event: &EventDetails) -> Result<Value> {
        let response = self
            .http
            .post(self.events_url())
            .bearer_auth(&self.access_token)
            .query(&[("sendUpdates", "all")])
            .json(event)
            .send()
            .await?;

        Ok(check_status(response).await?.json::<Value>().await?)
    }

    /// Replace an event, notifying all attendees.
    #[tracing::instrument(skip(self, event), level = "info")]
    pub async fn update_event(&self, event_id: &str, event: &EventDetails) -> Result<Value> {
        let response = self
            .http
            .put(self.event_url(event_id))
            .bearer_auth(&self.access_token)
            .query(&[("sendUpdates", "all")])
            .json(event)
            .send()
            .await?;

        Ok(check_status(response).await?.json::<Value>().await?)
    }

    /// Delete an event, notifying all attendees. Google answers 204.
    #[tracing::instrument(skip(self), level = "info")]
    pub async fn delete_event(&self, event_id: &str) -> Result<()> {
        let response = self
            .http
            .delete(self.event_url(event_id))
            .bearer_auth(&self.access_token)
            .query(&[("sendUpdates", "all")])
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }

    /// Returns the `calendars` map of the free/busy response untouched.
    #[tracing::instrument(skip(self, request), level = "info")]
    pub async fn query_free_busy(&self, request: &FreeBusyRequest) -> Result<Map<String, Value>> {
        let response = self
            .http
            .post(format!("{}/freeBusy", self.base_url))
            .bearer_auth(&self.access_token)
            .json(request)
            .send()
            .await?;

        let body = check_status(response)
            .await?
            .json::<FreeBusyResponse>()
            .await?;
        Ok(body.calendars)
    }
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;
    use serde_json::json;

    use super::*;
    use crate::google::GoogleError;

    fn standup() -> EventDetails {
        serde_json::from_value(json!({
            "summary": "Standup",
            "start": { "dateTime": "2026-10-20T09:00:00-03:00", "timeZone": "America/Sao_Paulo" },
            "end": { "dateTime": "2026-10-20T09:15:00-03:00" },
            "attendees": [{ "email": "a@x.com", "responseStatus": "needsAction" }],
            "reminders": { "useDefault": false, "overrides": [{ "method": "popup", "minutes": 10 }] },
            "colorId": "5",
            "conferenceData": { "createRequest": { "requestId": "abc" } }
        }))
        .unwrap()
    }

    #[test]
    fn it_keeps_unknown_event_fields() {
        let event = standup();
        assert_eq!(event.extra.get("colorId"), Some(&json!("5")));

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["colorId"], json!("5"));
        assert_eq!(value["conferenceData"]["createRequest"]["requestId"], json!("abc"));
        assert_eq!(value["reminders"]["useDefault"], json!(false));
        assert!(value.get("description").is_none());
        assert!(value["end"].get("timeZone").is_none());
    }

    #[test]
    fn it_relays_all_day_events_as_sent() {
        let sent = json!({
            "summary": "Holiday",
            "start": { "date": "2026-11-02" },
            "end": { "date": "2026-11-03" }
        });
        let event: EventDetails = serde_json::from_value(sent.clone()).unwrap();

        assert_eq!(serde_json::to_value(&event).unwrap(), sent);
    }

    #[test]
    fn it_relays_untitled_events_as_sent() {
        let sent = json!({
            "start": { "dateTime": "2026-10-20T09:00:00-03:00" },
            "end": { "dateTime": "2026-10-20T10:00:00-03:00" }
        });
        let event: EventDetails = serde_json::from_value(sent.clone()).unwrap();

        assert!(event.summary.is_none());
        assert_eq!(serde_json::to_value(&event).unwrap(), sent);
    }

    #[test]
    fn it_keeps_unknown_nested_fields() {
        let sent = json!({
            "summary": "Review",
            "start": { "dateTime": "2026-10-20T09:00:00-03:00", "timeZone": "UTC" },
            "end": { "dateTime": "2026-10-20T10:00:00-03:00" },
            "attendees": [
                { "email": "a@x.com", "displayName": "Ann", "comment": "hi", "additionalGuests": 1 }
            ],
            "reminders": {
                "overrides": [{ "method": "email", "minutes": 30, "note": "x" }]
            }
        });
        let event: EventDetails = serde_json::from_value(sent.clone()).unwrap();

        assert_eq!(serde_json::to_value(&event).unwrap(), sent);
    }

    #[tokio::test]
    async fn it_inserts_into_the_primary_calendar() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/calendars/primary/events")
            .match_query(Matcher::UrlEncoded("sendUpdates".into(), "all".into()))
            .match_header("authorization", "Bearer ya29.a")
            .match_body(Matcher::PartialJson(json!({ "summary": "Standup", "colorId": "5" })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":"evt1","status":"confirmed","summary":"Standup"}"#)
            .create_async()
            .await;

        let client = CalendarClient::new(reqwest::Client::new(), "ya29.a", &server.url());
        let created = client.insert_event(&standup()).await.unwrap();

        assert_eq!(created["id"], json!("evt1"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn it_encodes_event_ids_in_the_path() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("DELETE", "/calendars/primary/events/a%2Fb")
            .match_query(Matcher::UrlEncoded("sendUpdates".into(), "all".into()))
            .with_status(204)
            .create_async()
            .await;

        let client = CalendarClient::new(reqwest::Client::new(), "ya29.a", &server.url());
        client.delete_event("a/b").await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn it_surfaces_the_google_error_message() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("PUT", "/calendars/primary/events/missing")
            .match_query(Matcher::Any)
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":{"code":404,"message":"Not Found","errors":[]}}"#)
            .create_async()
            .await;

        let client = CalendarClient::new(reqwest::Client::new(), "ya29.a", &server.url());
        let err = client.update_event("missing", &standup()).await.unwrap_err();

        assert!(matches!(err, GoogleError::Api { status: 404, .. }));
        assert_eq!(err.to_string(), "Not Found");
    }

    #[tokio::test]
    async fn it_queries_free_busy_with_one_item_per_email() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/freeBusy")
            .match_body(Matcher::Json(json!({
                "timeMin": "2026-10-20T00:00:00Z",
                "timeMax": "2026-10-21T00:00:00Z",
                "timeZone": "America/Sao_Paulo",
                "items": [{ "id": "a@x.com" }, { "id": "b@x.com" }]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"kind":"calendar#freeBusy","calendars":{"a@x.com":{"busy":[]},"b@x.com":{"busy":[{"start":"2026-10-20T12:00:00Z","end":"2026-10-20T13:00:00Z"}]}}}"#)
            .create_async()
            .await;

        let client = CalendarClient::new(reqwest::Client::new(), "ya29.a", &server.url());
        let request = FreeBusyRequest::new(
            "2026-10-20T00:00:00Z",
            "2026-10-21T00:00:00Z",
            "America/Sao_Paulo",
            &[String::from("a@x.com"), String::from("b@x.com")],
        );
        let calendars = client.query_free_busy(&request).await.unwrap();

        assert_eq!(calendars.len(), 2);
        assert_eq!(calendars["b@x.com"]["busy"].as_array().unwrap().len(), 1);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn it_keeps_calendars_in_the_order_google_sent() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/freeBusy")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"calendars":{"z@x.com":{"busy":[]},"a@x.com":{"busy":[]}}}"#)
            .create_async()
            .await;

        let client = CalendarClient::new(reqwest::Client::new(), "ya29.a", &server.url());
        let request = FreeBusyRequest::new(
            "2026-10-20T00:00:00Z",
            "2026-10-21T00:00:00Z",
            "UTC",
            &[String::from("z@x.com"), String::from("a@x.com")],
        );
        let calendars = client.query_free_busy(&request).await.unwrap();

        let keys: Vec<&str> = calendars.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z@x.com", "a@x.com"]);
    }
}
