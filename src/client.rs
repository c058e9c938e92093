use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};

use crate::dni::Dni;
use crate::error::{LookupError, DEFAULT_NOT_FOUND};
use crate::models::StudentRecord;

/// Script deployment queried for lookups, fixed when the binary is built.
pub const ENDPOINT: &str = match option_env!("PORTAL_API_URL") {
    Some(url) => url,
    None => "https://script.google.com/macros/s/AKfycbx6zmlH3KJ8KGR-_YnMoHk7fOZ-o_DSuI9wNm4WSPBaI65MQ5qjJSEKuSQ5tfww2k1q/exec",
};

#[async_trait]
pub trait LookupSource: Send + Sync {
    /// Returns the raw JSON body for one identifier.
    async fn fetch(&self, dni: &Dni) -> Result<Value, LookupError>;
}

#[derive(Clone)]
pub struct HttpLookupClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpLookupClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, LookupError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(LookupError::Transport)?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl LookupSource for HttpLookupClient {
    async fn fetch(&self, dni: &Dni) -> Result<Value, LookupError> {
        info!(endpoint = %self.endpoint, "looking up student");
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("dni", dni.as_str())])
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(LookupError::Transport)?;

        debug!(status = %response.status(), "lookup responded");
        let body = response.text().await.map_err(LookupError::Transport)?;
        serde_json::from_str(&body).map_err(LookupError::MalformedBody)
    }
}

/// Splits a lookup body into a student record or the endpoint's refusal.
pub fn interpret_body(body: Value) -> Result<StudentRecord, LookupError> {
    if body.get("error").and_then(Value::as_bool).unwrap_or(false) {
        let message = body
            .get("mensaje")
            .and_then(Value::as_str)
            .filter(|message| !message.trim().is_empty())
            .unwrap_or(DEFAULT_NOT_FOUND)
            .to_string();
        return Err(LookupError::NotFound(message));
    }

    serde_json::from_value(body).map_err(LookupError::MalformedBody)
}
