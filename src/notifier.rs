//! Posts every border change to an HTTP endpoint.

use crate::config::ApiConfig;
use crate::events::{Event, Mailbox};
use crate::prelude::*;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

const CONNECT_TIMEOUT_SECS: u64 = 10;
const REQUEST_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderUpdate {
    pub old_size: f64,
    pub new_size: f64,
    pub duration_secs: u64,
}
impl BorderUpdate {
    /// The body the endpoint expects. Sizes always carry five decimals, which
    /// serde_json won't do for floats, so only the secret goes through it.
    pub fn to_json(&self, secret: Option<&str>) -> String {
        let secret = serde_json::Value::from(secret);
        format!(
            r#"{{"secret":{secret},"old_size":{:.5},"new_size":{:.5},"duration":{}}}"#,
            self.old_size, self.new_size, self.duration_secs
        )
    }
}

/// Somewhere border changes get reported. Reporting must not block.
pub trait Reporter {
    fn report(&mut self, update: BorderUpdate);
}

/// Sends reports from a tokio runtime and posts the outcome to the mailbox.
#[derive(Debug)]
pub struct HttpNotifier {
    client: reqwest::Client,
    url: Option<String>,
    secret: Option<String>,
    runtime: tokio::runtime::Handle,
    mailbox: Mailbox,
}
impl HttpNotifier {
    pub fn new(api: &ApiConfig, runtime: tokio::runtime::Handle, mailbox: Mailbox) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        if api.url.is_none() {
            log::info!("api.url is not set, border updates won't be posted");
        }
        Ok(Self {
            client,
            url: api.url.clone(),
            secret: api.secret.clone(),
            runtime,
            mailbox,
        })
    }
}
impl Reporter for HttpNotifier {
    fn report(&mut self, update: BorderUpdate) {
        let Some(url) = &self.url else { return };
        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(update.to_json(self.secret.as_deref()));
        let mailbox = self.mailbox.clone();
        self.runtime.spawn(async move {
            let outcome = match request.send().await {
                Ok(response) => Ok(response.status().as_u16()),
                Err(e) => Err(e.to_string()),
            };
            mailbox.post(Event::Reported(outcome));
        });
    }
}

/// Logs what became of a report. Runs on the tick thread.
pub fn log_outcome(outcome: &Result<u16, String>) {
    match outcome {
        Ok(status) if (200..300).contains(status) => log::info!("world border POST status: {status}"),
        Ok(status) => log::warn!("world border POST rejected with status {status}"),
        Err(e) => log::warn!("failed to send world border POST: {e}"),
    }
}
