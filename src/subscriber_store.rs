use crate::domain::SubscriptionRequest;
use axum::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use time::OffsetDateTime;

const UNIQUE_VIOLATION: &str = "23505";
const INSUFFICIENT_PRIVILEGE: &str = "42501";

/// Record store holding newsletter signups.
#[async_trait]
pub trait SubscriberStore: Send + Sync {
    async fn insert(&self, request: &SubscriptionRequest) -> Result<(), StoreError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Duplicate,
    Unavailable,
    Unknown,
}

impl ErrorKind {
    pub fn from_code(code: &str) -> Self {
        match code {
            UNIQUE_VIOLATION => ErrorKind::Duplicate,
            INSUFFICIENT_PRIVILEGE => ErrorKind::Unavailable,
            _ => ErrorKind::Unknown,
        }
    }

    pub fn from_status(status: u16) -> Self {
        match status {
            409 => ErrorKind::Duplicate,
            401 | 403 => ErrorKind::Unavailable,
            _ => ErrorKind::Unknown,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Subscriber store rejected the insert with status {status}: {message}")]
    Rejected {
        status: u16,
        code: Option<String>,
        message: String,
    },
    #[error("Failed to reach the subscriber store")]
    Transport(#[source] reqwest::Error),
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Rejected {
                code: Some(code), ..
            } => ErrorKind::from_code(code),
            Self::Rejected { status, .. } => ErrorKind::from_status(*status),
            Self::Transport(_) => ErrorKind::Unknown,
        }
    }
}

/// PostgREST client inserting rows into the `subscribers` table.
#[derive(Clone, Debug)]
pub struct RestSubscriberStore {
    http_client: Client,
    base_url: String,
    api_key: Secret<String>,
}

impl RestSubscriberStore {
    pub fn new(
        base_url: String,
        api_key: Secret<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            base_url,
            api_key,
        })
    }
}

#[async_trait]
impl SubscriberStore for RestSubscriberStore {
    #[tracing::instrument(
        name = "Inserting subscriber into the store",
        skip_all,
        fields(subscriber_email = %request.email)
    )]
    async fn insert(&self, request: &SubscriptionRequest) -> Result<(), StoreError> {
        let url = format!("{}/rest/v1/subscribers", self.base_url.trim_end_matches('/'));
        let request_body = InsertSubscriberRequest {
            email: request.email.as_ref(),
            subscribed_at: request.submitted_at,
            created_at: request.submitted_at,
        };

        let response = self
            .http_client
            .post(&url)
            .header("apikey", self.api_key.expose_secret())
            .bearer_auth(self.api_key.expose_secret())
            .header("Prefer", "return=minimal")
            .json(&request_body)
            .send()
            .await
            .map_err(StoreError::Transport)?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.json::<RestErrorBody>().await.ok();
        let (code, message) = match body {
            Some(body) => (body.code, body.message.unwrap_or_default()),
            None => (None, String::new()),
        };

        Err(StoreError::Rejected {
            status: status.as_u16(),
            code,
            message,
        })
    }
}

#[derive(Serialize)]
struct InsertSubscriberRequest<'a> {
    email: &'a str,
    #[serde(with = "time::serde::rfc3339")]
    subscribed_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
}

#[derive(Deserialize)]
struct RestErrorBody {
    code: Option<String>,
    message: Option<String>,
}
