//! `PagerDuty` Events API v2 client.
//!
//! Events carry their own routing key, so one client can post on behalf of
//! any service integration.
//!
//! # Usage
//!
//! ```no_run
//! use prtg_pagerduty::pagerduty::{PagerDutyClient, PagerDutyEvent};
//!
//! # async fn example() -> Result<(), prtg_pagerduty::DispatchError> {
//! let client = PagerDutyClient::new();
//!
//! let event = PagerDutyEvent::resolve("my-routing-key", "local-router1-CPU");
//! let response = client.send_event(&event).await?;
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::DispatchError;

/// `PagerDuty` Events API v2 endpoint.
pub const EVENTS_API_URL: &str = "https://events.pagerduty.com/v2/enqueue";

/// `PagerDuty` client for Events API v2.
#[derive(Debug, Clone)]
pub struct PagerDutyClient {
    endpoint: String,
    client: reqwest::Client,
}

impl PagerDutyClient {
    /// Create a client for the public Events API endpoint.
    #[must_use]
    pub fn new() -> Self {
        Self::with_endpoint(EVENTS_API_URL)
    }

    /// Create a client that posts to a different endpoint.
    #[must_use]
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Send an event to `PagerDuty`.
    ///
    /// Exactly one request is made; nothing is retried.
    ///
    /// # Errors
    /// Returns [`DispatchError::Http`] if the request fails or the response
    /// body is not valid JSON, and [`DispatchError::Api`] on a non-success
    /// status.
    pub async fn send_event(&self, event: &PagerDutyEvent) -> Result<EventResponse, DispatchError> {
        debug!(
            action = ?event.event_action,
            dedup_key = %event.dedup_key,
            endpoint = %self.endpoint,
            "Sending PagerDuty event"
        );

        let response = self.client.post(&self.endpoint).json(event).send().await?;

        if response.status().is_success() {
            let result: EventResponse = response.json().await?;
            debug!(dedup_key = ?result.dedup_key, "PagerDuty event sent successfully");
            Ok(result)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            warn!(
                status = %status,
                body = %body,
                "PagerDuty API request failed"
            );

            Err(DispatchError::Api { status, body })
        }
    }
}

impl Default for PagerDutyClient {
    fn default() -> Self {
        Self::new()
    }
}

/// `PagerDuty` event for Events API v2.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PagerDutyEvent {
    /// Integration key of the target service
    pub routing_key: String,
    /// Event action (trigger, resolve)
    pub event_action: EventAction,
    /// Dedup key correlating a trigger with its resolve
    pub dedup_key: String,
    /// Name of the monitoring client
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    /// Link back to the monitoring client
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_url: Option<String>,
    /// Event payload, only sent with triggers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<EventPayload>,
}

/// `PagerDuty` event action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventAction {
    /// Trigger a new incident or add to existing
    Trigger,
    /// Resolve an incident
    Resolve,
}

/// `PagerDuty` event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventPayload {
    /// Brief summary of the event
    pub summary: String,
    /// Timestamp (ISO 8601)
    pub timestamp: String,
    /// Source of the event
    pub source: String,
    /// Severity level
    pub severity: EventSeverity,
    /// Component affected
    pub component: String,
    /// Group for categorization
    pub group: String,
    /// Class/type of event
    pub class: String,
    /// Free-form details shown on the incident
    pub custom_details: String,
}

/// `PagerDuty` event severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventSeverity {
    /// Critical severity
    Critical,
    /// Error severity
    Error,
    /// Warning severity
    Warning,
    /// Info severity
    Info,
}

impl PagerDutyEvent {
    /// Create a trigger event carrying `payload`.
    #[must_use]
    pub fn trigger(
        routing_key: impl Into<String>,
        dedup_key: impl Into<String>,
        payload: EventPayload,
    ) -> Self {
        Self {
            routing_key: routing_key.into(),
            event_action: EventAction::Trigger,
            dedup_key: dedup_key.into(),
            client: None,
            client_url: None,
            payload: Some(payload),
        }
    }

    /// Create a resolve event for an existing incident.
    #[must_use]
    pub fn resolve(routing_key: impl Into<String>, dedup_key: impl Into<String>) -> Self {
        Self {
            routing_key: routing_key.into(),
            event_action: EventAction::Resolve,
            dedup_key: dedup_key.into(),
            client: None,
            client_url: None,
            payload: None,
        }
    }

    /// Set the client name and link.
    #[must_use]
    pub fn with_client(mut self, client: impl Into<String>, client_url: impl Into<String>) -> Self {
        self.client = Some(client.into());
        self.client_url = Some(client_url.into());
        self
    }
}

/// Response body of the Events API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EventResponse {
    /// `success` when the event was accepted
    pub status: String,
    /// Human-readable result message
    pub message: String,
    /// Dedup key the event was filed under
    #[serde(default)]
    pub dedup_key: Option<String>,
}

impl std::fmt::Display for EventResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.message)?;
        if let Some(dedup_key) = &self.dedup_key {
            write!(f, " (dedup_key {dedup_key})")?;
        }
        Ok(())
    }
}
