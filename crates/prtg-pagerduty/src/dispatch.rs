//! Turning an assembled alert into a single `PagerDuty` call.
//!
//! [`plan`] makes the decision without touching the network, which keeps the
//! resolve/trigger/suppress branching testable; [`dispatch`] sends whatever
//! the plan produced.

use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::{debug, info, warn};

use crate::alert::{truncate, AlertInput};
use crate::error::DispatchError;
use crate::pagerduty::{EventPayload, EventResponse, PagerDutyClient, PagerDutyEvent};
use crate::priority::{translate_priority, PriorityTranslation};

/// Client name reported on triggered incidents.
pub const CLIENT_NAME: &str = "PRTG";

/// Date format PRTG is configured to send, also used for the payload timestamp.
///
/// The three fractional digits are required when parsing.
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S.%3fZ";

/// Longest summary `PagerDuty` accepts without rejecting the event.
pub const SUMMARY_MAX_LENGTH: usize = 254;

/// What should be sent for an alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    /// Sensor recovered: resolve the open incident
    Resolve(PagerDutyEvent),
    /// Sensor is failing: open or update an incident
    Trigger(PagerDutyEvent),
    /// Priority too low to page anyone
    Suppressed,
}

/// What was actually sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Resolved(EventResponse),
    Triggered(EventResponse),
    Suppressed,
}

/// Decide which event, if any, to send for `alert`.
///
/// Recovery is checked first, so a recovered sensor is resolved whatever its
/// priority. `now` stands in for the event time when `date` does not parse.
#[must_use]
pub fn plan(alert: &AlertInput, now: DateTime<Utc>) -> Plan {
    if alert.is_recovery() {
        return Plan::Resolve(PagerDutyEvent::resolve(
            &alert.service_key,
            &alert.incident_key,
        ));
    }

    let severity = match translate_priority(&alert.priority) {
        PriorityTranslation::Suppress => return Plan::Suppressed,
        PriorityTranslation::Severity(severity) => severity,
    };

    let timestamp = parse_timestamp(&alert.date, now);
    let payload = EventPayload {
        summary: truncate(&alert.incident_key, SUMMARY_MAX_LENGTH),
        timestamp: format_timestamp(timestamp),
        source: alert.link.clone(),
        severity,
        component: alert.device.clone(),
        group: alert.probe.clone(),
        class: alert.name.clone(),
        custom_details: details_block(alert),
    };

    Plan::Trigger(
        PagerDutyEvent::trigger(&alert.service_key, &alert.incident_key, payload)
            .with_client(CLIENT_NAME, &alert.link),
    )
}

/// Parse a PRTG date, falling back to `now` if it is not in [`DATE_FORMAT`].
#[must_use]
pub fn parse_timestamp(date: &str, now: DateTime<Utc>) -> DateTime<Utc> {
    match NaiveDateTime::parse_from_str(date, DATE_FORMAT) {
        Ok(parsed) => parsed.and_utc(),
        Err(e) => {
            warn!(date = %date, error = %e, "Unparseable alert date, using current time");
            now
        }
    }
}

/// Format a timestamp the way it is sent in the payload.
#[must_use]
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format(DATE_FORMAT).to_string()
}

/// Human-readable details attached to a triggered incident.
#[must_use]
pub fn details_block(alert: &AlertInput) -> String {
    [
        ("Link", &alert.link),
        ("IncidentKey", &alert.incident_key),
        ("Status", &alert.status),
        ("Date", &alert.date),
        ("Message", &alert.message),
        ("Custom Routing", &alert.cust_routing),
    ]
    .iter()
    .map(|(label, value)| format!("{label}: {value}"))
    .collect::<Vec<_>>()
    .join("\n")
}

/// Plan and send the event for `alert`.
///
/// # Errors
/// Returns error if the request to `PagerDuty` fails.
pub async fn dispatch(
    client: &PagerDutyClient,
    alert: &AlertInput,
) -> Result<Outcome, DispatchError> {
    debug!(
        incident_key = %alert.incident_key,
        status = %alert.status,
        priority = %alert.priority,
        severity_flag = %alert.severity,
        truncate_length = alert.truncate_length,
        "Dispatching PRTG alert"
    );

    match plan(alert, Utc::now()) {
        Plan::Resolve(event) => {
            let response = client.send_event(&event).await?;
            info!(dedup_key = %event.dedup_key, response = %response, "Incident resolved");
            Ok(Outcome::Resolved(response))
        }
        Plan::Trigger(event) => {
            let response = client.send_event(&event).await?;
            info!(dedup_key = %event.dedup_key, response = %response, "Incident triggered");
            Ok(Outcome::Triggered(response))
        }
        Plan::Suppressed => {
            info!(
                incident_key = %alert.incident_key,
                "Priority '*' alerts are not forwarded"
            );
            Ok(Outcome::Suppressed)
        }
    }
}
