//! Forward PRTG sensor notifications to `PagerDuty`.
//!
//! PRTG runs an external program for each notification and passes the sensor
//! fields as command-line flags. This crate turns those flags into a single
//! `PagerDuty` Events API v2 call: a `resolve` when the sensor has recovered,
//! a `trigger` with a full payload otherwise.
//!
//! # Usage
//!
//! ```no_run
//! use prtg_pagerduty::{
//!     dispatch, AlertFields, AlertInput, PagerDutyClient, DEFAULT_TRUNCATE_LENGTH,
//! };
//!
//! # async fn example() -> anyhow::Result<()> {
//! let fields = AlertFields {
//!     probe: "local".to_string(),
//!     device: "router1".to_string(),
//!     name: "CPU".to_string(),
//!     status: "Down".to_string(),
//!     priority: "***".to_string(),
//!     service_key: "my-routing-key".to_string(),
//!     ..AlertFields::default()
//! };
//! let alert = AlertInput::assemble(fields, DEFAULT_TRUNCATE_LENGTH);
//!
//! let _outcome = dispatch(&PagerDutyClient::new(), &alert).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - [`alert`] assembles the truncated [`AlertInput`] and its incident key
//! - [`priority`] maps the PRTG priority stars to an [`EventSeverity`]
//! - [`dispatch`](mod@dispatch) decides between resolve, trigger and suppression
//! - [`pagerduty`] builds and sends the Events API v2 request

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod alert;
pub mod cli;
pub mod dispatch;
pub mod error;
pub mod pagerduty;
pub mod priority;

pub use alert::{truncate, AlertFields, AlertInput, DEFAULT_TRUNCATE_LENGTH};
pub use dispatch::{dispatch, plan, Outcome, Plan};
pub use error::DispatchError;
pub use pagerduty::{
    EventAction, EventPayload, EventResponse, EventSeverity, PagerDutyClient, PagerDutyEvent,
};
pub use priority::{translate_priority, PriorityTranslation};
