//! Command-line flags passed by the PRTG notification template.

use clap::Parser;

use crate::alert::{AlertFields, AlertInput, DEFAULT_TRUNCATE_LENGTH};
use crate::pagerduty::EVENTS_API_URL;

/// Flag names PRTG templates may spell with a single dash (`-probe`).
const LONG_FLAGS: &[&str] = &[
    "probe",
    "device",
    "name",
    "status",
    "date",
    "linkdevice",
    "message",
    "servicekey",
    "severity",
    "priority",
    "custrouting",
    "truncatelength",
];

#[derive(Debug, Parser)]
#[command(name = "prtg-pagerduty")]
#[command(about = "Forward a PRTG sensor notification to PagerDuty")]
#[command(version)]
pub struct Cli {
    /// The PRTG probe name
    #[arg(long, default_value = "local", allow_hyphen_values = true)]
    pub probe: String,

    /// The PRTG device name
    #[arg(long, default_value = "device", allow_hyphen_values = true)]
    pub device: String,

    /// The PRTG sensor name for the device
    #[arg(long, default_value = "name", allow_hyphen_values = true)]
    pub name: String,

    /// The current status for the event
    #[arg(long, default_value = "status", allow_hyphen_values = true)]
    pub status: String,

    /// The date time for the triggered event
    #[arg(long, default_value = "date", allow_hyphen_values = true)]
    pub date: String,

    /// The link to the triggering sensor
    #[arg(
        long = "linkdevice",
        default_value = "http://localhost",
        allow_hyphen_values = true
    )]
    pub link: String,

    /// The PRTG message for the alert
    #[arg(long, default_value = "message", allow_hyphen_values = true)]
    pub message: String,

    /// The PagerDuty v2 service integration key
    #[arg(
        long = "servicekey",
        env = "PAGERDUTY_ROUTING_KEY",
        default_value = "myServiceKey",
        hide_env_values = true,
        allow_hyphen_values = true
    )]
    pub service_key: String,

    /// The severity level of the incident (critical, error, warning, or info)
    #[arg(long, default_value = "error", allow_hyphen_values = true)]
    pub severity: String,

    /// The priority of the sensor in PRTG
    #[arg(long, default_value = "priority", allow_hyphen_values = true)]
    pub priority: String,

    /// The custom routing identifier for PagerDuty event rules
    #[arg(
        long = "custrouting",
        default_value = "custrouting",
        allow_hyphen_values = true
    )]
    pub cust_routing: String,

    /// The length all inputs are truncated to so PagerDuty accepts them
    #[arg(long = "truncatelength", default_value_t = DEFAULT_TRUNCATE_LENGTH)]
    pub truncate_length: usize,

    /// Events API endpoint events are posted to
    #[arg(
        long = "events-url",
        env = "PAGERDUTY_EVENTS_URL",
        default_value = EVENTS_API_URL,
        hide = true
    )]
    pub events_url: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Parse process arguments, accepting single-dash long flags.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse_from(normalize_args(std::env::args()))
    }

    /// Truncate the flags into an [`AlertInput`].
    #[must_use]
    pub fn into_alert(self) -> AlertInput {
        let truncate_length = self.truncate_length;
        AlertInput::assemble(
            AlertFields {
                probe: self.probe,
                device: self.device,
                name: self.name,
                status: self.status,
                date: self.date,
                link: self.link,
                message: self.message,
                service_key: self.service_key,
                severity: self.severity,
                priority: self.priority,
                cust_routing: self.cust_routing,
            },
            truncate_length,
        )
    }
}

/// Rewrite `-probe` style flags to `--probe`.
///
/// The first argument is the program name and is kept as-is. A flag given
/// without `=value` takes the next argument as its value, and that argument
/// is copied unchanged even when it looks like a flag.
#[must_use]
pub fn normalize_args<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut normalized: Vec<String> = args.next().into_iter().collect();

    while let Some(arg) = args.next() {
        let Some((flag, inline_value)) = known_flag(&arg) else {
            normalized.push(arg);
            continue;
        };
        normalized.push(format!("--{flag}"));
        if !inline_value {
            normalized.extend(args.next());
        }
    }

    normalized
}

/// Split `-flag`, `--flag` or `-flag=value` into the flag text after the
/// dashes and whether it carries its value inline.
fn known_flag(arg: &str) -> Option<(&str, bool)> {
    let rest = arg.strip_prefix("--").or_else(|| arg.strip_prefix('-'))?;
    let (name, inline_value) = match rest.split_once('=') {
        Some((name, _)) => (name, true),
        None => (rest, false),
    };
    LONG_FLAGS.contains(&name).then_some((rest, inline_value))
}
