//! PRTG alert fields and the truncation applied to them.
//!
//! `PagerDuty` rejects events whose fields are too long, so every value PRTG
//! hands us is cut down before it goes anywhere near the wire.

/// Truncation limit used when `--truncatelength` is not given.
pub const DEFAULT_TRUNCATE_LENGTH: usize = 100;

/// Marker appended to every truncated value.
const ELLIPSIS: &str = "...";

/// Cut `value` down to `limit` characters, ending in `"..."`.
///
/// Values that already fit are returned unchanged. For limits of three or
/// less there is no room for the marker, so the first `limit` characters are
/// kept and the marker is still appended.
#[must_use]
pub fn truncate(value: &str, limit: usize) -> String {
    if value.chars().count() <= limit {
        return value.to_string();
    }

    let keep = if limit > ELLIPSIS.len() {
        limit - ELLIPSIS.len()
    } else {
        limit
    };
    let head: String = value.chars().take(keep).collect();
    format!("{head}{ELLIPSIS}")
}

/// Raw sensor fields as PRTG passes them, before truncation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertFields {
    pub probe: String,
    pub device: String,
    pub name: String,
    pub status: String,
    pub date: String,
    pub link: String,
    pub message: String,
    pub service_key: String,
    pub severity: String,
    pub priority: String,
    pub cust_routing: String,
}

/// A truncated PRTG alert together with its incident key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertInput {
    /// PRTG probe name
    pub probe: String,
    /// Device the sensor belongs to
    pub device: String,
    /// Sensor name
    pub name: String,
    /// Sensor status text, e.g. `Down` or `Up`
    pub status: String,
    /// Event time as formatted by PRTG
    pub date: String,
    /// Link to the sensor page
    pub link: String,
    /// PRTG message text
    pub message: String,
    /// `PagerDuty` integration (routing) key
    pub service_key: String,
    /// Severity passed on the command line; the event severity comes from `priority`
    pub severity: String,
    /// Sensor priority as a string of one to five stars
    pub priority: String,
    /// Identifier for `PagerDuty` event rules
    pub cust_routing: String,
    /// Dedup key shared by the trigger and the later resolve
    pub incident_key: String,
    /// Limit every field was truncated to
    pub truncate_length: usize,
}

impl AlertInput {
    /// Truncate every field to `truncate_length` and derive the incident key.
    ///
    /// The incident key is built from the truncated probe, device and name,
    /// then truncated itself.
    #[must_use]
    pub fn assemble(fields: AlertFields, truncate_length: usize) -> Self {
        let cut = |value: String| truncate(&value, truncate_length);

        let probe = cut(fields.probe);
        let device = cut(fields.device);
        let name = cut(fields.name);
        let incident_key = cut(Self::incident_key_for(&probe, &device, &name));

        Self {
            probe,
            device,
            name,
            status: cut(fields.status),
            date: cut(fields.date),
            link: cut(fields.link),
            message: cut(fields.message),
            service_key: cut(fields.service_key),
            severity: cut(fields.severity),
            priority: cut(fields.priority),
            cust_routing: cut(fields.cust_routing),
            incident_key,
            truncate_length,
        }
    }

    /// Incident key for a sensor: `probe-device-name`.
    #[must_use]
    pub fn incident_key_for(probe: &str, device: &str, name: &str) -> String {
        format!("{probe}-{device}-{name}")
    }

    /// Whether the status reports that the sensor is back up.
    ///
    /// Case-sensitive substring match on `Up` or `ended`.
    #[must_use]
    pub fn is_recovery(&self) -> bool {
        self.status.contains("Up") || self.status.contains("ended")
    }
}
