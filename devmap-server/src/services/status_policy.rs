use devmap_api::models::DeviceStatus;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, Duration, OffsetDateTime, PrimitiveDateTime, UtcOffset};

use crate::configs::Status;

/// Classifies devices by the time elapsed since their last communication.
#[derive(Debug, Clone)]
pub struct StatusPolicy {
    warning_after: Duration,
    stale_after: Duration,
}

impl StatusPolicy {
    pub fn new(status: &Status) -> Self {
        Self {
            warning_after: Duration::seconds_f64(status.warning_after_hours * 3600.0),
            stale_after: Duration::seconds_f64(status.stale_after_hours * 3600.0),
        }
    }

    /// Thresholds are exclusive: a device silent for exactly the stale
    /// threshold is still a warning, and exactly the warning threshold is
    /// still healthy. Timestamps in the future count as healthy.
    pub fn classify(&self, last_seen: Option<&str>, now: OffsetDateTime) -> DeviceStatus {
        let Some(seen_at) = last_seen.and_then(parse_timestamp) else {
            return DeviceStatus::Unknown;
        };

        let elapsed = now - seen_at;

        if elapsed > self.stale_after {
            DeviceStatus::Stale
        } else if elapsed > self.warning_after {
            DeviceStatus::Warning
        } else {
            DeviceStatus::Healthy
        }
    }
}

impl Default for StatusPolicy {
    fn default() -> Self {
        Self::new(&Status::default())
    }
}

/// Reads the timestamp formats the device inventory is known to emit.
///
/// Values without an offset are taken as UTC.
pub fn parse_timestamp(text: &str) -> Option<OffsetDateTime> {
    let text = text.trim();

    if text.is_empty() {
        return None;
    }

    if let Ok(instant) = OffsetDateTime::parse(text, &Rfc3339) {
        return Some(instant);
    }

    let with_offset = format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second][optional [.[subsecond]]][offset_hour sign:mandatory][optional [:[offset_minute]]]"
    );
    if let Ok(instant) = OffsetDateTime::parse(text, with_offset) {
        return Some(instant);
    }

    let local_formats = [
        format_description!("[year]-[month]-[day] [hour]:[minute][optional [:[second][optional [.[subsecond]]]]]"),
        format_description!("[year]-[month]-[day]T[hour]:[minute][optional [:[second][optional [.[subsecond]]]]]"),
    ];
    for format in local_formats {
        if let Ok(instant) = PrimitiveDateTime::parse(text, format) {
            return Some(instant.assume_offset(UtcOffset::UTC));
        }
    }

    Date::parse(text, format_description!("[year]-[month]-[day]"))
        .ok()
        .map(|date| date.midnight().assume_utc())
}
