use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Result of one refresh trigger.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RefreshOutcome {
    /// Markers were replaced
    Rendered { markers: usize, skipped_rows: usize },
    /// The upstream answered without usable rows, markers were kept
    NoData,
    /// The fetch failed, markers were kept
    Failed { reason: String },
    /// Another refresh was in flight, the trigger was dropped
    Skipped,
}

impl RefreshOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, RefreshOutcome::Rendered { .. })
    }
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RefreshStatusResponse {
    /// Outcome of the latest completed cycle
    pub last_outcome: Option<RefreshOutcome>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub last_attempt_at: Option<OffsetDateTime>,
    /// Latest cycle that rendered markers
    #[serde(with = "time::serde::rfc3339::option")]
    pub last_success_at: Option<OffsetDateTime>,
    /// Completed cycles, skipped triggers excluded
    pub cycles: u64,
    pub in_flight: bool,
}
