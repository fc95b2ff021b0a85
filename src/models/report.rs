use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Embedded copy of a review at the moment it was reported. Frozen once
/// the report is filed; later edits to the live review don't touch it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSnapshot {
    pub movie_title: String,
    pub user: String,
    pub rating: f64,
    pub useful_votes: i64,
    pub total_votes: i64,
    pub title: String,
    pub body: String,
    /// The ledger's report counter *after* the increment that this
    /// filing caused.
    pub report_count: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
    Confirmed,
    Rejected,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "pending",
            ReportStatus::Confirmed => "confirmed",
            ReportStatus::Rejected => "rejected",
        }
    }
}

impl std::str::FromStr for ReportStatus {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ReportStatus::Pending),
            "confirmed" => Ok(ReportStatus::Confirmed),
            "rejected" => Ok(ReportStatus::Rejected),
            _ => Err(()),
        }
    }
}

/// One moderation case persisted in reports.json. Created pending,
/// decided at most once, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub report_id: i64,
    pub review: ReviewSnapshot,
    pub reported_by: String,
    pub status: ReportStatus,
    pub date_reported: DateTime<Utc>,
    pub reason_type: String,
    pub reason: Option<String>,
    pub handled_by_admin: Option<String>,
    pub handled_at: Option<DateTime<Utc>>,
    /// Seconds of ban applied because of *this* report; null if the
    /// decision produced no ban.
    pub ban_duration_seconds: Option<i64>,
}

/// Input for filing a new report.
#[derive(Debug)]
pub struct CreateReportInput {
    pub review: ReviewSnapshot,
    pub reported_by: String,
    pub reason_type: String,
    pub reason: Option<String>,
}

/// Admin decision on a pending report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionAction {
    Confirm,
    Reject,
}
