use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed ban durations offered to admins. The tag → seconds mapping is
/// part of the wire contract and must not drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BanOption {
    #[serde(rename = "3d")]
    ThreeDays,
    #[serde(rename = "7d")]
    SevenDays,
    #[serde(rename = "30d")]
    ThirtyDays,
}

impl BanOption {
    pub fn duration_seconds(&self) -> i64 {
        match self {
            BanOption::ThreeDays => 259_200,
            BanOption::SevenDays => 604_800,
            BanOption::ThirtyDays => 2_592_000,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BanOption::ThreeDays => "3d",
            BanOption::SevenDays => "7d",
            BanOption::ThirtyDays => "30d",
        }
    }
}

/// One ban event persisted in bans.json. This is an append-only audit
/// log; the user record's `banExpiresAt` holds the *current* ban state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ban {
    pub ban_id: i64,
    /// Who is banned; may not exist in users.json (CSV-only reviewers).
    pub user_name: String,
    pub reported_by: String,
    pub report_id: i64,
    pub movie_title: String,
    pub review_user: String,
    pub reason_type: String,
    pub reason: Option<String>,
    pub ban_option: BanOption,
    pub ban_duration_seconds: i64,
    pub banned_at: DateTime<Utc>,
    pub banned_until: DateTime<Utc>,
}

/// Input for creating a new ban record.
#[derive(Debug)]
pub struct CreateBanInput {
    pub user_name: String,
    pub reported_by: String,
    pub report_id: i64,
    pub movie_title: String,
    pub review_user: String,
    pub reason_type: String,
    pub reason: Option<String>,
    pub ban_option: BanOption,
    pub banned_at: DateTime<Utc>,
}
