use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One entry in users.json. Moderation only ever touches `penalties` and
/// `banExpiresAt`; everything else the platform stores on a user
/// (password hash, email, watchlist, ...) rides along untouched in
/// `extra` so a rewrite never drops fields it doesn't understand.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub user_name: String,

    /// Confirmed-report count. Absent until the first penalty; legacy
    /// files may hold it as a string, which is coerced on read.
    #[serde(
        default,
        deserialize_with = "coerce_opt_i64",
        skip_serializing_if = "Option::is_none"
    )]
    pub penalties: Option<i64>,

    /// Unix timestamp until which the user is banned. Overwritten by the
    /// most recent ban, never combined with an earlier one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ban_expires_at: Option<i64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserRecord {
    pub fn penalty_count(&self) -> i64 {
        self.penalties.unwrap_or(0)
    }
}

/// Accept a number, a numeric string, or null; anything unparseable
/// counts as 0, matching how the rest of the platform reads this field.
fn coerce_opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        Value::Number(n) => n.as_i64().unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }))
}
