//! Store for ban records (bans.json).

use std::path::PathBuf;
use std::sync::Mutex;

use chrono::Duration;

use crate::error::Result;
use crate::models::{Ban, CreateBanInput};

use super::{acquire, read_json_collection, write_json_collection};

pub struct BansDb {
    path: PathBuf,
    lock: Mutex<()>,
}

impl BansDb {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    fn load(&self) -> Result<Vec<Ban>> {
        read_json_collection(&self.path)
    }

    /// Append one ban record. Ids are monotonic from 1; `bannedUntil` is
    /// derived from the option's fixed duration, never stored separately.
    pub fn create_ban(&self, input: CreateBanInput) -> Result<Ban> {
        let _guard = acquire(&self.lock)?;
        let mut bans = self.load()?;
        let next_id = bans.iter().map(|b| b.ban_id).max().unwrap_or(0) + 1;

        let duration_seconds = input.ban_option.duration_seconds();
        let ban = Ban {
            ban_id: next_id,
            user_name: input.user_name,
            reported_by: input.reported_by,
            report_id: input.report_id,
            movie_title: input.movie_title,
            review_user: input.review_user,
            reason_type: input.reason_type,
            reason: input.reason,
            ban_option: input.ban_option,
            ban_duration_seconds: duration_seconds,
            banned_at: input.banned_at,
            banned_until: input.banned_at + Duration::seconds(duration_seconds),
        };

        bans.push(ban.clone());
        write_json_collection(&self.path, &bans)?;

        tracing::warn!(
            ban_id = ban.ban_id,
            user_name = %ban.user_name,
            report_id = ban.report_id,
            ban_option = ban.ban_option.as_str(),
            banned_until = %ban.banned_until,
            "User banned"
        );

        Ok(ban)
    }

    /// All bans in insertion order, optionally only those for one user.
    pub fn list_bans(&self, user_name: Option<&str>) -> Result<Vec<Ban>> {
        let _guard = acquire(&self.lock)?;
        let bans = self.load()?;
        Ok(match user_name {
            None => bans,
            Some(name) => bans.into_iter().filter(|b| b.user_name == name).collect(),
        })
    }
}
