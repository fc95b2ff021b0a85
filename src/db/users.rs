//! Store for user records (users.json).
//!
//! Moderation holds a weak reference to users by name: reviewers that
//! only exist in the CSV ledgers have no users.json entry, and every
//! operation here silently skips them rather than failing.

use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::Result;
use crate::models::UserRecord;

use super::{acquire, read_json_collection, write_json_collection};

pub struct UsersDb {
    path: PathBuf,
    lock: Mutex<()>,
}

impl UsersDb {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    fn load(&self) -> Result<Vec<UserRecord>> {
        read_json_collection(&self.path)
    }

    pub fn get_user(&self, user_name: &str) -> Result<Option<UserRecord>> {
        let _guard = acquire(&self.lock)?;
        Ok(self
            .load()?
            .into_iter()
            .find(|u| u.user_name == user_name))
    }

    /// Add one penalty to a registered user. No-op for CSV-only
    /// reviewers.
    pub fn increment_penalties(&self, user_name: &str) -> Result<()> {
        let _guard = acquire(&self.lock)?;
        let mut users = self.load()?;
        let mut changed = false;

        if let Some(user) = users.iter_mut().find(|u| u.user_name == user_name) {
            user.penalties = Some(user.penalty_count() + 1);
            changed = true;
        }

        if changed {
            write_json_collection(&self.path, &users)?;
            tracing::info!(user = %user_name, "Penalty recorded");
        }
        Ok(())
    }

    /// Overwrite the user's ban expiry (Unix seconds). The latest ban
    /// always wins, even when an earlier one would end later. No-op for
    /// CSV-only reviewers.
    pub fn set_ban_expiry(&self, user_name: &str, expires_at: i64) -> Result<()> {
        let _guard = acquire(&self.lock)?;
        let mut users = self.load()?;
        let mut changed = false;

        if let Some(user) = users.iter_mut().find(|u| u.user_name == user_name) {
            user.ban_expires_at = Some(expires_at);
            changed = true;
        }

        if changed {
            write_json_collection(&self.path, &users)?;
            tracing::info!(user = %user_name, expires_at, "Ban expiry updated");
        }
        Ok(())
    }
}
