//! Orchestrates moderation: filing reports, deciding them, issuing bans
//! and keeping user penalty/ban-expiry fields in step.

use std::sync::Arc;

use chrono::Utc;

use crate::config::Config;
use crate::db::{BansDb, ReportsDb, ReviewsDb, UsersDb};
use crate::error::{AppError, Result};
use crate::models::{
    Ban, BanOption, CreateBanInput, CreateReportInput, DecisionAction, Report, ReportStatus,
    ReviewSnapshot,
};

pub struct ModerationService {
    reports: Arc<ReportsDb>,
    bans: Arc<BansDb>,
    users: Arc<UsersDb>,
    reviews: Arc<ReviewsDb>,
}

impl ModerationService {
    pub fn new(
        reports: Arc<ReportsDb>,
        bans: Arc<BansDb>,
        users: Arc<UsersDb>,
        reviews: Arc<ReviewsDb>,
    ) -> Self {
        Self {
            reports,
            bans,
            users,
            reviews,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Arc::new(ReportsDb::new(config.reports_file())),
            Arc::new(BansDb::new(config.bans_file())),
            Arc::new(UsersDb::new(config.users_file())),
            Arc::new(ReviewsDb::new(config.reviews_dir())),
        )
    }

    /// File a report against one review. The review's ledger counter is
    /// incremented first and the returned report embeds a snapshot with
    /// the post-increment count. There is no dedupe: the same reporter
    /// can file against the same review repeatedly and each filing gets
    /// its own id and counter bump.
    pub fn report_review(
        &self,
        movie_title: &str,
        review_user: &str,
        reported_by: &str,
        reason_type: String,
        reason: Option<String>,
    ) -> Result<Report> {
        let snapshot = self.reviews.capture_and_increment(movie_title, review_user)?;
        self.reports.create_report(CreateReportInput {
            review: snapshot,
            reported_by: reported_by.to_string(),
            reason_type,
            reason,
        })
    }

    /// Decide a pending report. Terminal either way:
    ///
    /// - reject → status `rejected`, nothing else changes.
    /// - confirm → status `confirmed`, the review author's penalty count
    ///   goes up (if they are registered), and a ban option additionally
    ///   creates a ban record and overwrites the author's ban expiry.
    pub fn decide_report(
        &self,
        report_id: i64,
        action: DecisionAction,
        ban_option: Option<BanOption>,
        admin_username: &str,
    ) -> Result<(Report, Option<Ban>)> {
        let mut report = self.reports.get_report(report_id)?;

        if report.status != ReportStatus::Pending {
            return Err(AppError::InvalidState("Report already decided".to_string()));
        }

        let now = Utc::now();
        report.handled_by_admin = Some(admin_username.to_string());
        report.handled_at = Some(now);

        if action == DecisionAction::Reject {
            report.status = ReportStatus::Rejected;
            report.ban_duration_seconds = None;
            self.reports.replace_report(&report)?;
            tracing::info!(report_id, admin = %admin_username, "Report rejected");
            return Ok((report, None));
        }

        report.status = ReportStatus::Confirmed;

        // CSV-only reviewers have no user record; the increment is a
        // silent no-op for them.
        self.users.increment_penalties(&report.review.user)?;

        let Some(ban_option) = ban_option else {
            report.ban_duration_seconds = None;
            self.reports.replace_report(&report)?;
            tracing::info!(report_id, admin = %admin_username, "Report confirmed");
            return Ok((report, None));
        };

        report.ban_duration_seconds = Some(ban_option.duration_seconds());

        let ban = self.bans.create_ban(CreateBanInput {
            user_name: report.review.user.clone(),
            reported_by: report.reported_by.clone(),
            report_id: report.report_id,
            movie_title: report.review.movie_title.clone(),
            review_user: report.review.user.clone(),
            reason_type: report.reason_type.clone(),
            reason: report.reason.clone(),
            ban_option,
            banned_at: now,
        })?;

        // Latest ban wins, even when an earlier one would end later.
        self.users
            .set_ban_expiry(&report.review.user, ban.banned_until.timestamp())?;

        self.reports.replace_report(&report)?;

        tracing::info!(
            report_id,
            admin = %admin_username,
            ban_id = ban.ban_id,
            ban_option = ban.ban_option.as_str(),
            "Report confirmed with ban"
        );

        Ok((report, Some(ban)))
    }

    pub fn list_pending_reports(&self) -> Result<Vec<Report>> {
        self.reports.list_reports(Some(ReportStatus::Pending))
    }

    pub fn list_reports(&self, status: Option<ReportStatus>) -> Result<Vec<Report>> {
        self.reports.list_reports(status)
    }

    pub fn list_reports_for_review(
        &self,
        movie_title: &str,
        review_user: &str,
    ) -> Result<Vec<Report>> {
        self.reports.list_reports_for_review(movie_title, review_user)
    }

    pub fn list_bans(&self, user_name: Option<&str>) -> Result<Vec<Ban>> {
        self.bans.list_bans(user_name)
    }

    pub fn list_reported_reviews(&self) -> Result<Vec<ReviewSnapshot>> {
        self.reviews.list_reported_reviews()
    }
}
