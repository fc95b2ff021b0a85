//! Store for moderation reports (reports.json).

use std::path::PathBuf;
use std::sync::Mutex;

use chrono::Utc;

use crate::error::{AppError, Result};
use crate::models::{CreateReportInput, Report, ReportStatus};

use super::{acquire, read_json_collection, write_json_collection};

pub struct ReportsDb {
    path: PathBuf,
    lock: Mutex<()>,
}

impl ReportsDb {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    fn load(&self) -> Result<Vec<Report>> {
        read_json_collection(&self.path)
    }

    fn save(&self, reports: &[Report]) -> Result<()> {
        write_json_collection(&self.path, reports)
    }

    /// Create a new pending report. Ids are monotonic from 1 and never
    /// reused while the collection keeps its history.
    pub fn create_report(&self, input: CreateReportInput) -> Result<Report> {
        let _guard = acquire(&self.lock)?;
        let mut reports = self.load()?;
        let next_id = reports.iter().map(|r| r.report_id).max().unwrap_or(0) + 1;

        let report = Report {
            report_id: next_id,
            review: input.review,
            reported_by: input.reported_by,
            status: ReportStatus::Pending,
            date_reported: Utc::now(),
            reason_type: input.reason_type,
            reason: input.reason,
            handled_by_admin: None,
            handled_at: None,
            ban_duration_seconds: None,
        };

        reports.push(report.clone());
        self.save(&reports)?;

        tracing::info!(
            report_id = report.report_id,
            reported_by = %report.reported_by,
            movie = %report.review.movie_title,
            review_user = %report.review.user,
            reason_type = %report.reason_type,
            "Report created"
        );

        Ok(report)
    }

    pub fn get_report(&self, report_id: i64) -> Result<Report> {
        let _guard = acquire(&self.lock)?;
        self.load()?
            .into_iter()
            .find(|r| r.report_id == report_id)
            .ok_or_else(|| AppError::NotFound("Report not found".to_string()))
    }

    /// Replace the stored report carrying the same id.
    pub fn replace_report(&self, updated: &Report) -> Result<()> {
        let _guard = acquire(&self.lock)?;
        let mut reports = self.load()?;
        let idx = reports
            .iter()
            .position(|r| r.report_id == updated.report_id)
            .ok_or_else(|| {
                AppError::NotFound(format!("Report with id {} not found", updated.report_id))
            })?;
        reports[idx] = updated.clone();
        self.save(&reports)
    }

    /// All reports in insertion order, optionally filtered by status.
    pub fn list_reports(&self, status: Option<ReportStatus>) -> Result<Vec<Report>> {
        let _guard = acquire(&self.lock)?;
        let reports = self.load()?;
        Ok(match status {
            None => reports,
            Some(status) => reports.into_iter().filter(|r| r.status == status).collect(),
        })
    }

    /// Every report (any status) whose snapshot matches the given review.
    pub fn list_reports_for_review(
        &self,
        movie_title: &str,
        review_user: &str,
    ) -> Result<Vec<Report>> {
        let _guard = acquire(&self.lock)?;
        Ok(self
            .load()?
            .into_iter()
            .filter(|r| r.review.movie_title == movie_title && r.review.user == review_user)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReviewSnapshot;

    fn snapshot(movie: &str, user: &str) -> ReviewSnapshot {
        ReviewSnapshot {
            movie_title: movie.to_string(),
            user: user.to_string(),
            rating: 7.5,
            useful_votes: 3,
            total_votes: 8,
            title: "title".to_string(),
            body: "body".to_string(),
            report_count: 1,
        }
    }

    fn input(movie: &str, user: &str, reporter: &str) -> CreateReportInput {
        CreateReportInput {
            review: snapshot(movie, user),
            reported_by: reporter.to_string(),
            reason_type: "spam".to_string(),
            reason: None,
        }
    }

    fn db() -> (tempfile::TempDir, ReportsDb) {
        let dir = tempfile::tempdir().unwrap();
        let db = ReportsDb::new(dir.path().join("reports.json"));
        (dir, db)
    }

    #[test]
    fn ids_are_monotonic_from_one() {
        let (_dir, db) = db();
        let first = db.create_report(input("Joker", "cat", "alice")).unwrap();
        let second = db.create_report(input("Joker", "cat", "bob")).unwrap();
        assert_eq!(first.report_id, 1);
        assert_eq!(second.report_id, 2);
        assert_eq!(first.status, ReportStatus::Pending);
        assert!(first.handled_by_admin.is_none());
        assert!(first.handled_at.is_none());
        assert!(first.ban_duration_seconds.is_none());
    }

    #[test]
    fn get_report_misses_with_not_found() {
        let (_dir, db) = db();
        assert!(matches!(db.get_report(999), Err(AppError::NotFound(_))));
    }

    #[test]
    fn replace_rejects_unknown_ids() {
        let (_dir, db) = db();
        let mut report = db.create_report(input("Joker", "cat", "alice")).unwrap();
        report.report_id = 42;
        assert!(matches!(
            db.replace_report(&report),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn replace_persists_the_mutation() {
        let (_dir, db) = db();
        let mut report = db.create_report(input("Joker", "cat", "alice")).unwrap();
        report.status = ReportStatus::Rejected;
        report.handled_by_admin = Some("root".to_string());
        report.handled_at = Some(Utc::now());
        db.replace_report(&report).unwrap();

        let stored = db.get_report(report.report_id).unwrap();
        assert_eq!(stored.status, ReportStatus::Rejected);
        assert_eq!(stored.handled_by_admin.as_deref(), Some("root"));
    }

    #[test]
    fn listing_filters_by_status_and_review() {
        let (_dir, db) = db();
        db.create_report(input("Joker", "cat", "alice")).unwrap();
        db.create_report(input("Joker", "dave", "alice")).unwrap();
        let mut third = db.create_report(input("Heat", "cat", "bob")).unwrap();
        third.status = ReportStatus::Confirmed;
        db.replace_report(&third).unwrap();

        assert_eq!(db.list_reports(None).unwrap().len(), 3);
        assert_eq!(
            db.list_reports(Some(ReportStatus::Pending)).unwrap().len(),
            2
        );
        assert_eq!(
            db.list_reports(Some(ReportStatus::Confirmed))
                .unwrap()
                .len(),
            1
        );

        let for_review = db.list_reports_for_review("Joker", "cat").unwrap();
        assert_eq!(for_review.len(), 1);
        assert_eq!(for_review[0].report_id, 1);
        // Status does not matter for the per-review listing.
        assert_eq!(db.list_reports_for_review("Heat", "cat").unwrap().len(), 1);
    }
}
