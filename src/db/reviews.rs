//! Per-movie CSV review ledgers (`<root>/<movie>/movieReviews.csv`).
//!
//! This is the moderation side of the review store: find the one row for
//! a (movie, author) pair, bump its report counter, and hand back a
//! frozen snapshot. The whole file is rewritten on every increment;
//! partial-row writes never happen.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use csv::{ReaderBuilder, WriterBuilder};

use crate::error::{AppError, Result};
use crate::models::ReviewSnapshot;

use super::acquire;

pub(crate) const LEDGER_FILE: &str = "movieReviews.csv";

const COL_USER: &str = "User";
const COL_USEFUL_VOTES: &str = "Usefulness Vote";
const COL_TOTAL_VOTES: &str = "Total Votes";
const COL_RATING: &str = "User's Rating out of 10";
const COL_REVIEW_TITLE: &str = "Review Title";
const COL_REVIEW: &str = "Review";
const COL_REPORTS: &str = "Reports";

pub struct ReviewsDb {
    root: PathBuf,
    lock: Mutex<()>,
}

fn col(headers: &[String], name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name)
}

fn cell<'a>(headers: &[String], row: &'a [String], name: &str) -> &'a str {
    col(headers, name)
        .and_then(|i| row.get(i))
        .map(String::as_str)
        .unwrap_or("")
}

fn parse_i64(raw: &str) -> i64 {
    raw.trim().parse().unwrap_or(0)
}

fn parse_f64(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(0.0)
}

fn snapshot_from_row(
    headers: &[String],
    row: &[String],
    movie_title: &str,
    report_count: i64,
) -> ReviewSnapshot {
    ReviewSnapshot {
        movie_title: movie_title.to_string(),
        user: cell(headers, row, COL_USER).to_string(),
        rating: parse_f64(cell(headers, row, COL_RATING)),
        useful_votes: parse_i64(cell(headers, row, COL_USEFUL_VOTES)),
        total_votes: parse_i64(cell(headers, row, COL_TOTAL_VOTES)),
        title: cell(headers, row, COL_REVIEW_TITLE).to_string(),
        body: cell(headers, row, COL_REVIEW).to_string(),
        report_count,
    }
}

impl ReviewsDb {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            lock: Mutex::new(()),
        }
    }

    fn ledger_path(&self, movie_title: &str) -> PathBuf {
        self.root.join(movie_title).join(LEDGER_FILE)
    }

    fn read_ledger(&self, movie_title: &str) -> Result<(Vec<String>, Vec<Vec<String>>)> {
        let path = self.ledger_path(movie_title);
        let mut reader = ReaderBuilder::new().flexible(true).from_path(&path)?;
        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let mut row: Vec<String> = record.iter().map(str::to_string).collect();
            row.resize(headers.len().max(row.len()), String::new());
            rows.push(row);
        }
        Ok((headers, rows))
    }

    fn write_ledger(&self, movie_title: &str, headers: &[String], rows: &[Vec<String>]) -> Result<()> {
        let path = self.ledger_path(movie_title);
        let tmp = path.with_extension("tmp");
        {
            let mut writer = WriterBuilder::new().flexible(true).from_path(&tmp)?;
            writer.write_record(headers)?;
            for row in rows {
                writer.write_record(row)?;
            }
            writer.flush()?;
        }
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    /// Locate the review for (movie, author), bump its report counter by
    /// one, rewrite the ledger, and return a snapshot carrying the
    /// post-increment count. Blank or non-numeric counters count as 0.
    pub fn capture_and_increment(
        &self,
        movie_title: &str,
        review_user: &str,
    ) -> Result<ReviewSnapshot> {
        let _guard = acquire(&self.lock)?;

        if !self.ledger_path(movie_title).exists() {
            return Err(AppError::NotFound(format!(
                "No reviews found for movie '{movie_title}'"
            )));
        }

        let (mut headers, mut rows) = self.read_ledger(movie_title)?;

        let target = col(&headers, COL_USER).and_then(|user_idx| {
            rows.iter()
                .position(|row| row.get(user_idx).map(String::as_str) == Some(review_user))
        });
        let Some(target) = target else {
            return Err(AppError::NotFound(format!(
                "Review not found for movie '{movie_title}' and user '{review_user}'"
            )));
        };

        // Ledgers written before moderation existed have no Reports
        // column; add it rather than failing.
        let reports_idx = match col(&headers, COL_REPORTS) {
            Some(idx) => idx,
            None => {
                headers.push(COL_REPORTS.to_string());
                headers.len() - 1
            }
        };
        for row in rows.iter_mut() {
            if row.len() < headers.len() {
                row.resize(headers.len(), String::new());
            }
        }

        let new_count = parse_i64(&rows[target][reports_idx]) + 1;
        rows[target][reports_idx] = new_count.to_string();

        self.write_ledger(movie_title, &headers, &rows)?;

        tracing::info!(
            movie = %movie_title,
            review_user = %review_user,
            report_count = new_count,
            "Review report counter incremented"
        );

        Ok(snapshot_from_row(&headers, &rows[target], movie_title, new_count))
    }

    /// Scan every movie ledger and return the reviews that have been
    /// reported at least once, counters normalised to integers.
    pub fn list_reported_reviews(&self) -> Result<Vec<ReviewSnapshot>> {
        let _guard = acquire(&self.lock)?;

        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut movie_dirs: Vec<PathBuf> = fs::read_dir(&self.root)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect();
        movie_dirs.sort();

        let mut reported = Vec::new();
        for dir in movie_dirs {
            let Some(movie_title) = dir.file_name().and_then(|n| n.to_str()).map(str::to_string)
            else {
                continue;
            };
            if !dir.join(LEDGER_FILE).exists() {
                continue;
            }
            let (headers, rows) = self.read_ledger(&movie_title)?;
            for row in &rows {
                let count = parse_i64(cell(&headers, row, COL_REPORTS));
                if count > 0 {
                    reported.push(snapshot_from_row(&headers, row, &movie_title, count));
                }
            }
        }
        Ok(reported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Movie Title,Date of Review,User,Usefulness Vote,Total Votes,User's Rating out of 10,Review Title,Review,Reports";

    fn seeded_db(movie: &str, body: &str) -> (tempfile::TempDir, ReviewsDb) {
        let dir = tempfile::tempdir().unwrap();
        let movie_dir = dir.path().join(movie);
        fs::create_dir_all(&movie_dir).unwrap();
        fs::write(movie_dir.join(LEDGER_FILE), body).unwrap();
        let db = ReviewsDb::new(dir.path().to_path_buf());
        (dir, db)
    }

    #[test]
    fn increments_blank_counter_from_zero() {
        let (_dir, db) = seeded_db(
            "Joker",
            &format!("{HEADER}\nJoker,2019-10-05,cat,10,12,9,Great,Loved it,\n"),
        );

        let snapshot = db.capture_and_increment("Joker", "cat").unwrap();
        assert_eq!(snapshot.report_count, 1);
        assert_eq!(snapshot.user, "cat");
        assert_eq!(snapshot.rating, 9.0);
        assert_eq!(snapshot.useful_votes, 10);
        assert_eq!(snapshot.total_votes, 12);
        assert_eq!(snapshot.title, "Great");
        assert_eq!(snapshot.body, "Loved it");

        // The rewrite persisted the bump.
        let again = db.capture_and_increment("Joker", "cat").unwrap();
        assert_eq!(again.report_count, 2);
    }

    #[test]
    fn non_numeric_fields_coerce_to_zero() {
        let (_dir, db) = seeded_db(
            "Joker",
            &format!("{HEADER}\nJoker,2019-10-05,cat,lots,,N/A,Great,Loved it,junk\n"),
        );

        let snapshot = db.capture_and_increment("Joker", "cat").unwrap();
        assert_eq!(snapshot.useful_votes, 0);
        assert_eq!(snapshot.total_votes, 0);
        assert_eq!(snapshot.rating, 0.0);
        assert_eq!(snapshot.report_count, 1);
    }

    #[test]
    fn adds_reports_column_to_old_ledgers() {
        let (_dir, db) = seeded_db(
            "Joker",
            "Movie Title,Date of Review,User,Usefulness Vote,Total Votes,User's Rating out of 10,Review Title,Review\nJoker,2019-10-05,cat,10,12,9,Great,Loved it\n",
        );

        let snapshot = db.capture_and_increment("Joker", "cat").unwrap();
        assert_eq!(snapshot.report_count, 1);

        let raw = fs::read_to_string(db.ledger_path("Joker")).unwrap();
        assert!(raw.lines().next().unwrap().ends_with(",Reports"));
    }

    #[test]
    fn missing_ledger_and_missing_user_are_not_found() {
        let (_dir, db) = seeded_db(
            "Joker",
            &format!("{HEADER}\nJoker,2019-10-05,cat,10,12,9,Great,Loved it,\n"),
        );

        assert!(matches!(
            db.capture_and_increment("Heat", "cat"),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            db.capture_and_increment("Joker", "ghost"),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn reported_reviews_scan_skips_unreported_rows() {
        let (dir, db) = seeded_db(
            "Joker",
            &format!(
                "{HEADER}\nJoker,2019-10-05,cat,10,12,9,Great,Loved it,2\nJoker,2019-10-06,dave,3,9,4,Meh,Not for me,\n"
            ),
        );
        let heat_dir = dir.path().join("Heat");
        fs::create_dir_all(&heat_dir).unwrap();
        fs::write(
            heat_dir.join(LEDGER_FILE),
            format!("{HEADER}\nHeat,1995-12-15,bob,1,2,8,Classic,Still holds up,junk\n"),
        )
        .unwrap();

        let reported = db.list_reported_reviews().unwrap();
        assert_eq!(reported.len(), 1);
        assert_eq!(reported[0].movie_title, "Joker");
        assert_eq!(reported[0].user, "cat");
        assert_eq!(reported[0].report_count, 2);
    }
}
