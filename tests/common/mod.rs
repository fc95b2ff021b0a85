#![allow(dead_code)]

use std::fs;
use std::path::Path;

use moderation_service::Config;
use tempfile::TempDir;

const REVIEWS_HEADER: &str = "Movie Title,Date of Review,User,Usefulness Vote,Total Votes,User's Rating out of 10,Review Title,Review,Reports";

/// One review row: (user, useful votes, total votes, rating, title, body,
/// reports).
pub type ReviewRow<'a> = (&'a str, &'a str, &'a str, &'a str, &'a str, &'a str, &'a str);

pub fn seed_movie(root: &Path, movie: &str, rows: &[ReviewRow<'_>]) {
    let movie_dir = root.join("imdb").join(movie);
    fs::create_dir_all(&movie_dir).unwrap();
    let mut body = format!("{REVIEWS_HEADER}\n");
    for (user, useful, total, rating, title, review, reports) in rows {
        body.push_str(&format!(
            "{movie},2019-10-05,{user},{useful},{total},{rating},{title},{review},{reports}\n"
        ));
    }
    fs::write(movie_dir.join("movieReviews.csv"), body).unwrap();
}

/// A scratch data dir with one movie ("Joker", reviews by the registered
/// user "cat" and the CSV-only reviewer "dave") and a users.json holding
/// "cat" and "alice".
pub fn test_config() -> (TempDir, Config) {
    let dir = tempfile::tempdir().unwrap();
    seed_movie(
        dir.path(),
        "Joker",
        &[
            ("cat", "10", "12", "9", "Great", "Loved it", ""),
            ("dave", "3", "9", "4", "Meh", "Not for me", ""),
        ],
    );
    fs::write(
        dir.path().join("users.json"),
        r#"[
  {"userName": "cat", "password": "$2b$12$c2F0aHNoZWxs", "email": "cat@example.com"},
  {"userName": "alice", "password": "$2b$12$YWxpY2VoYXNo"}
]"#,
    )
    .unwrap();

    let config = Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        data_dir: dir.path().to_path_buf(),
        service_name: "moderation-service".to_string(),
        environment: "test".to_string(),
    };
    (dir, config)
}
