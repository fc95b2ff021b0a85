use std::env;
use std::path::PathBuf;

/// Runtime configuration, loaded once at startup and injected into the
/// stores; nothing reads the environment after this point.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,

    /// Root of the flat-file data layout: reports.json, bans.json,
    /// users.json and the per-movie `imdb/<movie>/movieReviews.csv` tree.
    pub data_dir: PathBuf,

    pub service_name: String,
    pub environment: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            data_dir: env::var("DATA_DIR")
                .unwrap_or_else(|_| "data".to_string())
                .into(),
            service_name: env::var("SERVICE_NAME")
                .unwrap_or_else(|_| "moderation-service".to_string()),
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        }
    }

    pub fn reports_file(&self) -> PathBuf {
        self.data_dir.join("reports.json")
    }

    pub fn bans_file(&self) -> PathBuf {
        self.data_dir.join("bans.json")
    }

    pub fn users_file(&self) -> PathBuf {
        self.data_dir.join("users.json")
    }

    pub fn reviews_dir(&self) -> PathBuf {
        self.data_dir.join("imdb")
    }
}
