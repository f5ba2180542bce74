use anyhow::Result;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Strict mode blocks overlapping saves in the service itself; advisory
    /// mode leaves conflict handling to the entry form's confirmation flow.
    pub enforce_no_overlap: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:attendance.db".to_string());

        let enforce_no_overlap = env::var("ENFORCE_NO_OVERLAP")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);

        Ok(Config {
            database_url,
            enforce_no_overlap,
        })
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}
