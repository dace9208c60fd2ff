//! Configuration management for Lambda functions.

use std::env;

/// Default cap on keys fetched per list request.
const DEFAULT_PAGE_SIZE: i64 = 50;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Database host
    pub db_host: String,
    /// Database name
    pub db_name: String,
    /// ARN of the secret containing database credentials
    pub db_secret_arn: String,
    /// AWS region
    pub aws_region: String,
    /// Cap on keys fetched per list request
    pub page_size: i64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            db_host: env::var("DB_HOST")?,
            db_name: env::var("DB_NAME").unwrap_or_else(|_| "assignments".to_string()),
            db_secret_arn: env::var("DB_SECRET_ARN")?,
            aws_region: env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            page_size: env::var("PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PAGE_SIZE),
        })
    }
}
