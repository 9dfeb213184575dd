pub mod monitor_config;

/// Primary key type of every table.
pub type DbId = i64;

pub type Timestamp = chrono::DateTime<chrono::Utc>;
