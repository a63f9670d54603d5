/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Timestamp substituted when a registry record carries no creation time.
pub fn placeholder_timestamp() -> Timestamp {
    chrono::DateTime::UNIX_EPOCH
}
