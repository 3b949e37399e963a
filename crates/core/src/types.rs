/// All primary keys are opaque UUID strings generated by the application.
pub type DbId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Generate a new primary key.
///
/// UUIDv7 keeps ids roughly creation-ordered, which makes them a usable
/// tie-break when two rows share a timestamp.
pub fn new_id() -> DbId {
    uuid::Uuid::now_v7().to_string()
}
