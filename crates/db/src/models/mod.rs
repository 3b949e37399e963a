//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

use serde::{Deserialize, Deserializer};

pub mod activity;
pub mod comment;
pub mod dashboard;
pub mod label;
pub mod project;
pub mod task;

/// Deserialize a nullable field so that an absent key stays `None` while an
/// explicit `null` becomes `Some(None)`.
///
/// Pair with `#[serde(default, deserialize_with = "double_option")]`.
pub fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
