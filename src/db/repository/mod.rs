//! Repository layer — entity-scoped database operations.
//!
//! All functions operate on a borrowed `Connection`; callers own the
//! connection lifecycle (one per request in the API layer).

mod appointment;
mod care_link;
mod consultation;
mod prescription;
mod user;

pub use appointment::*;
pub use care_link::*;
pub use consultation::*;
pub use prescription::*;
pub use user::*;

#[cfg(test)]
pub(crate) use user::tests::sample_user;

/// Extension trait to convert NotFound into None.
pub(crate) trait OptionalRow<T> {
    fn optional(self) -> Result<Option<T>, rusqlite::Error>;
}

impl<T> OptionalRow<T> for Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>, rusqlite::Error> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Serialize a string list to its JSON column representation.
pub(crate) fn to_json_list(items: &[String]) -> String {
    serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
}

/// Deserialize a JSON array column, tolerating malformed content.
pub(crate) fn from_json_list(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_default()
}
