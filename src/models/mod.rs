//! Entity records and their transformers
//!
//! Every entity is an immutable value built fresh from one backend response.

pub mod coerce;
pub mod library;
pub mod library_item;
pub mod system_user;

// Re-export commonly used types
pub use library::Library;
pub use library_item::LibraryItem;
pub use system_user::SystemUser;

use crate::error::TransformError;
use serde::Serialize;
use serde_json::Value;

/// Raw JSON <-> typed record mapping
pub trait Entity: Serialize + Sized {
    /// Entity name used in transform errors
    const NAME: &'static str;

    /// Build the record from a raw object, defaulting missing fields
    fn from_value(value: &Value) -> Result<Self, TransformError>;

    /// Plain JSON object with camelCase keys
    fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
