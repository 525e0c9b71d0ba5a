//! Library entity

use super::coerce::Raw;
use super::Entity;
use crate::error::TransformError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A library as exposed by dmdd-core
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Library {
    pub id: String,
    pub name: String,
    pub description: String,
    pub is_public: bool,
    pub owner_id: String,
}

impl Entity for Library {
    const NAME: &'static str = "Library";

    fn from_value(value: &Value) -> Result<Self, TransformError> {
        let raw = Raw::new(Self::NAME, value)?;

        Ok(Self {
            id: raw.string("id")?,
            name: raw.string("name")?,
            description: raw.string("description")?,
            is_public: raw.bool_or("isPublic", true),
            owner_id: raw.string("ownerId")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_full_record_round_trips() {
        let raw = json!({
            "id": "lib1",
            "name": "Lib",
            "description": "d",
            "isPublic": false,
            "ownerId": "0b7e2f6c-0f6e-4f3a-9d0c-3a1f6b2f8e11"
        });
        let library = Library::from_value(&raw).unwrap();
        assert_eq!(library.to_value(), raw);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let library = Library::from_value(&json!({"id": "lib1"})).unwrap();
        assert_eq!(library.name, "");
        assert_eq!(library.description, "");
        assert!(library.is_public);
        assert_eq!(library.owner_id, "");
    }

    #[test]
    fn test_null_is_public_defaults_true() {
        let library = Library::from_value(&json!({"isPublic": null})).unwrap();
        assert!(library.is_public);
    }

    #[test]
    fn test_is_public_is_cast() {
        let library = Library::from_value(&json!({"isPublic": 0})).unwrap();
        assert!(!library.is_public);
    }

    #[test]
    fn test_object_name_is_malformed() {
        let err = Library::from_value(&json!({"name": {"en": "x"}})).unwrap_err();
        assert_eq!(
            err,
            TransformError::MalformedField {
                entity: "Library",
                field: "name",
                expected: "a string",
            }
        );
    }
}
