//! Library item entity

use super::coerce::Raw;
use super::Entity;
use crate::error::TransformError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A file stored in a library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryItem {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub is_public: bool,
    pub owner_id: String,
    pub library_id: String,
    pub mime_type: String,
    pub file_size: i64,
    pub file_path: String,
    pub raw_data: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub deleted_at: Option<String>,
}

impl Entity for LibraryItem {
    const NAME: &'static str = "LibraryItem";

    fn from_value(value: &Value) -> Result<Self, TransformError> {
        let raw = Raw::new(Self::NAME, value)?;

        Ok(Self {
            id: raw.string("id")?,
            name: raw.string("name")?,
            description: raw.opt_string("description")?,
            is_public: raw.bool_or("isPublic", true),
            owner_id: raw.string("ownerId")?,
            library_id: raw.string("libraryId")?,
            mime_type: raw.string("mimeType")?,
            file_size: raw.int("fileSize")?,
            file_path: raw.string("filePath")?,
            raw_data: raw.opt_string("rawData")?,
            created_at: raw.string("createdAt")?,
            updated_at: raw.string("updatedAt")?,
            deleted_at: raw.opt_string("deletedAt")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn full_item() -> Value {
        json!({
            "id": "item1",
            "name": "scan.pdf",
            "description": "Quarterly scan",
            "isPublic": false,
            "ownerId": "0b7e2f6c-0f6e-4f3a-9d0c-3a1f6b2f8e11",
            "libraryId": "lib1",
            "mimeType": "application/pdf",
            "fileSize": 2048,
            "filePath": "/data/lib1/scan.pdf",
            "rawData": "JVBERi0x",
            "createdAt": "2025-01-01T10:00:00Z",
            "updatedAt": "2025-01-02T10:00:00Z",
            "deletedAt": "2025-01-03T10:00:00Z"
        })
    }

    #[test]
    fn test_full_record_round_trips() {
        let raw = full_item();
        let item = LibraryItem::from_value(&raw).unwrap();
        assert_eq!(item.to_value(), raw);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let item = LibraryItem::from_value(&json!({"id": "item1"})).unwrap();
        assert_eq!(item.description, None);
        assert!(item.is_public);
        assert_eq!(item.file_size, 0);
        assert_eq!(item.raw_data, None);
        assert_eq!(item.deleted_at, None);
        assert_eq!(item.created_at, "");
    }

    #[test]
    fn test_file_size_from_string() {
        let item = LibraryItem::from_value(&json!({"fileSize": "512"})).unwrap();
        assert_eq!(item.file_size, 512);
    }

    #[test]
    fn test_array_file_size_is_malformed() {
        assert!(LibraryItem::from_value(&json!({"fileSize": [1]})).is_err());
    }
}
