//! Field-level validation rulesets
//!
//! Rules are plain data so the JSON API and the HTML forms share one table per
//! entity and operation. Input is validated as untyped JSON: a wrong type is a
//! field error, never a deserialization failure.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Number, Value};
use std::collections::{BTreeMap, HashMap};
use validator::{ValidateEmail, ValidateLength};

static UUID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\da-fA-F]{8}-[\da-fA-F]{4}-[\da-fA-F]{4}-[\da-fA-F]{4}-[\da-fA-F]{12}$")
        .expect("UUID pattern is valid")
});

/// Whether a field has to be present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Must be present and non-empty
    Required,
    /// Checked only when the key is present
    Sometimes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    String,
    Bool,
    Integer,
    Email,
    Uuid,
}

/// One field's rule line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub field: &'static str,
    pub presence: Presence,
    pub kind: Kind,
    pub nullable: bool,
    pub min: Option<u64>,
    pub max: Option<u64>,
}

impl FieldRule {
    const fn new(field: &'static str, presence: Presence, kind: Kind) -> Self {
        Self {
            field,
            presence,
            kind,
            nullable: false,
            min: None,
            max: None,
        }
    }

    pub const fn required(field: &'static str, kind: Kind) -> Self {
        Self::new(field, Presence::Required, kind)
    }

    pub const fn sometimes(field: &'static str, kind: Kind) -> Self {
        Self::new(field, Presence::Sometimes, kind)
    }

    pub const fn nullable(self) -> Self {
        Self {
            nullable: true,
            ..self
        }
    }

    pub const fn min(self, min: u64) -> Self {
        Self {
            min: Some(min),
            ..self
        }
    }

    pub const fn max(self, max: u64) -> Self {
        Self {
            max: Some(max),
            ..self
        }
    }
}

pub static LIBRARY_CREATE: &[FieldRule] = &[
    FieldRule::required("name", Kind::String).max(255),
    FieldRule::required("description", Kind::String),
    FieldRule::required("isPublic", Kind::Bool),
    FieldRule::required("ownerId", Kind::Uuid),
];

pub static LIBRARY_UPDATE: &[FieldRule] = &[
    FieldRule::sometimes("name", Kind::String).max(255),
    FieldRule::sometimes("description", Kind::String),
    FieldRule::sometimes("isPublic", Kind::Bool),
    FieldRule::sometimes("ownerId", Kind::Uuid),
];

pub static LIBRARY_ITEM_CREATE: &[FieldRule] = &[
    FieldRule::required("name", Kind::String).max(255),
    FieldRule::sometimes("description", Kind::String).nullable(),
    FieldRule::required("isPublic", Kind::Bool),
    FieldRule::required("ownerId", Kind::Uuid),
    FieldRule::required("mimeType", Kind::String).max(150),
    FieldRule::required("fileSize", Kind::Integer).min(1),
    FieldRule::required("filePath", Kind::String).max(255),
];

pub static LIBRARY_ITEM_UPDATE: &[FieldRule] = &[
    FieldRule::sometimes("name", Kind::String).max(255),
    FieldRule::sometimes("description", Kind::String).nullable(),
    FieldRule::sometimes("isPublic", Kind::Bool),
    FieldRule::sometimes("ownerId", Kind::Uuid),
    FieldRule::sometimes("mimeType", Kind::String).max(150),
    FieldRule::sometimes("fileSize", Kind::Integer).min(1),
    FieldRule::sometimes("filePath", Kind::String).max(255),
];

pub static SYSTEM_USER_CREATE: &[FieldRule] = &[
    FieldRule::required("username", Kind::String).max(150),
    FieldRule::required("email", Kind::Email),
    FieldRule::required("password", Kind::String).min(8),
    FieldRule::sometimes("firstName", Kind::String).nullable().max(100),
    FieldRule::sometimes("lastName", Kind::String).nullable().max(100),
    FieldRule::sometimes("isActive", Kind::Bool),
    FieldRule::sometimes("isConfirmed", Kind::Bool),
    FieldRule::sometimes("isAdmin", Kind::Bool),
];

pub static SYSTEM_USER_UPDATE: &[FieldRule] = &[
    FieldRule::sometimes("username", Kind::String).max(150),
    FieldRule::sometimes("email", Kind::Email),
    FieldRule::sometimes("password", Kind::String).min(8),
    FieldRule::sometimes("firstName", Kind::String).nullable().max(100),
    FieldRule::sometimes("lastName", Kind::String).nullable().max(100),
    FieldRule::sometimes("isActive", Kind::Bool),
    FieldRule::sometimes("isConfirmed", Kind::Bool),
    FieldRule::sometimes("isAdmin", Kind::Bool),
];

/// `{field: [message, ...]}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Every message, field by field
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.0.values().flatten().map(String::as_str)
    }
}

/// Validated payload: ruled fields only, bools and ints normalized
pub type Validated = Map<String, Value>;

/// Check `input` against `rules`
pub fn validate(input: &Value, rules: &[FieldRule]) -> Result<Validated, FieldErrors> {
    let mut errors = FieldErrors::default();
    let mut validated = Map::new();

    let Some(fields) = input.as_object() else {
        errors.add("body", "The request body must be a JSON object.");
        return Err(errors);
    };

    for rule in rules {
        let label = display_name(rule.field);
        let value = match fields.get(rule.field) {
            None => {
                if rule.presence == Presence::Required {
                    errors.add(rule.field, format!("The {} field is required.", label));
                }
                continue;
            }
            Some(Value::String(s)) if s.is_empty() => Value::Null,
            Some(value) => value.clone(),
        };

        if is_empty(&value) {
            if rule.presence == Presence::Required {
                errors.add(rule.field, format!("The {} field is required.", label));
                continue;
            }
            if rule.nullable && value.is_null() {
                validated.insert(rule.field.to_string(), Value::Null);
                continue;
            }
        }

        match check(rule, &label, &value) {
            Ok(normalized) => {
                validated.insert(rule.field.to_string(), normalized);
            }
            Err(messages) => {
                for message in messages {
                    errors.add(rule.field, message);
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(validated)
    } else {
        Err(errors)
    }
}

/// HTML form fields as JSON strings. Blank inputs count as not submitted.
pub fn form_input(form: &HashMap<String, String>) -> Value {
    let fields = form
        .iter()
        .filter(|(_, v)| !v.trim().is_empty())
        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
        .collect();
    Value::Object(fields)
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

fn check(rule: &FieldRule, label: &str, value: &Value) -> Result<Value, Vec<String>> {
    match rule.kind {
        Kind::String => {
            let s = as_string(value, label)?;
            check_length(rule, label, s)?;
            Ok(value.clone())
        }
        Kind::Email => {
            let s = as_string(value, label)?;
            if !s.validate_email() {
                return Err(vec![format!(
                    "The {} field must be a valid email address.",
                    label
                )]);
            }
            check_length(rule, label, s)?;
            Ok(value.clone())
        }
        Kind::Uuid => {
            let s = as_string(value, label)?;
            if !UUID_RE.is_match(s) {
                return Err(vec![format!("The {} field must be a valid UUID.", label)]);
            }
            Ok(value.clone())
        }
        Kind::Bool => match parse_bool(value) {
            Some(b) => Ok(Value::Bool(b)),
            None => Err(vec![format!("The {} field must be true or false.", label)]),
        },
        Kind::Integer => {
            let Some(n) = parse_int(value) else {
                return Err(vec![format!("The {} field must be an integer.", label)]);
            };
            let mut messages = Vec::new();
            if let Some(min) = rule.min {
                if n < min as i64 {
                    messages.push(format!("The {} field must be at least {}.", label, min));
                }
            }
            if let Some(max) = rule.max {
                if n > max as i64 {
                    messages.push(format!(
                        "The {} field must not be greater than {}.",
                        label, max
                    ));
                }
            }
            if messages.is_empty() {
                Ok(Value::Number(Number::from(n)))
            } else {
                Err(messages)
            }
        }
    }
}

fn as_string<'a>(value: &'a Value, label: &str) -> Result<&'a str, Vec<String>> {
    value
        .as_str()
        .ok_or_else(|| vec![format!("The {} field must be a string.", label)])
}

fn check_length(rule: &FieldRule, label: &str, s: &str) -> Result<(), Vec<String>> {
    let mut messages = Vec::new();
    if let Some(min) = rule.min {
        if !s.validate_length(Some(min), None, None) {
            messages.push(format!(
                "The {} field must be at least {} characters.",
                label, min
            ));
        }
    }
    if let Some(max) = rule.max {
        if !s.validate_length(None, Some(max), None) {
            messages.push(format!(
                "The {} field must not be greater than {} characters.",
                label, max
            ));
        }
    }
    if messages.is_empty() {
        Ok(())
    } else {
        Err(messages)
    }
}

fn parse_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        Value::String(s) => match s.as_str() {
            "1" | "true" | "on" => Some(true),
            "0" | "false" | "off" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn parse_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// `ownerId` -> `owner id`
fn display_name(field: &str) -> String {
    let mut out = String::with_capacity(field.len() + 4);
    for c in field.chars() {
        if c.is_ascii_uppercase() {
            out.push(' ');
            out.push(c.to_ascii_lowercase());
        } else if c == '_' {
            out.push(' ');
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const OWNER: &str = "0b7e2f6c-0f6e-4f3a-9d0c-3a1f6b2f8e11";

    #[test]
    fn test_valid_library_create() {
        let input = json!({
            "name": "Lib",
            "description": "d",
            "isPublic": true,
            "ownerId": OWNER,
            "extra": "dropped"
        });
        let validated = validate(&input, LIBRARY_CREATE).unwrap();
        assert_eq!(
            Value::Object(validated),
            json!({"name": "Lib", "description": "d", "isPublic": true, "ownerId": OWNER})
        );
    }

    #[test]
    fn test_invalid_library_create_reports_every_field() {
        let input = json!({"name": "", "isPublic": "notabool"});
        let errors = validate(&input, LIBRARY_CREATE).unwrap_err();
        assert_eq!(errors.get("name").unwrap(), ["The name field is required."]);
        assert_eq!(
            errors.get("isPublic").unwrap(),
            ["The is public field must be true or false."]
        );
        assert_eq!(
            errors.get("description").unwrap(),
            ["The description field is required."]
        );
        assert_eq!(errors.get("ownerId").unwrap(), ["The owner id field is required."]);
    }

    #[test]
    fn test_update_rules_skip_absent_fields() {
        let validated = validate(&json!({"name": "Renamed"}), LIBRARY_UPDATE).unwrap();
        assert_eq!(Value::Object(validated), json!({"name": "Renamed"}));
    }

    #[test]
    fn test_update_rules_still_check_present_fields() {
        let errors = validate(&json!({"ownerId": "not-a-uuid"}), LIBRARY_UPDATE).unwrap_err();
        assert_eq!(
            errors.get("ownerId").unwrap(),
            ["The owner id field must be a valid UUID."]
        );
    }

    #[test]
    fn test_uuid_requires_hyphenated_form() {
        let errors = validate(
            &json!({"ownerId": "0b7e2f6c0f6e4f3a9d0c3a1f6b2f8e11"}),
            LIBRARY_UPDATE,
        )
        .unwrap_err();
        assert!(errors.get("ownerId").is_some());
    }

    #[test]
    fn test_generated_uuid_passes() {
        let owner = uuid::Uuid::new_v4().to_string();
        let validated = validate(&json!({ "ownerId": &owner }), LIBRARY_UPDATE).unwrap();
        assert_eq!(validated["ownerId"], json!(owner));
    }

    #[test]
    fn test_item_create_requires_file_fields() {
        let input = json!({
            "name": "scan.pdf",
            "isPublic": true,
            "ownerId": "0b7e2f6c-0f6e-4f3a-9d0c-3a1f6b2f8e11",
            "mimeType": "a".repeat(151),
            "fileSize": 0,
        });
        let errors = validate(&input, LIBRARY_ITEM_CREATE).unwrap_err();
        assert_eq!(
            errors.get("mimeType").unwrap(),
            ["The mime type field must not be greater than 150 characters."]
        );
        assert_eq!(
            errors.get("fileSize").unwrap(),
            ["The file size field must be at least 1."]
        );
        assert_eq!(
            errors.get("filePath").unwrap(),
            ["The file path field is required."]
        );
        assert!(errors.get("name").is_none());
    }

    #[test]
    fn test_max_length_counts_characters() {
        let long = "é".repeat(256);
        let errors = validate(&json!({ "name": long }), LIBRARY_UPDATE).unwrap_err();
        assert_eq!(
            errors.get("name").unwrap(),
            ["The name field must not be greater than 255 characters."]
        );
        assert!(validate(&json!({ "name": "é".repeat(255) }), LIBRARY_UPDATE).is_ok());
    }

    #[test]
    fn test_item_file_size_rules() {
        let errors = validate(&json!({"fileSize": 0}), LIBRARY_ITEM_UPDATE).unwrap_err();
        assert_eq!(
            errors.get("fileSize").unwrap(),
            ["The file size field must be at least 1."]
        );

        let errors = validate(&json!({"fileSize": "12kb"}), LIBRARY_ITEM_UPDATE).unwrap_err();
        assert_eq!(
            errors.get("fileSize").unwrap(),
            ["The file size field must be an integer."]
        );

        let validated = validate(&json!({"fileSize": "12"}), LIBRARY_ITEM_UPDATE).unwrap();
        assert_eq!(validated["fileSize"], json!(12));
    }

    #[test]
    fn test_item_description_nullable() {
        let validated = validate(&json!({"description": null}), LIBRARY_ITEM_UPDATE).unwrap();
        assert_eq!(validated["description"], Value::Null);
    }

    #[test]
    fn test_user_create_rules() {
        let input = json!({
            "username": "jdoe",
            "email": "not-an-email",
            "password": "short",
            "isAdmin": "1"
        });
        let errors = validate(&input, SYSTEM_USER_CREATE).unwrap_err();
        assert_eq!(
            errors.get("email").unwrap(),
            ["The email field must be a valid email address."]
        );
        assert_eq!(
            errors.get("password").unwrap(),
            ["The password field must be at least 8 characters."]
        );
        assert!(errors.get("isAdmin").is_none());
    }

    #[test]
    fn test_bool_normalized_from_form_strings() {
        let validated = validate(
            &json!({"isActive": "1", "isConfirmed": "off", "isAdmin": 0}),
            SYSTEM_USER_UPDATE,
        )
        .unwrap();
        assert_eq!(validated["isActive"], json!(true));
        assert_eq!(validated["isConfirmed"], json!(false));
        assert_eq!(validated["isAdmin"], json!(false));
    }

    #[test]
    fn test_non_object_body() {
        let errors = validate(&json!(["name"]), LIBRARY_CREATE).unwrap_err();
        assert_eq!(
            errors.get("body").unwrap(),
            ["The request body must be a JSON object."]
        );
    }

    #[test]
    fn test_form_input_drops_blank_fields() {
        let mut form = HashMap::new();
        form.insert("name".to_string(), "Lib".to_string());
        form.insert("description".to_string(), "  ".to_string());
        assert_eq!(form_input(&form), json!({"name": "Lib"}));
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("ownerId"), "owner id");
        assert_eq!(display_name("is_public"), "is public");
        assert_eq!(display_name("name"), "name");
    }
}
