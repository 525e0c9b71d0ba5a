//! Backend version lookup

use super::{endpoints, BackendClient};
use crate::error::BackendError;
use crate::models::coerce::to_int;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Structured form of the dmdd-core `{version, releaselevel, serial}` payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedVersion {
    pub major: i64,
    pub minor: i64,
    pub patch: i64,
    pub releaselevel: String,
    pub serial: i64,
}

/// Parse the raw version payload. The payload may be flat or wrapped in `{"data": ...}`.
pub fn parse_version(payload: &Value) -> Result<FormattedVersion, BackendError> {
    let version = match payload.get("data") {
        Some(inner @ Value::Object(_)) => inner,
        _ => payload,
    };

    let text = version
        .get("version")
        .and_then(Value::as_str)
        .ok_or_else(|| BackendError::InvalidVersion("missing 'version' string".to_string()))?;

    let parts: Vec<&str> = text.split('.').collect();
    if parts.len() < 3 {
        return Err(BackendError::InvalidVersion(format!(
            "'{}' is not a dot-separated major.minor.patch version",
            text
        )));
    }

    let number = |part: &str| to_int(&Value::String(part.to_string()));
    let releaselevel = match version.get("releaselevel") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };

    Ok(FormattedVersion {
        major: number(parts[0]),
        minor: number(parts[1]),
        patch: number(parts[2]),
        releaselevel,
        serial: version.get("serial").map(to_int).unwrap_or(0),
    })
}

impl BackendClient {
    /// Raw version payload from dmdd-core
    pub async fn get_version(&self) -> Result<Value, BackendError> {
        self.fetch(endpoints::VERSION).await
    }

    pub async fn get_formatted_version(&self) -> Result<FormattedVersion, BackendError> {
        let version = self.get_version().await?;
        parse_version(&version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_parse_flat_payload() {
        let payload = json!({"version": "1.2.3", "releaselevel": "stable", "serial": 1});
        assert_eq!(
            parse_version(&payload).unwrap(),
            FormattedVersion {
                major: 1,
                minor: 2,
                patch: 3,
                releaselevel: "stable".to_string(),
                serial: 1,
            }
        );
    }

    #[test]
    fn test_parse_wrapped_payload() {
        let payload = json!({
            "status": "success",
            "data": {"version": "0.0.1", "releaselevel": "alpha", "serial": "2025-01-01"}
        });
        let version = parse_version(&payload).unwrap();
        assert_eq!(version.patch, 1);
        assert_eq!(version.releaselevel, "alpha");
        assert_eq!(version.serial, 2025);
    }

    #[test]
    fn test_parse_short_version_fails() {
        let payload = json!({"version": "1.2", "releaselevel": "beta", "serial": 0});
        assert!(matches!(
            parse_version(&payload),
            Err(BackendError::InvalidVersion(_))
        ));
    }

    #[test]
    fn test_parse_missing_version_fails() {
        assert!(parse_version(&json!({"serial": 3})).is_err());
    }
}
