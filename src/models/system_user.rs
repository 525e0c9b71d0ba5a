//! System user entity

use super::coerce::Raw;
use super::Entity;
use crate::error::TransformError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An operator account managed by dmdd-core.
///
/// `is_active` and `is_confirmed` are independent flags; each has its own
/// activate/deactivate or confirm/unconfirm operation pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemUser {
    pub id: String,
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_active: bool,
    pub is_confirmed: bool,
    pub is_admin: bool,
}

impl SystemUser {
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(name), None) | (None, Some(name)) => name.clone(),
            (None, None) => self.username.clone(),
        }
    }
}

impl Entity for SystemUser {
    const NAME: &'static str = "SystemUser";

    fn from_value(value: &Value) -> Result<Self, TransformError> {
        let raw = Raw::new(Self::NAME, value)?;

        Ok(Self {
            id: raw.string("id")?,
            username: raw.string("username")?,
            email: raw.string("email")?,
            first_name: raw.opt_string("firstName")?,
            last_name: raw.opt_string("lastName")?,
            is_active: raw.bool_or("isActive", false),
            is_confirmed: raw.bool_or("isConfirmed", false),
            is_admin: raw.bool_or("isAdmin", false),
        })
    }
}
