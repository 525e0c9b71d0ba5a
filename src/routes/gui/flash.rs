//! One-shot flash messages carried between a form POST and the next page
//!
//! The payload is form-urlencoded and then percent-encoded so the cookie value
//! only ever holds cookie-safe characters.

use crate::validation::FieldErrors;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use percent_encoding::{percent_decode_str, utf8_percent_encode, NON_ALPHANUMERIC};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;
use url::form_urlencoded;

pub const COOKIE_NAME: &str = "flash";

const OLD_PREFIX: &str = "old.";

/// Browsers silently drop cookies past roughly 4 KB
pub const MAX_COOKIE_VALUE: usize = 3072;

/// Never echoed back into a form
const SECRET_FIELDS: &[&str] = &["password"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flash {
    pub success: Option<String>,
    pub error: Option<String>,
    pub errors: Vec<String>,
    /// Previously submitted form input, keyed by field name
    pub old: BTreeMap<String, String>,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn invalid(errors: &FieldErrors) -> Self {
        Self {
            error: Some("The given data was invalid.".to_string()),
            errors: errors.messages().map(str::to_string).collect(),
            ..Self::default()
        }
    }

    /// Keep the submitted form so the next page can re-populate it
    pub fn with_input(mut self, form: &HashMap<String, String>) -> Self {
        self.old = form
            .iter()
            .filter(|(field, _)| !SECRET_FIELDS.contains(&field.as_str()))
            .map(|(field, value)| (field.clone(), value.clone()))
            .collect();
        self
    }

    pub fn old(&self, field: &str) -> Option<&str> {
        self.old.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.success.is_none() && self.error.is_none() && self.errors.is_empty() && self.old.is_empty()
    }

    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if let Some(success) = &self.success {
            serializer.append_pair("success", success);
        }
        if let Some(error) = &self.error {
            serializer.append_pair("error", error);
        }
        for message in &self.errors {
            serializer.append_pair("errors", message);
        }
        for (field, value) in &self.old {
            serializer.append_pair(&format!("{OLD_PREFIX}{field}"), value);
        }
        let query = serializer.finish();
        utf8_percent_encode(&query, NON_ALPHANUMERIC).to_string()
    }

    /// Anything unreadable decodes to an empty flash
    pub fn decode(raw: &str) -> Self {
        let Ok(query) = percent_decode_str(raw).decode_utf8() else {
            return Self::default();
        };

        let mut flash = Self::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "success" => flash.success = Some(value.into_owned()),
                "error" => flash.error = Some(value.into_owned()),
                "errors" => flash.errors.push(value.into_owned()),
                other => {
                    if let Some(field) = other.strip_prefix(OLD_PREFIX) {
                        flash.old.insert(field.to_string(), value.into_owned());
                    }
                }
            }
        }
        flash
    }

    /// Attach the flash to the outgoing response
    ///
    /// Preserved input is shed longest first until the cookie fits; the
    /// messages themselves are always kept.
    pub fn store(mut self, jar: CookieJar) -> CookieJar {
        let mut value = self.encode();
        while value.len() > MAX_COOKIE_VALUE {
            let Some(longest) = self
                .old
                .iter()
                .max_by_key(|(_, input)| input.len())
                .map(|(field, _)| field.clone())
            else {
                break;
            };
            debug!("Dropping preserved input '{}' from oversized flash", longest);
            self.old.remove(&longest);
            value = self.encode();
        }

        let cookie = Cookie::build((COOKIE_NAME, value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax);
        jar.add(cookie)
    }

    /// Read the pending flash and clear it
    pub fn take(jar: CookieJar) -> (CookieJar, Self) {
        let pending = jar.get(COOKIE_NAME).map(|cookie| Self::decode(cookie.value()));
        match pending {
            Some(flash) => (jar.remove(Cookie::build(COOKIE_NAME).path("/")), flash),
            None => (jar, Self::default()),
        }
    }
}
