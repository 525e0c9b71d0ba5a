//! Backend endpoint templates
//!
//! Placeholders in braces are substituted with literal, percent-encoded ids.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

pub const VERSION: &str = "/version";
pub const LIBRARIES: &str = "/api/libraries";
pub const LIBRARY: &str = "/api/libraries/{library_id}";
pub const LIBRARY_ITEMS: &str = "/api/libraries/{library_id}/items";
pub const LIBRARY_ITEM: &str = "/api/libraries/{library_id}/items/{item_id}";
pub const SYSTEM_USERS: &str = "/api/system/users";
pub const SYSTEM_USER: &str = "/api/system/users/{user_id}";
pub const SYSTEM_USER_ACTIVATE: &str = "/api/system/users/{user_id}/activate";
pub const SYSTEM_USER_DEACTIVATE: &str = "/api/system/users/{user_id}/deactivate";
pub const SYSTEM_USER_CONFIRM: &str = "/api/system/users/{user_id}/confirm";
pub const SYSTEM_USER_UNCONFIRM: &str = "/api/system/users/{user_id}/unconfirm";

/// Characters that may not appear raw inside a single path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Percent-encode `value` for use as one path segment
pub fn segment(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

/// Substitute `{name}` placeholders in `template`
pub fn resolve(template: &str, params: &[(&str, &str)]) -> String {
    params.iter().fold(template.to_string(), |path, (name, value)| {
        path.replace(&format!("{{{}}}", name), &segment(value))
    })
}

pub fn library(library_id: &str) -> String {
    resolve(LIBRARY, &[("library_id", library_id)])
}

pub fn library_items(library_id: &str) -> String {
    resolve(LIBRARY_ITEMS, &[("library_id", library_id)])
}

pub fn library_item(library_id: &str, item_id: &str) -> String {
    resolve(
        LIBRARY_ITEM,
        &[("library_id", library_id), ("item_id", item_id)],
    )
}

pub fn system_user(user_id: &str) -> String {
    resolve(SYSTEM_USER, &[("user_id", user_id)])
}
