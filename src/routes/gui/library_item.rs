//! Library item pages, nested under their library

use super::flash::Flash;
use super::views::{self, FormField, Input};
use super::{found, item_path, items_path, library_path, rejected, NotFoundPage, Outcome};
use crate::envelope::Envelope;
use crate::models::{Entity, LibraryItem};
use crate::state::SharedState;
use crate::validation::{form_input, validate, LIBRARY_ITEM_CREATE, LIBRARY_ITEM_UPDATE};
use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::{Html, Redirect},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

const FIELDS: &[FormField] = &[
    FormField::new("name", "Name", Input::Text),
    FormField::new("description", "Description", Input::TextArea),
    FormField::new("isPublic", "Public", Input::Boolean),
    FormField::new("ownerId", "Owner ID", Input::Text),
    FormField::new("mimeType", "MIME type", Input::Text),
    FormField::new("fileSize", "File size (bytes)", Input::Number),
    FormField::new("filePath", "File path", Input::Text),
];

pub async fn index(
    State(state): State<SharedState>,
    Path(library_id): Path<String>,
    jar: CookieJar,
) -> (CookieJar, Html<String>) {
    let (jar, flash) = Flash::take(jar);
    let envelope: Envelope<Vec<LibraryItem>> =
        Envelope::from(state.library_items.get_all(&library_id).await);
    let base = items_path(&library_id);

    let mut body = String::new();
    if !envelope.is_success() {
        body.push_str(&views::alert(envelope.message.as_deref().unwrap_or_default()));
    }
    body.push_str(&format!(
        "<p>{} | {}</p>\n",
        views::link(&format!("{base}/create"), "New item"),
        views::link(&library_path(&library_id), "Back to library"),
    ));

    let rows: Vec<Vec<String>> = envelope
        .data
        .unwrap_or_default()
        .iter()
        .map(|item| {
            vec![
                views::link(&item_path(&library_id, &item.id), &item.name),
                views::escape(&item.mime_type),
                item.file_size.to_string(),
                views::yes_no(item.is_public).to_string(),
            ]
        })
        .collect();
    body.push_str(&views::table(
        &["Name", "MIME type", "Size", "Public"],
        &rows,
        "This library has no items.",
    ));

    (jar, views::page("Library Items", &flash, &body))
}

pub async fn create(Path(library_id): Path<String>, jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, flash) = Flash::take(jar);
    let body = views::form(&items_path(&library_id), FIELDS, &Value::Null, &flash, "Create");
    (jar, views::page("New Library Item", &flash, &body))
}

pub async fn store(
    State(state): State<SharedState>,
    Path(library_id): Path<String>,
    headers: HeaderMap,
    jar: CookieJar,
    Form(form): Form<HashMap<String, String>>,
) -> (CookieJar, Redirect) {
    let base = items_path(&library_id);
    let fallback = format!("{base}/create");
    let data = match validate(&form_input(&form), LIBRARY_ITEM_CREATE) {
        Ok(data) => data,
        Err(errors) => return rejected(jar, &headers, &fallback, &errors, &form),
    };
    debug!("Creating item in library {} from form", library_id);

    let envelope = Envelope::from(state.library_items.create(&library_id, data).await);
    Outcome {
        success_to: &base,
        done: "Library item created successfully.",
        fallback: &fallback,
    }
    .respond(jar, &headers, &envelope, Some(&form))
}

pub async fn show(
    State(state): State<SharedState>,
    Path((library_id, item_id)): Path<(String, String)>,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>), NotFoundPage> {
    let envelope = Envelope::from(state.library_items.get_by_id(&library_id, &item_id).await);
    let item: LibraryItem = found(envelope)?;
    let (jar, flash) = Flash::take(jar);

    let href = item_path(&library_id, &item.id);
    let mut body = views::details(&[
        ("ID", item.id.clone()),
        ("Name", item.name.clone()),
        ("Description", item.description.clone().unwrap_or_default()),
        ("Public", views::yes_no(item.is_public).to_string()),
        ("Owner ID", item.owner_id.clone()),
        ("Library ID", item.library_id.clone()),
        ("MIME type", item.mime_type.clone()),
        ("File size", item.file_size.to_string()),
        ("File path", item.file_path.clone()),
        ("Created", item.created_at.clone()),
        ("Updated", item.updated_at.clone()),
    ]);
    body.push_str(&format!(
        "<p>{} | {}</p>\n{}",
        views::link(&format!("{href}/edit"), "Edit"),
        views::link(&items_path(&library_id), "Back"),
        views::button(&format!("{href}/delete"), "Delete"),
    ));

    Ok((jar, views::page(&item.name, &flash, &body)))
}

pub async fn edit(
    State(state): State<SharedState>,
    Path((library_id, item_id)): Path<(String, String)>,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>), NotFoundPage> {
    let envelope = Envelope::from(state.library_items.get_by_id(&library_id, &item_id).await);
    let item: LibraryItem = found(envelope)?;
    let (jar, flash) = Flash::take(jar);

    let action = format!("{}/update", item_path(&library_id, &item.id));
    let body = views::form(&action, FIELDS, &item.to_value(), &flash, "Save");
    Ok((jar, views::page("Edit Library Item", &flash, &body)))
}

pub async fn update(
    State(state): State<SharedState>,
    Path((library_id, item_id)): Path<(String, String)>,
    headers: HeaderMap,
    jar: CookieJar,
    Form(form): Form<HashMap<String, String>>,
) -> (CookieJar, Redirect) {
    let base = items_path(&library_id);
    let fallback = format!("{}/edit", item_path(&library_id, &item_id));
    let data = match validate(&form_input(&form), LIBRARY_ITEM_UPDATE) {
        Ok(data) => data,
        Err(errors) => return rejected(jar, &headers, &fallback, &errors, &form),
    };
    debug!("Updating item {} in library {} from form", item_id, library_id);

    let result = state.library_items.update(&library_id, &item_id, data).await;
    Outcome {
        success_to: &base,
        done: "Library item updated successfully.",
        fallback: &fallback,
    }
    .respond(jar, &headers, &Envelope::from(result), Some(&form))
}

pub async fn destroy(
    State(state): State<SharedState>,
    Path((library_id, item_id)): Path<(String, String)>,
    headers: HeaderMap,
    jar: CookieJar,
) -> (CookieJar, Redirect) {
    debug!("Deleting item {} in library {} from form", item_id, library_id);
    let base = items_path(&library_id);
    let result = state.library_items.delete(&library_id, &item_id).await;
    Outcome {
        success_to: &base,
        done: "Library item deleted successfully.",
        fallback: &base,
    }
    .respond(jar, &headers, &Envelope::from(result), None)
}
