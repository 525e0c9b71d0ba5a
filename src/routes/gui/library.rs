//! Library pages

use super::flash::Flash;
use super::views::{self, FormField, Input};
use super::{found, library_path, rejected, NotFoundPage, Outcome};
use crate::envelope::Envelope;
use crate::models::{Entity, Library};
use crate::state::SharedState;
use crate::validation::{form_input, validate, LIBRARY_CREATE, LIBRARY_UPDATE};
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
];

pub async fn index(State(state): State<SharedState>, jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, flash) = Flash::take(jar);
    let envelope: Envelope<Vec<Library>> = Envelope::from(state.libraries.get_all().await);

    let mut body = String::new();
    if !envelope.is_success() {
        body.push_str(&views::alert(envelope.message.as_deref().unwrap_or_default()));
    }
    body.push_str(&format!("<p>{}</p>\n", views::link("/libraries/create", "New library")));

    let rows: Vec<Vec<String>> = envelope
        .data
        .unwrap_or_default()
        .iter()
        .map(|library| {
            let href = library_path(&library.id);
            vec![
                views::link(&href, &library.name),
                views::escape(&library.description),
                views::yes_no(library.is_public).to_string(),
                views::link(&format!("{href}/items"), "Items"),
            ]
        })
        .collect();
    body.push_str(&views::table(
        &["Name", "Description", "Public", ""],
        &rows,
        "No libraries found.",
    ));

    (jar, views::page("Libraries", &flash, &body))
}

pub async fn create(jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, flash) = Flash::take(jar);
    let body = views::form("/libraries", FIELDS, &Value::Null, &flash, "Create");
    (jar, views::page("New Library", &flash, &body))
}

pub async fn store(
    State(state): State<SharedState>,
    headers: HeaderMap,
    jar: CookieJar,
    Form(form): Form<HashMap<String, String>>,
) -> (CookieJar, Redirect) {
    let data = match validate(&form_input(&form), LIBRARY_CREATE) {
        Ok(data) => data,
        Err(errors) => return rejected(jar, &headers, "/libraries/create", &errors, &form),
    };
    debug!("Creating library from form");

    let envelope = Envelope::from(state.libraries.create(data).await);
    Outcome {
        success_to: "/libraries",
        done: "Library created successfully.",
        fallback: "/libraries/create",
    }
    .respond(jar, &headers, &envelope, Some(&form))
}

pub async fn show(
    State(state): State<SharedState>,
    Path(library_id): Path<String>,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>), NotFoundPage> {
    let library: Library = found(Envelope::from(state.libraries.get_by_id(&library_id).await))?;
    let (jar, flash) = Flash::take(jar);

    let href = library_path(&library.id);
    let mut body = views::details(&[
        ("ID", library.id.clone()),
        ("Name", library.name.clone()),
        ("Description", library.description.clone()),
        ("Public", views::yes_no(library.is_public).to_string()),
        ("Owner ID", library.owner_id.clone()),
    ]);
    body.push_str(&format!(
        "<p>{} | {} | {}</p>\n{}",
        views::link(&format!("{href}/items"), "Items"),
        views::link(&format!("{href}/edit"), "Edit"),
        views::link("/libraries", "Back"),
        views::button(&format!("{href}/delete"), "Delete"),
    ));

    Ok((jar, views::page(&library.name, &flash, &body)))
}

pub async fn edit(
    State(state): State<SharedState>,
    Path(library_id): Path<String>,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>), NotFoundPage> {
    let library: Library = found(Envelope::from(state.libraries.get_by_id(&library_id).await))?;
    let (jar, flash) = Flash::take(jar);

    let action = format!("{}/update", library_path(&library.id));
    let body = views::form(&action, FIELDS, &library.to_value(), &flash, "Save");
    Ok((jar, views::page("Edit Library", &flash, &body)))
}

pub async fn update(
    State(state): State<SharedState>,
    Path(library_id): Path<String>,
    headers: HeaderMap,
    jar: CookieJar,
    Form(form): Form<HashMap<String, String>>,
) -> (CookieJar, Redirect) {
    let fallback = format!("{}/edit", library_path(&library_id));
    let data = match validate(&form_input(&form), LIBRARY_UPDATE) {
        Ok(data) => data,
        Err(errors) => return rejected(jar, &headers, &fallback, &errors, &form),
    };
    debug!("Updating library {} from form", library_id);

    let envelope = Envelope::from(state.libraries.update(&library_id, data).await);
    Outcome {
        success_to: "/libraries",
        done: "Library updated successfully.",
        fallback: &fallback,
    }
    .respond(jar, &headers, &envelope, Some(&form))
}

pub async fn destroy(
    State(state): State<SharedState>,
    Path(library_id): Path<String>,
    headers: HeaderMap,
    jar: CookieJar,
) -> (CookieJar, Redirect) {
    debug!("Deleting library {} from form", library_id);
    let envelope = Envelope::from(state.libraries.delete(&library_id).await);
    Outcome {
        success_to: "/libraries",
        done: "Library deleted successfully.",
        fallback: "/libraries",
    }
    .respond(jar, &headers, &envelope, None)
}
