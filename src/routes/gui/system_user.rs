//! System user pages

use super::flash::Flash;
use super::views::{self, FormField, Input};
use super::{found, rejected, user_path, NotFoundPage, Outcome};
use crate::envelope::Envelope;
use crate::models::{Entity, SystemUser};
use crate::repositories::Transition;
use crate::state::SharedState;
use crate::validation::{form_input, validate, SYSTEM_USER_CREATE, SYSTEM_USER_UPDATE};
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
    FormField::new("username", "Username", Input::Text),
    FormField::new("email", "Email", Input::Email),
    FormField::new("password", "Password", Input::Password),
    FormField::new("firstName", "First name", Input::Text),
    FormField::new("lastName", "Last name", Input::Text),
    FormField::new("isActive", "Active", Input::Boolean),
    FormField::new("isConfirmed", "Confirmed", Input::Boolean),
    FormField::new("isAdmin", "Administrator", Input::Boolean),
];

pub async fn index(State(state): State<SharedState>, jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, flash) = Flash::take(jar);
    let envelope: Envelope<Vec<SystemUser>> = Envelope::from(state.system_users.get_all().await);

    let mut body = String::new();
    if !envelope.is_success() {
        body.push_str(&views::alert(envelope.message.as_deref().unwrap_or_default()));
    }
    body.push_str(&format!("<p>{}</p>\n", views::link("/users/create", "New user")));

    let rows: Vec<Vec<String>> = envelope
        .data
        .unwrap_or_default()
        .iter()
        .map(|user| {
            vec![
                views::link(&user_path(&user.id), &user.username),
                views::escape(&user.display_name()),
                views::escape(&user.email),
                views::yes_no(user.is_active).to_string(),
                views::yes_no(user.is_confirmed).to_string(),
                views::yes_no(user.is_admin).to_string(),
            ]
        })
        .collect();
    body.push_str(&views::table(
        &["Username", "Name", "Email", "Active", "Confirmed", "Admin"],
        &rows,
        "No users found.",
    ));

    (jar, views::page("System Users", &flash, &body))
}

pub async fn create(jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, flash) = Flash::take(jar);
    let body = views::form("/users", FIELDS, &Value::Null, &flash, "Create");
    (jar, views::page("New User", &flash, &body))
}

pub async fn store(
    State(state): State<SharedState>,
    headers: HeaderMap,
    jar: CookieJar,
    Form(form): Form<HashMap<String, String>>,
) -> (CookieJar, Redirect) {
    let data = match validate(&form_input(&form), SYSTEM_USER_CREATE) {
        Ok(data) => data,
        Err(errors) => return rejected(jar, &headers, "/users/create", &errors, &form),
    };
    debug!("Creating system user from form");

    let envelope = Envelope::from(state.system_users.create(data).await);
    Outcome {
        success_to: "/users",
        done: "User created successfully.",
        fallback: "/users/create",
    }
    .respond(jar, &headers, &envelope, Some(&form))
}

pub async fn show(
    State(state): State<SharedState>,
    Path(user_id): Path<String>,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>), NotFoundPage> {
    let user: SystemUser = found(Envelope::from(state.system_users.get_by_id(&user_id).await))?;
    let (jar, flash) = Flash::take(jar);

    let href = user_path(&user.id);
    let mut body = views::details(&[
        ("ID", user.id.clone()),
        ("Username", user.username.clone()),
        ("Email", user.email.clone()),
        ("Name", user.display_name()),
        ("Active", views::yes_no(user.is_active).to_string()),
        ("Confirmed", views::yes_no(user.is_confirmed).to_string()),
        ("Administrator", views::yes_no(user.is_admin).to_string()),
    ]);

    let active = if user.is_active {
        Transition::Deactivate
    } else {
        Transition::Activate
    };
    let confirmed = if user.is_confirmed {
        Transition::Unconfirm
    } else {
        Transition::Confirm
    };
    body.push_str(&format!(
        "<p>{} | {}</p>\n{}\n{}\n{}",
        views::link(&format!("{href}/edit"), "Edit"),
        views::link("/users", "Back"),
        views::button(&format!("{href}/{active}"), &capitalize(&active.to_string())),
        views::button(&format!("{href}/{confirmed}"), &capitalize(&confirmed.to_string())),
        views::button(&format!("{href}/delete"), "Delete"),
    ));

    Ok((jar, views::page(&user.username, &flash, &body)))
}

pub async fn edit(
    State(state): State<SharedState>,
    Path(user_id): Path<String>,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>), NotFoundPage> {
    let user: SystemUser = found(Envelope::from(state.system_users.get_by_id(&user_id).await))?;
    let (jar, flash) = Flash::take(jar);

    let action = format!("{}/update", user_path(&user.id));
    let body = views::form(&action, FIELDS, &user.to_value(), &flash, "Save");
    Ok((jar, views::page("Edit User", &flash, &body)))
}

pub async fn update(
    State(state): State<SharedState>,
    Path(user_id): Path<String>,
    headers: HeaderMap,
    jar: CookieJar,
    Form(form): Form<HashMap<String, String>>,
) -> (CookieJar, Redirect) {
    let fallback = format!("{}/edit", user_path(&user_id));
    let data = match validate(&form_input(&form), SYSTEM_USER_UPDATE) {
        Ok(data) => data,
        Err(errors) => return rejected(jar, &headers, &fallback, &errors, &form),
    };
    debug!("Updating system user {} from form", user_id);

    let envelope = Envelope::from(state.system_users.update(&user_id, data).await);
    Outcome {
        success_to: "/users",
        done: "User updated successfully.",
        fallback: &fallback,
    }
    .respond(jar, &headers, &envelope, Some(&form))
}

pub async fn destroy(
    State(state): State<SharedState>,
    Path(user_id): Path<String>,
    headers: HeaderMap,
    jar: CookieJar,
) -> (CookieJar, Redirect) {
    debug!("Deleting system user {} from form", user_id);
    let envelope = Envelope::from(state.system_users.delete(&user_id).await);
    Outcome {
        success_to: "/users",
        done: "User deleted successfully.",
        fallback: "/users",
    }
    .respond(jar, &headers, &envelope, None)
}

pub async fn activate(
    state: State<SharedState>,
    user_id: Path<String>,
    jar: CookieJar,
) -> (CookieJar, Redirect) {
    transition(state, user_id, jar, Transition::Activate).await
}

pub async fn deactivate(
    state: State<SharedState>,
    user_id: Path<String>,
    jar: CookieJar,
) -> (CookieJar, Redirect) {
    transition(state, user_id, jar, Transition::Deactivate).await
}

pub async fn confirm(
    state: State<SharedState>,
    user_id: Path<String>,
    jar: CookieJar,
) -> (CookieJar, Redirect) {
    transition(state, user_id, jar, Transition::Confirm).await
}

pub async fn unconfirm(
    state: State<SharedState>,
    user_id: Path<String>,
    jar: CookieJar,
) -> (CookieJar, Redirect) {
    transition(state, user_id, jar, Transition::Unconfirm).await
}

/// Flag toggles always land back on the user's page
async fn transition(
    State(state): State<SharedState>,
    Path(user_id): Path<String>,
    jar: CookieJar,
    transition: Transition,
) -> (CookieJar, Redirect) {
    debug!("Applying {} to system user {} from form", transition, user_id);
    let show = user_path(&user_id);
    let envelope = Envelope::from(state.system_users.transition(transition, &user_id).await);

    let flash = if envelope.is_success() {
        Flash::success(format!("User {} successfully.", transition.done()))
    } else {
        Flash::error(
            envelope
                .message
                .unwrap_or_else(|| format!("Failed to {} user.", transition)),
        )
    };
    super::redirect(jar, &show, flash)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
