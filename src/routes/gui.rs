//! HTML form controllers
//!
//! Pages render server-side; every form POST answers with a redirect and
//! leaves its outcome in the flash cookie.

pub mod flash;
pub mod library;
pub mod library_item;
pub mod system_user;
pub mod views;

use crate::backend::endpoints::resolve;
use crate::envelope::Envelope;
use crate::validation::FieldErrors;
use axum::{
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use flash::Flash;
use std::collections::HashMap;
use url::Url;

/// 404 page for detail views whose entity could not be loaded
#[derive(Debug)]
pub struct NotFoundPage;

impl IntoResponse for NotFoundPage {
    fn into_response(self) -> Response {
        (StatusCode::NOT_FOUND, views::not_found_page()).into_response()
    }
}

/// Unwrap an envelope that must carry an entity
pub(crate) fn found<T>(envelope: Envelope<T>) -> Result<T, NotFoundPage> {
    if !envelope.is_success() {
        return Err(NotFoundPage);
    }
    envelope.data.ok_or(NotFoundPage)
}

/// `/libraries/{library_id}` with the id encoded as one segment
pub(crate) fn library_path(library_id: &str) -> String {
    resolve("/libraries/{library_id}", &[("library_id", library_id)])
}

pub(crate) fn items_path(library_id: &str) -> String {
    resolve("/libraries/{library_id}/items", &[("library_id", library_id)])
}

pub(crate) fn item_path(library_id: &str, item_id: &str) -> String {
    resolve(
        "/libraries/{library_id}/items/{item_id}",
        &[("library_id", library_id), ("item_id", item_id)],
    )
}

pub(crate) fn user_path(user_id: &str) -> String {
    resolve("/users/{user_id}", &[("user_id", user_id)])
}

/// Where to send the user back to: the Referer's path, or `fallback`
pub(crate) fn previous(headers: &HeaderMap, fallback: &str) -> String {
    let Some(referer) = headers
        .get(header::REFERER)
        .and_then(|value| value.to_str().ok())
    else {
        return fallback.to_string();
    };

    // only the path is kept so a forged Referer cannot leave the site
    match Url::parse(referer) {
        Ok(url) => match url.query() {
            Some(query) => format!("{}?{}", url.path(), query),
            None => url.path().to_string(),
        },
        Err(_) if referer.starts_with('/') && !referer.starts_with("//") => referer.to_string(),
        Err(_) => fallback.to_string(),
    }
}

pub(crate) fn redirect(jar: CookieJar, to: &str, flash: Flash) -> (CookieJar, Redirect) {
    (flash.store(jar), Redirect::to(to))
}

pub(crate) fn back(
    jar: CookieJar,
    headers: &HeaderMap,
    fallback: &str,
    flash: Flash,
) -> (CookieJar, Redirect) {
    redirect(jar, &previous(headers, fallback), flash)
}

/// Validation failed: back to the form with the messages and the submitted input
pub(crate) fn rejected(
    jar: CookieJar,
    headers: &HeaderMap,
    fallback: &str,
    errors: &FieldErrors,
    form: &HashMap<String, String>,
) -> (CookieJar, Redirect) {
    back(jar, headers, fallback, Flash::invalid(errors).with_input(form))
}

/// Redirect after a repository write: forward with `done` on success, back otherwise
pub(crate) struct Outcome<'a> {
    pub success_to: &'a str,
    pub done: &'a str,
    pub fallback: &'a str,
}

impl Outcome<'_> {
    pub fn respond<T>(
        &self,
        jar: CookieJar,
        headers: &HeaderMap,
        envelope: &Envelope<T>,
        form: Option<&HashMap<String, String>>,
    ) -> (CookieJar, Redirect) {
        if envelope.is_success() {
            return redirect(jar, self.success_to, Flash::success(self.done));
        }

        let message = envelope
            .message
            .clone()
            .unwrap_or_else(|| "The request could not be completed.".to_string());
        let flash = match form {
            Some(form) => Flash::error(message).with_input(form),
            None => Flash::error(message),
        };
        back(jar, headers, self.fallback, flash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn referer(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::REFERER, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_previous_uses_referer_path() {
        let headers = referer("http://localhost:3000/libraries/create?tab=1");
        assert_eq!(previous(&headers, "/libraries"), "/libraries/create?tab=1");
    }

    #[test]
    fn test_previous_drops_foreign_host() {
        let headers = referer("https://evil.example/phish");
        assert_eq!(previous(&headers, "/libraries"), "/phish");
    }

    #[test]
    fn test_previous_fallbacks() {
        assert_eq!(previous(&HeaderMap::new(), "/users/create"), "/users/create");
        assert_eq!(previous(&referer("//evil.example"), "/users"), "/users");
        assert_eq!(previous(&referer("/users/7/edit"), "/users"), "/users/7/edit");
    }

    #[test]
    fn test_page_paths_encode_ids() {
        assert_eq!(library_path("lib1"), "/libraries/lib1");
        assert_eq!(items_path("a b/c"), "/libraries/a%20b%2Fc/items");
        assert_eq!(item_path("lib1", "x?y#z"), "/libraries/lib1/items/x%3Fy%23z");
        assert_eq!(user_path("50%"), "/users/50%25");
    }

    #[test]
    fn test_found() {
        assert!(found(Envelope::success(Some(1), StatusCode::OK)).is_ok());
        assert!(found(Envelope::<i32>::success(None, StatusCode::OK)).is_err());
        assert!(found(Envelope::<i32>::error("Failed", StatusCode::NOT_FOUND)).is_err());
    }
}
