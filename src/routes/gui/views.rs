//! HTML rendering helpers shared by the GUI pages

use super::flash::Flash;
use axum::response::Html;
use serde_json::Value;
use std::fmt::Write;

/// How a field is rendered in a form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Text,
    TextArea,
    Email,
    Password,
    Number,
    Boolean,
}

#[derive(Debug, Clone, Copy)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub input: Input,
}

impl FormField {
    pub const fn new(name: &'static str, label: &'static str, input: Input) -> Self {
        Self { name, label, input }
    }
}

pub fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Plain text for a JSON scalar; null and containers render empty
pub fn text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(true)) => "1".to_string(),
        Some(Value::Bool(false)) => "0".to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

pub fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

/// Full page with the flash banner on top
pub fn page(title: &str, flash: &Flash, body: &str) -> Html<String> {
    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>{} | dmdd</title></head>\n<body>\n\
         <nav><a href=\"/libraries\">Libraries</a> | <a href=\"/users\">Users</a></nav>\n<main>\n<h1>{}</h1>\n",
        escape(title),
        escape(title)
    );
    html.push_str(&banner(flash));
    html.push_str(body);
    html.push_str("\n</main>\n</body>\n</html>\n");
    Html(html)
}

pub fn not_found_page() -> Html<String> {
    page(
        "Not Found",
        &Flash::default(),
        "<p>The page you requested could not be found.</p>",
    )
}

fn banner(flash: &Flash) -> String {
    let mut html = String::new();
    if let Some(success) = &flash.success {
        let _ = writeln!(html, "<div class=\"alert success\">{}</div>", escape(success));
    }
    if let Some(error) = &flash.error {
        let _ = writeln!(html, "<div class=\"alert error\">{}</div>", escape(error));
    }
    if !flash.errors.is_empty() {
        html.push_str("<ul class=\"errors\">\n");
        for message in &flash.errors {
            let _ = writeln!(html, "<li>{}</li>", escape(message));
        }
        html.push_str("</ul>\n");
    }
    html
}

/// Error line for list pages whose backend call failed
pub fn alert(message: &str) -> String {
    format!("<div class=\"alert error\">{}</div>\n", escape(message))
}

/// `<a>` with escaped href and label
pub fn link(href: &str, label: &str) -> String {
    format!("<a href=\"{}\">{}</a>", escape(href), escape(label))
}

/// Single-button form posting to `action`
pub fn button(action: &str, label: &str) -> String {
    format!(
        "<form method=\"post\" action=\"{}\" class=\"inline\"><button type=\"submit\">{}</button></form>",
        escape(action),
        escape(label)
    )
}

pub fn table(headers: &[&str], rows: &[Vec<String>], empty: &str) -> String {
    if rows.is_empty() {
        return format!("<p>{}</p>\n", escape(empty));
    }

    let mut html = String::from("<table>\n<thead><tr>");
    for header in headers {
        let _ = write!(html, "<th>{}</th>", escape(header));
    }
    html.push_str("</tr></thead>\n<tbody>\n");
    // cells arrive pre-rendered
    for row in rows {
        html.push_str("<tr>");
        for cell in row {
            let _ = write!(html, "<td>{}</td>", cell);
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>\n");
    html
}

/// `<dl>` of label/value pairs, values escaped
pub fn details(pairs: &[(&str, String)]) -> String {
    let mut html = String::from("<dl>\n");
    for (label, value) in pairs {
        let _ = writeln!(html, "<dt>{}</dt><dd>{}</dd>", escape(label), escape(value));
    }
    html.push_str("</dl>\n");
    html
}

/// Form whose fields prefer previously submitted input over `values`
pub fn form(action: &str, fields: &[FormField], values: &Value, flash: &Flash, submit: &str) -> String {
    let mut html = String::new();
    let _ = writeln!(html, "<form method=\"post\" action=\"{}\">", escape(action));

    for field in fields {
        let value = match field.input {
            Input::Password => String::new(),
            _ => flash
                .old(field.name)
                .map(str::to_string)
                .unwrap_or_else(|| text(values.get(field.name))),
        };
        let _ = writeln!(
            html,
            "<div class=\"field\"><label for=\"{name}\">{label}</label>{control}</div>",
            name = field.name,
            label = escape(field.label),
            control = control(field, &value)
        );
    }

    let _ = writeln!(html, "<button type=\"submit\">{}</button>\n</form>", escape(submit));
    html
}

fn control(field: &FormField, value: &str) -> String {
    let name = field.name;
    let value = escape(value);
    match field.input {
        Input::TextArea => format!("<textarea id=\"{name}\" name=\"{name}\">{value}</textarea>"),
        Input::Boolean => {
            let checked = |on: bool| {
                let selected = matches!(value.as_str(), "1" | "true" | "on") == on;
                if selected && !value.is_empty() {
                    " selected"
                } else {
                    ""
                }
            };
            format!(
                "<select id=\"{name}\" name=\"{name}\"><option value=\"\"></option>\
                 <option value=\"1\"{}>Yes</option><option value=\"0\"{}>No</option></select>",
                checked(true),
                checked(false)
            )
        }
        other => {
            let kind = match other {
                Input::Email => "email",
                Input::Password => "password",
                Input::Number => "number",
                _ => "text",
            };
            format!("<input type=\"{kind}\" id=\"{name}\" name=\"{name}\" value=\"{value}\">")
        }
    }
}
