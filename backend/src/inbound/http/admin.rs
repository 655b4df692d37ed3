//! Minimal superuser-only HTML pages for inspecting accounts.
//!
//! ```text
//! GET /admin/users
//! GET /admin/users/add
//! GET /admin/users/{id}
//! ```
//!
//! Pages are plain strings; every user-controlled value goes through
//! [`escape_html`].

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, web};

use crate::domain::{Error, User, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AdminUser;
use crate::inbound::http::state::HttpState;

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn page(title: &str, body: &str) -> HttpResponse {
    let html = format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>{title} | Recipe admin</title></head>\n<body>\n<h1>{title}</h1>\n{body}\n</body>\n</html>\n",
        title = escape_html(title),
    );
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(html)
}

fn render_user_list(users: &[User]) -> String {
    let rows = users
        .iter()
        .map(|user| {
            format!(
                "<tr><td><a href=\"/admin/users/{id}\">{email}</a></td><td>{name}</td></tr>\n",
                id = user.id(),
                email = escape_html(user.email().as_ref()),
                name = escape_html(user.name().as_ref()),
            )
        })
        .collect::<String>();
    format!(
        "<p><a href=\"/admin/users/add\">Add user</a></p>\n<table>\n<thead><tr><th>Email</th><th>Name</th></tr></thead>\n<tbody>\n{rows}</tbody>\n</table>\n<p>{count} users</p>",
        count = users.len(),
    )
}

fn checkbox(name: &str, label: &str, checked: bool) -> String {
    format!(
        "<label><input type=\"checkbox\" name=\"{name}\"{checked}> {label}</label><br>",
        checked = if checked { " checked" } else { "" },
    )
}

fn render_user_form(user: &User) -> String {
    let flags = user.flags();
    format!(
        "<form method=\"post\">\n<label>Email <input type=\"email\" name=\"email\" value=\"{email}\"></label><br>\n<label>Name <input type=\"text\" name=\"name\" value=\"{name}\"></label><br>\n{active}\n{staff}\n{superuser}\n<p>Date joined: {joined}</p>\n</form>",
        email = escape_html(user.email().as_ref()),
        name = escape_html(user.name().as_ref()),
        active = checkbox("is_active", "Active", flags.is_active),
        staff = checkbox("is_staff", "Staff status", flags.is_staff),
        superuser = checkbox("is_superuser", "Superuser status", flags.is_superuser),
        joined = user.date_joined().to_rfc3339(),
    )
}

fn render_add_form() -> &'static str {
    "<form method=\"post\">\n<label>Email <input type=\"email\" name=\"email\" required></label><br>\n<label>Password <input type=\"password\" name=\"password1\" required></label><br>\n<label>Password confirmation <input type=\"password\" name=\"password2\" required></label><br>\n</form>"
}

/// User changelist.
pub async fn list_users(
    state: web::Data<HttpState>,
    _admin: AdminUser,
) -> ApiResult<HttpResponse> {
    let users = state.admin_users.list_users().await?;
    Ok(page("Users", &render_user_list(&users)))
}

/// Blank creation form.
pub async fn add_user(_admin: AdminUser) -> ApiResult<HttpResponse> {
    Ok(page("Add user", render_add_form()))
}

/// Edit page for one user.
pub async fn user_detail(
    state: web::Data<HttpState>,
    _admin: AdminUser,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let raw = path.into_inner();
    let id = UserId::new(&raw).map_err(|_| Error::not_found(format!("user {raw} not found")))?;
    let user = state.admin_users.fetch_user(&id).await?;
    Ok(page("Change user", &render_user_form(&user)))
}
