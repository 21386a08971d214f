//! Login and logout route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use crate::auth::Identity;
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::state::AppState;

/// Login page query parameters.
#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    /// Error code carried back after a failed attempt.
    pub error: Option<String>,
    /// Where to send the user after login.
    pub next: Option<String>,
}

/// Login form fields.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub next: Option<String>,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub user: Option<Identity>,
    pub error: Option<String>,
    pub next: String,
}

/// Show the login form.
#[instrument(skip(state))]
pub async fn login_page(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<LoginQuery>,
) -> Response {
    if state.sessions().is_authenticated() {
        return Redirect::to("/").into_response();
    }

    let error = query.error.as_deref().map(|code| match code {
        "credentials" => "Invalid username or password.".to_string(),
        _ => "Login failed. Please try again.".to_string(),
    });

    LoginTemplate {
        user,
        error,
        next: sanitize_next(query.next.as_deref()),
    }
    .into_response()
}

/// Handle a login attempt.
#[instrument(skip(state, form))]
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Redirect {
    let next = sanitize_next(form.next.as_deref());

    if state.sessions().login(&form.username, &form.password) {
        if next.is_empty() {
            Redirect::to("/")
        } else {
            Redirect::to(&next)
        }
    } else {
        Redirect::to(&login_failure_target(&next))
    }
}

/// The login-page URL carrying the failure code and the preserved `next`
/// target. `next` is percent-encoded so targets with their own query
/// string survive the round trip.
fn login_failure_target(next: &str) -> String {
    if next.is_empty() {
        "/login?error=credentials".to_string()
    } else {
        format!("/login?error=credentials&next={}", urlencoding::encode(next))
    }
}

/// End the current session.
#[instrument(skip(state))]
pub async fn logout(State(state): State<AppState>) -> Redirect {
    state.sessions().logout();
    Redirect::to("/")
}

/// Only allow same-site redirect targets.
fn sanitize_next(next: Option<&str>) -> String {
    match next {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path.to_string(),
        _ => String::new(),
    }
}
