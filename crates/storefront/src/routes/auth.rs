//! Authentication routes: sign-up, sign-in, sign-out, session user.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_sessions::Session;

use kola_core::UserRecord;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::auth::RequireAuth;
use crate::middleware::session::{clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Sign-up request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Sign-in request body.
#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// The account shape returned to clients. Never carries the hash.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl AccountResponse {
    fn from_record(user: &UserRecord) -> Option<Self> {
        Some(Self {
            id: user.id.clone()?.into_inner(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.to_string(),
        })
    }
}

/// POST /auth/signup - create an account and sign it in.
pub async fn signup(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AccountResponse>)> {
    let blank = [&body.first_name, &body.last_name, &body.email, &body.password]
        .iter()
        .any(|f| f.trim().is_empty());
    if blank {
        return Err(AppError::BadRequest("all fields are required".to_owned()));
    }

    add_breadcrumb("auth", "signup attempt");

    let auth = AuthService::new(state.store());
    let user = auth
        .register(
            body.first_name.trim(),
            body.last_name.trim(),
            body.email.trim(),
            &body.password,
        )
        .await?;

    sign_in_session(&session, &user).await?;

    let response = AccountResponse::from_record(&user)
        .ok_or_else(|| AppError::Internal("created account has no id".to_owned()))?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /auth/signin - verify credentials and set the session cookie.
pub async fn signin(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<SigninRequest>,
) -> Result<Json<AccountResponse>> {
    if body.email.trim().is_empty() || body.password.is_empty() {
        return Err(AppError::BadRequest(
            "email and password are required".to_owned(),
        ));
    }

    add_breadcrumb("auth", "signin attempt");

    let auth = AuthService::new(state.store());
    let user = auth.sign_in(body.email.trim(), &body.password).await?;

    sign_in_session(&session, &user).await?;

    let response = AccountResponse::from_record(&user)
        .ok_or_else(|| AppError::Internal("stored account has no id".to_owned()))?;
    Ok(Json(response))
}

/// POST /auth/signout - drop the session user.
pub async fn signout(session: Session) -> Result<Json<serde_json::Value>> {
    clear_current_user(&session)
        .await
        .map_err(|e| AppError::Internal(format!("session write failed: {e}")))?;
    Ok(Json(json!({"ok": true})))
}

/// GET /auth/me - the signed-in user, 401 when there is none.
pub async fn me(RequireAuth(user): RequireAuth) -> Json<CurrentUser> {
    Json(user)
}

async fn sign_in_session(session: &Session, user: &UserRecord) -> Result<()> {
    let current = CurrentUser::from_record(user)
        .ok_or_else(|| AppError::Internal("account record has no id".to_owned()))?;
    set_current_user(session, &current)
        .await
        .map_err(|e| AppError::Internal(format!("session write failed: {e}")))
}
