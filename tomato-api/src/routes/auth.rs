//! Authentication endpoints
//!
//! No tokens are issued; both endpoints answer with the public user record.
//!
//! # Endpoints
//!
//! - `POST /signup` - Create an account
//! - `POST /login` - Check credentials

use crate::{app::AppState, error::ApiResult, extract::JsonBody};
use axum::{extract::State, Json};
use tomato_shared::{
    auth::accounts,
    models::user::{Credentials, User},
};
use validator::Validate;

/// Sign a new user up
///
/// # Endpoint
///
/// ```text
/// POST /signup
/// Content-Type: application/json
///
/// { "username": "alice", "password": "correct horse" }
/// ```
///
/// # Response
///
/// ```json
/// { "id": 1, "username": "alice" }
/// ```
///
/// # Errors
///
/// - `406 Not Acceptable`: Unparseable body or empty username/password
/// - `409 Conflict`: Username already exists
/// - `500 Internal Server Error`: Server error
pub async fn signup(
    State(state): State<AppState>,
    JsonBody(credentials): JsonBody<Credentials>,
) -> ApiResult<Json<User>> {
    credentials.validate()?;

    let user = accounts::sign_up(state.store.as_ref(), &credentials).await?;

    Ok(Json(user))
}

/// Log an existing user in
///
/// # Endpoint
///
/// ```text
/// POST /login
/// Content-Type: application/json
///
/// { "username": "alice", "password": "correct horse" }
/// ```
///
/// # Response
///
/// ```json
/// { "id": 1, "username": "alice" }
/// ```
///
/// # Errors
///
/// - `406 Not Acceptable`: Unparseable body or empty username/password
/// - `401 Unauthorized`: Unknown username or wrong password
/// - `500 Internal Server Error`: Server error
pub async fn login(
    State(state): State<AppState>,
    JsonBody(credentials): JsonBody<Credentials>,
) -> ApiResult<Json<User>> {
    credentials.validate()?;

    let user = accounts::log_in(state.store.as_ref(), &credentials).await?;

    Ok(Json(user))
}
