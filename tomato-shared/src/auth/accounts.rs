//! Signup and login
//!
//! Both flows sit on top of a [`UserStore`]. Login never tells the caller
//! whether the username or the password was wrong.

use tracing::{debug, info};

use super::password::{hash_password, verify_password, DUMMY_HASH};
use crate::error::{StoreError, StoreResult};
use crate::models::user::{Credentials, User};
use crate::store::UserStore;

/// Creates an account and returns its public record
///
/// # Errors
///
/// - `StoreError::Conflict` if the username is taken
/// - `StoreError::Password` if hashing fails
/// - any store failure
pub async fn sign_up<S>(users: &S, credentials: &Credentials) -> StoreResult<User>
where
    S: UserStore + ?Sized,
{
    let password_hash = hash_password(&credentials.password)?;

    let user = users
        .create_user(&credentials.username, &password_hash)
        .await?;

    info!(user_id = user.id, username = %user.username, "User signed up");
    Ok(user)
}

/// Checks credentials and returns the public record of the user
///
/// # Errors
///
/// - `StoreError::InvalidCredentials` for an unknown username or a wrong password
/// - `StoreError::Password` if the stored hash is unreadable
/// - any store failure
pub async fn log_in<S>(users: &S, credentials: &Credentials) -> StoreResult<User>
where
    S: UserStore + ?Sized,
{
    let stored_hash = match users.find_credentials(&credentials.username).await {
        Ok(hash) => hash,
        Err(StoreError::InvalidCredentials) => {
            // Spend the same hashing work as a real mismatch
            let _ = verify_password(&credentials.password, DUMMY_HASH);
            debug!(username = %credentials.username, "Unknown username");
            return Err(StoreError::InvalidCredentials);
        }
        Err(e) => return Err(e),
    };

    if !verify_password(&credentials.password, &stored_hash)? {
        debug!(username = %credentials.username, "Password mismatch");
        return Err(StoreError::InvalidCredentials);
    }

    let user = users.get_public_user(&credentials.username).await?;

    info!(user_id = user.id, "User logged in");
    Ok(user)
}
