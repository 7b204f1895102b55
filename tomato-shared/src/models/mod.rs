//! Database models
//!
//! Each model owns the SQL for its relation. Functions take a single
//! `&mut PgConnection` and issue exactly one statement; opening and closing
//! the connection is the store's job (see [`crate::store::pg`]).
//!
//! # Models
//!
//! - `user`: Accounts, credentials and the public user record
//! - `category`: Read-only task categories
//! - `task`: Tasks with their category title joined in, plus request parameter records

pub mod category;
pub mod task;
pub mod user;

use serde::{de, Deserialize, Deserializer};

/// Deserializes an integer id sent either as a JSON number or a numeric string
///
/// Older clients send `"category_id": "1"`.
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdRepr {
        Number(i32),
        Text(String),
    }

    match IdRepr::deserialize(deserializer)? {
        IdRepr::Number(id) => Ok(id),
        IdRepr::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("invalid id: {:?}", text))),
    }
}
