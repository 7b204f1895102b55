//! Category model
//!
//! Categories are seeded outside this service; nothing here writes to them.
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE categories (
//!     id SERIAL PRIMARY KEY,
//!     title TEXT NOT NULL
//! );
//! ```

use serde::{Deserialize, Serialize};
use sqlx::PgConnection;

/// A label grouping tasks
///
/// Serialized as `{"category_id": .., "category_title": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    #[serde(rename = "category_id")]
    pub id: i32,

    #[serde(rename = "category_title")]
    pub title: String,
}

impl Category {
    /// Lists every category, ordered by id
    pub async fn list_all(conn: &mut PgConnection) -> Result<Vec<Self>, sqlx::Error> {
        let categories = sqlx::query_as::<_, Category>("SELECT id, title FROM categories ORDER BY id")
            .fetch_all(&mut *conn)
            .await?;

        Ok(categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_wire_names() {
        let category = Category {
            id: 1,
            title: "Groceries".to_string(),
        };

        assert_eq!(
            serde_json::to_value(&category).unwrap(),
            json!({ "category_id": 1, "category_title": "Groceries" })
        );
    }
}
