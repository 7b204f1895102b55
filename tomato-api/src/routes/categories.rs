//! Category endpoints

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Json};
use tomato_shared::{models::category::Category, store::CategoryStore};

/// `GET /allcategories`
///
/// ```json
/// [{ "category_id": 1, "category_title": "Groceries" }]
/// ```
pub async fn all_categories(State(state): State<AppState>) -> ApiResult<Json<Vec<Category>>> {
    Ok(Json(state.store.list_categories().await?))
}
