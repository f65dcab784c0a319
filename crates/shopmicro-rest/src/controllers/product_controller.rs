//! Product listing controller.

use crate::{
    responses::{ok, ApiResult},
    state::AppState,
};
use axum::{extract::State, routing::get, Router};
use shopmicro_core::Product;
use tracing::debug;

/// Creates the product router.
pub fn router() -> Router<AppState> {
    Router::new().route("/products", get(list_products))
}

/// All products ordered by id.
async fn list_products(State(state): State<AppState>) -> ApiResult<Vec<Product>> {
    debug!("List products request");

    let products = state.catalog_service.list_products().await?;
    ok(products)
}
