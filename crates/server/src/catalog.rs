use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use catalog_core::{DomainError, Product, ProductId};
use catalog_db::{ProductRepository, WriteOutcome};
use tracing::info;

use crate::errors::ApiError;

pub const PRODUCTS_PATH: &str = "/api/v1/products";

#[derive(Clone)]
pub struct CatalogState {
    products: Arc<dyn ProductRepository>,
}

impl CatalogState {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn router(products: Arc<dyn ProductRepository>) -> Router {
    Router::new()
        .route("/api/v1/products", get(list_products).post(create_product))
        .route(
            "/api/v1/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/api/v1/products/category/{category}", get(products_by_category))
        .with_state(CatalogState::new(products))
}

pub fn product_location(id: ProductId) -> String {
    format!("{PRODUCTS_PATH}/{id}")
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn list_products(State(state): State<CatalogState>) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(state.products.list_all().await?))
}

async fn get_product(
    Path(id): Path<i64>,
    State(state): State<CatalogState>,
) -> Result<Json<Product>, ApiError> {
    let id = ProductId(id);
    match state.products.find_by_id(id).await? {
        Some(product) => Ok(Json(product)),
        None => Err(ApiError::not_found(id)),
    }
}

async fn products_by_category(
    Path(category): Path<String>,
    State(state): State<CatalogState>,
) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(state.products.find_by_category(&category).await?))
}

/// Any id in the body is ignored; the store assigns one.
async fn create_product(
    State(state): State<CatalogState>,
    Json(body): Json<Product>,
) -> Result<impl IntoResponse, ApiError> {
    let created = state.products.insert(body.into_draft()).await?;

    info!(
        event_name = "catalog.product.created",
        correlation_id = "request",
        product_id = %created.id,
        category = %created.category,
        "product created"
    );

    Ok((StatusCode::CREATED, [(header::LOCATION, product_location(created.id))], Json(created)))
}

async fn update_product(
    Path(id): Path<i64>,
    State(state): State<CatalogState>,
    Json(body): Json<Product>,
) -> Result<StatusCode, ApiError> {
    let id = ProductId(id);
    if body.id != id {
        return Err(ApiError::bad_request(DomainError::IdMismatch { path: id, body: body.id }));
    }

    let Some(current) = state.products.find_by_id(id).await? else {
        return Err(ApiError::not_found(id));
    };

    // Full replacement: every field comes from the body, only the id is kept.
    let replacement = Product { id: current.id, ..body };
    match state.products.replace_by_id(current.id, replacement.into_draft()).await? {
        WriteOutcome::Applied => {
            info!(
                event_name = "catalog.product.updated",
                correlation_id = "request",
                product_id = %id,
                "product updated"
            );
            Ok(StatusCode::NO_CONTENT)
        }
        // Deleted between the read and the write.
        WriteOutcome::NotFound => Err(ApiError::not_found(id)),
    }
}

async fn delete_product(
    Path(id): Path<i64>,
    State(state): State<CatalogState>,
) -> Result<StatusCode, ApiError> {
    let id = ProductId(id);
    match state.products.delete_by_id(id).await? {
        WriteOutcome::Applied => {
            info!(
                event_name = "catalog.product.deleted",
                correlation_id = "request",
                product_id = %id,
                "product deleted"
            );
            Ok(StatusCode::NO_CONTENT)
        }
        WriteOutcome::NotFound => Err(ApiError::not_found(id)),
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use catalog_core::ProductDraft;
    use catalog_db::InMemoryProductRepository;
    use rust_decimal::Decimal;

    use super::*;

    fn product(id: i64, name: &str, category: &str, price: &str) -> Product {
        Product {
            id: ProductId(id),
            name: name.to_string(),
            category: category.to_string(),
            summary: None,
            description: None,
            image_file: None,
            price: Decimal::from_str(price).expect("price"),
        }
    }

    async fn seeded() -> (Arc<InMemoryProductRepository>, State<CatalogState>) {
        let repo = Arc::new(InMemoryProductRepository::new());
        for (name, category) in [("TV", "Electronics"), ("Hammer", "Tools")] {
            repo.insert(ProductDraft {
                name: name.to_string(),
                category: category.to_string(),
                summary: None,
                description: None,
                image_file: None,
                price: Decimal::ONE,
            })
            .await
            .expect("insert");
        }
        let state = State(CatalogState::new(repo.clone()));
        (repo, state)
    }

    #[tokio::test]
    async fn get_product_returns_not_found_for_absent_id() {
        let (_, state) = seeded().await;

        let error = get_product(Path(42), state).await.expect_err("absent id");

        assert_eq!(error.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_rejects_mismatched_body_id_without_touching_store() {
        let (repo, state) = seeded().await;

        let error = update_product(Path(1), state, Json(product(2, "Changed", "Tools", "5")))
            .await
            .expect_err("mismatch");

        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        let stored = repo.find_by_id(ProductId(1)).await.expect("find").expect("still present");
        assert_eq!(stored.name, "TV");
    }

    #[tokio::test]
    async fn update_of_absent_product_is_not_found() {
        let (_, state) = seeded().await;

        let error = update_product(Path(9), state, Json(product(9, "Ghost", "Tools", "5")))
            .await
            .expect_err("absent");

        assert_eq!(error.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_replaces_fields_and_normalizes_price() {
        let (repo, state) = seeded().await;

        let status = update_product(Path(2), state, Json(product(2, "Mallet", "Garden", "7.555")))
            .await
            .expect("update");

        assert_eq!(status, StatusCode::NO_CONTENT);
        let stored = repo.find_by_id(ProductId(2)).await.expect("find").expect("present");
        assert_eq!(stored.name, "Mallet");
        assert_eq!(stored.category, "Garden");
        assert_eq!(stored.price.to_string(), "7.56");
    }

    #[tokio::test]
    async fn delete_twice_reports_not_found_the_second_time() {
        let (_, state) = seeded().await;

        let first = delete_product(Path(1), state.clone()).await.expect("first delete");
        let second = delete_product(Path(1), state).await.expect_err("second delete");

        assert_eq!(first, StatusCode::NO_CONTENT);
        assert_eq!(second.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn category_route_matches_case_insensitively() {
        let (_, state) = seeded().await;

        let Json(found) =
            products_by_category(Path("ELECTRO".to_string()), state).await.expect("filter");

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "TV");
    }

    #[test]
    fn location_points_at_the_product_resource() {
        assert_eq!(product_location(ProductId(7)), "/api/v1/products/7");
    }
}
