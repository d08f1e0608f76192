use std::str::FromStr;

use rust_decimal::Decimal;
use sqlx::Row;

use catalog_core::domain::price::normalize_price;
use catalog_core::domain::product::{Product, ProductDraft, ProductId};

use super::{ProductRepository, RepositoryError, WriteOutcome};
use crate::DbPool;

pub struct SqlProductRepository {
    pool: DbPool,
}

impl SqlProductRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

fn row_to_product(row: &sqlx::sqlite::SqliteRow) -> Result<Product, RepositoryError> {
    let id: i64 = row.try_get("id").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let name: String = row.try_get("name").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let category: String =
        row.try_get("category").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let summary: Option<String> =
        row.try_get("summary").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let description: Option<String> =
        row.try_get("description").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let image_file: Option<String> =
        row.try_get("image_file").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let price_text: String =
        row.try_get("price").map_err(|e| RepositoryError::Decode(e.to_string()))?;

    let price = Decimal::from_str(&price_text).map_err(|e| {
        RepositoryError::Decode(format!("product {id} has invalid price `{price_text}`: {e}"))
    })?;

    Ok(Product {
        id: ProductId(id),
        name,
        category,
        summary,
        description,
        image_file,
        price,
    })
}

#[async_trait::async_trait]
impl ProductRepository for SqlProductRepository {
    async fn list_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, name, category, summary, description, image_file, price
             FROM product ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_product).collect()
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query(
            "SELECT id, name, category, summary, description, image_file, price
             FROM product WHERE id = ?",
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(ref r) => Ok(Some(row_to_product(r)?)),
            None => Ok(None),
        }
    }

    async fn find_by_category(&self, text: &str) -> Result<Vec<Product>, RepositoryError> {
        // SQLite's LOWER/LIKE only fold ASCII, so matching happens on decoded rows.
        let products = self.list_all().await?;
        Ok(products.into_iter().filter(|product| product.in_category(text)).collect())
    }

    async fn insert(&self, mut draft: ProductDraft) -> Result<Product, RepositoryError> {
        draft.price = normalize_price(draft.price)?;

        let result = sqlx::query(
            "INSERT INTO product (name, category, summary, description, image_file, price)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&draft.name)
        .bind(&draft.category)
        .bind(&draft.summary)
        .bind(&draft.description)
        .bind(&draft.image_file)
        .bind(draft.price.to_string())
        .execute(&self.pool)
        .await?;

        Ok(Product::from_draft(ProductId(result.last_insert_rowid()), draft))
    }

    async fn replace_by_id(
        &self,
        id: ProductId,
        mut draft: ProductDraft,
    ) -> Result<WriteOutcome, RepositoryError> {
        draft.price = normalize_price(draft.price)?;

        let result = sqlx::query(
            "UPDATE product
             SET name = ?, category = ?, summary = ?, description = ?, image_file = ?, price = ?
             WHERE id = ?",
        )
        .bind(&draft.name)
        .bind(&draft.category)
        .bind(&draft.summary)
        .bind(&draft.description)
        .bind(&draft.image_file)
        .bind(draft.price.to_string())
        .bind(id.0)
        .execute(&self.pool)
        .await?;

        Ok(if result.rows_affected() == 0 { WriteOutcome::NotFound } else { WriteOutcome::Applied })
    }

    async fn delete_by_id(&self, id: ProductId) -> Result<WriteOutcome, RepositoryError> {
        let result =
            sqlx::query("DELETE FROM product WHERE id = ?").bind(id.0).execute(&self.pool).await?;

        Ok(if result.rows_affected() == 0 { WriteOutcome::NotFound } else { WriteOutcome::Applied })
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query_scalar::<_, i64>("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}
