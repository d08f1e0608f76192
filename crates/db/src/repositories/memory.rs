use std::collections::BTreeMap;

use tokio::sync::RwLock;

use catalog_core::domain::price::normalize_price;
use catalog_core::domain::product::{Product, ProductDraft, ProductId};

use super::{ProductRepository, RepositoryError, WriteOutcome};

#[derive(Default)]
struct ProductTable {
    rows: BTreeMap<ProductId, Product>,
    last_id: i64,
}

#[derive(Default)]
pub struct InMemoryProductRepository {
    products: RwLock<ProductTable>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let products = self.products.read().await;
        Ok(products.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let products = self.products.read().await;
        Ok(products.rows.get(&id).cloned())
    }

    async fn find_by_category(&self, text: &str) -> Result<Vec<Product>, RepositoryError> {
        let products = self.products.read().await;
        Ok(products.rows.values().filter(|product| product.in_category(text)).cloned().collect())
    }

    async fn insert(&self, mut draft: ProductDraft) -> Result<Product, RepositoryError> {
        draft.price = normalize_price(draft.price)?;

        let mut products = self.products.write().await;
        products.last_id += 1;
        let product = Product::from_draft(ProductId(products.last_id), draft);
        products.rows.insert(product.id, product.clone());
        Ok(product)
    }

    async fn replace_by_id(
        &self,
        id: ProductId,
        mut draft: ProductDraft,
    ) -> Result<WriteOutcome, RepositoryError> {
        draft.price = normalize_price(draft.price)?;

        let mut products = self.products.write().await;
        match products.rows.get_mut(&id) {
            Some(existing) => {
                *existing = Product::from_draft(id, draft);
                Ok(WriteOutcome::Applied)
            }
            None => Ok(WriteOutcome::NotFound),
        }
    }

    async fn delete_by_id(&self, id: ProductId) -> Result<WriteOutcome, RepositoryError> {
        let mut products = self.products.write().await;
        match products.rows.remove(&id) {
            Some(_) => Ok(WriteOutcome::Applied),
            None => Ok(WriteOutcome::NotFound),
        }
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}
