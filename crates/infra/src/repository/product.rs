//! Postgres-backed product repository.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::instrument;

use storefront_core::{DomainResult, Entity};
use storefront_products::Product;

use super::r#trait::{Repository, RepositoryError};

/// Persistence model for `Product`: one row in the `products` table.
///
/// The row is the on-disk shape, the entity the in-memory one; nothing else
/// relates them, so marshalling is a plain field copy in each direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRow {
    pub id: String,
    pub name: String,
    pub price: i64,
}

impl ProductRow {
    pub fn from_entity(product: &Product) -> Self {
        Self {
            id: product.id().clone(),
            name: product.name().to_string(),
            price: product.price(),
        }
    }

    /// Rebuild the entity, re-running its validation.
    pub fn into_entity(self) -> DomainResult<Product> {
        Product::new(self.id, self.name, self.price)
    }
}

impl<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> for ProductRow {
    fn from_row(row: &'r sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            price: row.try_get("price")?,
        })
    }
}

/// Postgres-backed implementation of `Repository<Product>`.
///
/// Stateless apart from the connection pool, which sqlx already shares
/// safely across threads.
#[derive(Debug, Clone)]
pub struct PgProductRepository {
    pool: Arc<PgPool>,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }
}

#[async_trait]
impl Repository<Product> for PgProductRepository {
    #[instrument(skip(self, entity), fields(product_id = %entity.id()), err)]
    async fn create(&self, entity: &Product) -> Result<(), RepositoryError> {
        let row = ProductRow::from_entity(entity);
        sqlx::query("INSERT INTO products (id, name, price) VALUES ($1, $2, $3)")
            .bind(&row.id)
            .bind(&row.name)
            .bind(row.price)
            .execute(&*self.pool)
            .await?;
        Ok(())
    }

    #[instrument(skip(self, entity), fields(product_id = %entity.id()), err)]
    async fn update(&self, entity: &Product) -> Result<(), RepositoryError> {
        let row = ProductRow::from_entity(entity);
        let result = sqlx::query("UPDATE products SET name = $2, price = $3 WHERE id = $1")
            .bind(&row.id)
            .bind(&row.name)
            .bind(row.price)
            .execute(&*self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Product",
                id: row.id,
            });
        }
        Ok(())
    }

    #[instrument(skip(self), err)]
    async fn find(&self, id: &String) -> Result<Product, RepositoryError> {
        let row: Option<ProductRow> =
            sqlx::query_as("SELECT id, name, price FROM products WHERE id = $1")
                .bind(id)
                .fetch_optional(&*self.pool)
                .await?;
        match row {
            Some(row) => Ok(row.into_entity()?),
            None => Err(RepositoryError::NotFound {
                entity: "Product",
                id: id.clone(),
            }),
        }
    }

    #[instrument(skip(self), err)]
    async fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows: Vec<ProductRow> = sqlx::query_as("SELECT id, name, price FROM products")
            .fetch_all(&*self.pool)
            .await?;
        rows.into_iter()
            .map(|row| row.into_entity().map_err(RepositoryError::from))
            .collect()
    }
}
