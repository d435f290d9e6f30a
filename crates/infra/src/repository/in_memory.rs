//! In-memory repositories.
//!
//! Intended for tests/dev. Rows are stored in their persistence-model shape so
//! marshalling runs through the same code paths as the Postgres
//! implementations.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use storefront_customers::Customer;
use storefront_products::Product;

use super::customer::CustomerRow;
use super::product::ProductRow;
use super::r#trait::{Repository, RepositoryError};

/// Map-backed implementation of `Repository<Product>`.
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    rows: RwLock<HashMap<String, ProductRow>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository<Product> for InMemoryProductRepository {
    async fn create(&self, entity: &Product) -> Result<(), RepositoryError> {
        let row = ProductRow::from_entity(entity);
        let mut rows = self
            .rows
            .write()
            .map_err(|_| RepositoryError::Backend("lock poisoned".to_string()))?;
        if rows.contains_key(&row.id) {
            return Err(RepositoryError::AlreadyExists {
                entity: "Product",
                id: row.id,
            });
        }
        rows.insert(row.id.clone(), row);
        Ok(())
    }

    async fn update(&self, entity: &Product) -> Result<(), RepositoryError> {
        let row = ProductRow::from_entity(entity);
        let mut rows = self
            .rows
            .write()
            .map_err(|_| RepositoryError::Backend("lock poisoned".to_string()))?;
        match rows.get_mut(&row.id) {
            Some(slot) => {
                *slot = row;
                Ok(())
            }
            None => Err(RepositoryError::NotFound {
                entity: "Product",
                id: row.id,
            }),
        }
    }

    async fn find(&self, id: &String) -> Result<Product, RepositoryError> {
        let rows = self
            .rows
            .read()
            .map_err(|_| RepositoryError::Backend("lock poisoned".to_string()))?;
        match rows.get(id) {
            Some(row) => Ok(row.clone().into_entity()?),
            None => Err(RepositoryError::NotFound {
                entity: "Product",
                id: id.clone(),
            }),
        }
    }

    async fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = self
            .rows
            .read()
            .map_err(|_| RepositoryError::Backend("lock poisoned".to_string()))?;
        rows.values()
            .cloned()
            .map(|row| row.into_entity().map_err(RepositoryError::from))
            .collect()
    }
}

/// Map-backed implementation of `Repository<Customer>`.
#[derive(Debug, Default)]
pub struct InMemoryCustomerRepository {
    rows: RwLock<HashMap<String, CustomerRow>>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository<Customer> for InMemoryCustomerRepository {
    async fn create(&self, entity: &Customer) -> Result<(), RepositoryError> {
        let row = CustomerRow::from_entity(entity);
        let mut rows = self
            .rows
            .write()
            .map_err(|_| RepositoryError::Backend("lock poisoned".to_string()))?;
        if rows.contains_key(&row.id) {
            return Err(RepositoryError::AlreadyExists {
                entity: "Customer",
                id: row.id,
            });
        }
        rows.insert(row.id.clone(), row);
        Ok(())
    }

    async fn update(&self, entity: &Customer) -> Result<(), RepositoryError> {
        let row = CustomerRow::from_entity(entity);
        let mut rows = self
            .rows
            .write()
            .map_err(|_| RepositoryError::Backend("lock poisoned".to_string()))?;
        match rows.get_mut(&row.id) {
            Some(slot) => {
                *slot = row;
                Ok(())
            }
            None => Err(RepositoryError::NotFound {
                entity: "Customer",
                id: row.id,
            }),
        }
    }

    async fn find(&self, id: &String) -> Result<Customer, RepositoryError> {
        let rows = self
            .rows
            .read()
            .map_err(|_| RepositoryError::Backend("lock poisoned".to_string()))?;
        match rows.get(id) {
            Some(row) => Ok(row.clone().into_entity()?),
            None => Err(RepositoryError::NotFound {
                entity: "Customer",
                id: id.clone(),
            }),
        }
    }

    async fn find_all(&self) -> Result<Vec<Customer>, RepositoryError> {
        let rows = self
            .rows
            .read()
            .map_err(|_| RepositoryError::Backend("lock poisoned".to_string()))?;
        rows.values()
            .cloned()
            .map(|row| row.into_entity().map_err(RepositoryError::from))
            .collect()
    }
}
