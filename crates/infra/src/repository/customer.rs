//! Postgres-backed customer repository.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::instrument;

use storefront_core::{DomainResult, Entity};
use storefront_customers::{Address, Customer};

use super::r#trait::{Repository, RepositoryError};

/// Persistence model for `Customer`: one row in the `customers` table.
///
/// The optional address is flattened into four nullable columns; an address is
/// only reconstructed when all four are present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerRow {
    pub id: String,
    pub name: String,
    pub street: Option<String>,
    pub number: Option<i32>,
    pub zip: Option<String>,
    pub city: Option<String>,
    pub active: bool,
    pub reward_points: i64,
}

impl CustomerRow {
    pub fn from_entity(customer: &Customer) -> Self {
        let address = customer.address();
        Self {
            id: customer.id().clone(),
            name: customer.name().to_string(),
            street: address.map(|a| a.street().to_string()),
            number: address.map(|a| a.number() as i32),
            zip: address.map(|a| a.zip().to_string()),
            city: address.map(|a| a.city().to_string()),
            active: customer.is_active(),
            reward_points: customer.reward_points() as i64,
        }
    }

    /// Rebuild the entity, re-running validation and the
    /// active-requires-address invariant.
    pub fn into_entity(self) -> DomainResult<Customer> {
        let address = match (self.street, self.number, self.zip, self.city) {
            (Some(street), Some(number), Some(zip), Some(city)) => {
                Some(Address::new(street, number as u32, zip, city)?)
            }
            _ => None,
        };
        Customer::restore(
            self.id,
            self.name,
            address,
            self.active,
            self.reward_points as u64,
        )
    }
}

impl<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> for CustomerRow {
    fn from_row(row: &'r sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            street: row.try_get("street")?,
            number: row.try_get("number")?,
            zip: row.try_get("zip")?,
            city: row.try_get("city")?,
            active: row.try_get("active")?,
            reward_points: row.try_get("reward_points")?,
        })
    }
}

/// Postgres-backed implementation of `Repository<Customer>`.
#[derive(Debug, Clone)]
pub struct PgCustomerRepository {
    pool: Arc<PgPool>,
}

impl PgCustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }
}

#[async_trait]
impl Repository<Customer> for PgCustomerRepository {
    #[instrument(skip(self, entity), fields(customer_id = %entity.id()), err)]
    async fn create(&self, entity: &Customer) -> Result<(), RepositoryError> {
        let row = CustomerRow::from_entity(entity);
        sqlx::query(
            r#"
            INSERT INTO customers (id, name, street, number, zip, city, active, reward_points)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(&row.id)
        .bind(&row.name)
        .bind(&row.street)
        .bind(row.number)
        .bind(&row.zip)
        .bind(&row.city)
        .bind(row.active)
        .bind(row.reward_points)
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    #[instrument(skip(self, entity), fields(customer_id = %entity.id()), err)]
    async fn update(&self, entity: &Customer) -> Result<(), RepositoryError> {
        let row = CustomerRow::from_entity(entity);
        let result = sqlx::query(
            r#"
            UPDATE customers
            SET name = $2, street = $3, number = $4, zip = $5, city = $6,
                active = $7, reward_points = $8
            WHERE id = $1
            "#,
        )
        .bind(&row.id)
        .bind(&row.name)
        .bind(&row.street)
        .bind(row.number)
        .bind(&row.zip)
        .bind(&row.city)
        .bind(row.active)
        .bind(row.reward_points)
        .execute(&*self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Customer",
                id: row.id,
            });
        }
        Ok(())
    }

    #[instrument(skip(self), err)]
    async fn find(&self, id: &String) -> Result<Customer, RepositoryError> {
        let row: Option<CustomerRow> = sqlx::query_as(
            r#"
            SELECT id, name, street, number, zip, city, active, reward_points
            FROM customers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&*self.pool)
        .await?;
        match row {
            Some(row) => Ok(row.into_entity()?),
            None => Err(RepositoryError::NotFound {
                entity: "Customer",
                id: id.clone(),
            }),
        }
    }

    #[instrument(skip(self), err)]
    async fn find_all(&self) -> Result<Vec<Customer>, RepositoryError> {
        let rows: Vec<CustomerRow> = sqlx::query_as(
            r#"
            SELECT id, name, street, number, zip, city, active, reward_points
            FROM customers
            "#,
        )
        .fetch_all(&*self.pool)
        .await?;
        rows.into_iter()
            .map(|row| row.into_entity().map_err(RepositoryError::from))
            .collect()
    }
}
