use storefront_core::{DomainError, DomainResult, Entity};

/// Entity: Product.
///
/// `price` is carried in the smallest currency unit (e.g. cents) and is never
/// negative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    id: String,
    name: String,
    price: i64,
}

impl Product {
    /// Create a validated product.
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: i64) -> DomainResult<Self> {
        let product = Self {
            id: id.into(),
            name: name.into(),
            price,
        };
        product.validate()?;
        Ok(product)
    }

    fn validate(&self) -> DomainResult<()> {
        if self.id.trim().is_empty() {
            return Err(DomainError::validation("id is required"));
        }
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name is required"));
        }
        if self.price < 0 {
            return Err(DomainError::validation("price cannot be negative"));
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> i64 {
        self.price
    }

    /// Rename the product. The new name must be non-empty.
    pub fn change_name(&mut self, name: impl Into<String>) -> DomainResult<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name is required"));
        }
        self.name = name;
        Ok(())
    }

    /// Reprice the product. The new price must be non-negative.
    pub fn change_price(&mut self, price: i64) -> DomainResult<()> {
        if price < 0 {
            return Err(DomainError::validation("price cannot be negative"));
        }
        self.price = price;
        Ok(())
    }
}

impl Entity for Product {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
