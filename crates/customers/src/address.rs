use storefront_core::{DomainError, DomainResult, ValueObject};

/// Postal address of a customer.
///
/// Immutable once constructed; to change any part of it, build a new one and
/// hand it to [`crate::Customer::change_address`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    street: String,
    number: u32,
    zip: String,
    city: String,
}

impl Address {
    /// Build a validated address.
    pub fn new(
        street: impl Into<String>,
        number: u32,
        zip: impl Into<String>,
        city: impl Into<String>,
    ) -> DomainResult<Self> {
        let address = Self {
            street: street.into(),
            number,
            zip: zip.into(),
            city: city.into(),
        };
        address.validate()?;
        Ok(address)
    }

    fn validate(&self) -> DomainResult<()> {
        if self.street.trim().is_empty() {
            return Err(DomainError::validation("street is required"));
        }
        if self.zip.trim().is_empty() {
            return Err(DomainError::validation("zip is required"));
        }
        if self.city.trim().is_empty() {
            return Err(DomainError::validation("city is required"));
        }
        Ok(())
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn zip(&self) -> &str {
        &self.zip
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

impl ValueObject for Address {}

impl core::fmt::Display for Address {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{}, {}, {} {}",
            self.street, self.number, self.zip, self.city
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_address_holds_its_fields() {
        let address = Address::new("Main Street", 123, "12345", "Springfield").unwrap();

        assert_eq!(address.street(), "Main Street");
        assert_eq!(address.number(), 123);
        assert_eq!(address.zip(), "12345");
        assert_eq!(address.city(), "Springfield");
    }

    #[test]
    fn new_address_rejects_empty_street() {
        let err = Address::new("", 123, "12345", "Springfield").unwrap_err();
        match err {
            DomainError::Validation(msg) => assert!(msg.contains("street")),
            _ => panic!("Expected Validation error for empty street"),
        }
    }

    #[test]
    fn new_address_rejects_empty_zip() {
        let err = Address::new("Main Street", 123, "  ", "Springfield").unwrap_err();
        match err {
            DomainError::Validation(msg) => assert!(msg.contains("zip")),
            _ => panic!("Expected Validation error for empty zip"),
        }
    }

    #[test]
    fn new_address_rejects_empty_city() {
        let err = Address::new("Main Street", 123, "12345", "").unwrap_err();
        match err {
            DomainError::Validation(msg) => assert!(msg.contains("city")),
            _ => panic!("Expected Validation error for empty city"),
        }
    }

    #[test]
    fn addresses_with_same_fields_are_equal() {
        let a = Address::new("Main Street", 1, "12345", "Springfield").unwrap();
        let b = Address::new("Main Street", 1, "12345", "Springfield").unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn display_renders_single_line() {
        let address = Address::new("Main Street", 123, "12345", "Springfield").unwrap();

        assert_eq!(address.to_string(), "Main Street, 123, 12345 Springfield");
    }
}
