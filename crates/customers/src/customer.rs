use storefront_core::{DomainError, DomainResult, Entity};

use crate::address::Address;

/// Entity: Customer.
///
/// Identity is the caller-supplied `id` string, fixed at construction. Name
/// and address are mutable through validated mutators only; there are no
/// unchecked setters, so a constructed customer always satisfies its
/// invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    id: String,
    name: String,
    address: Option<Address>,
    active: bool,
    reward_points: u64,
}

impl Customer {
    /// Create a new, inactive customer with no address and no reward points.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> DomainResult<Self> {
        let customer = Self {
            id: id.into(),
            name: name.into(),
            address: None,
            active: false,
            reward_points: 0,
        };
        customer.validate()?;
        Ok(customer)
    }

    /// Rebuild a customer from stored state.
    ///
    /// Used by repositories when unmarshalling rows. Re-runs the same checks
    /// as the mutators, so a corrupt row cannot produce an entity that could
    /// not have been reached through the public API.
    pub fn restore(
        id: impl Into<String>,
        name: impl Into<String>,
        address: Option<Address>,
        active: bool,
        reward_points: u64,
    ) -> DomainResult<Self> {
        let customer = Self {
            id: id.into(),
            name: name.into(),
            address,
            active,
            reward_points,
        };
        customer.validate()?;
        if customer.active && customer.address.is_none() {
            return Err(DomainError::invariant(
                "an active customer must have an address",
            ));
        }
        Ok(customer)
    }

    fn validate(&self) -> DomainResult<()> {
        if self.id.trim().is_empty() {
            return Err(DomainError::validation("id is required"));
        }
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name is required"));
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn reward_points(&self) -> u64 {
        self.reward_points
    }

    /// Rename the customer. The new name must be non-empty.
    pub fn change_name(&mut self, name: impl Into<String>) -> DomainResult<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name is required"));
        }
        self.name = name;
        Ok(())
    }

    /// Set or replace the customer's address.
    pub fn change_address(&mut self, address: Address) {
        self.address = Some(address);
    }

    /// Activate the customer.
    ///
    /// Invariant: a customer cannot be activated without an address.
    pub fn activate(&mut self) -> DomainResult<()> {
        if self.address.is_none() {
            return Err(DomainError::invariant(
                "an address is required to activate a customer",
            ));
        }
        self.active = true;
        Ok(())
    }

    /// Deactivate the customer. Always allowed.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Accrue reward points. Saturates instead of wrapping on overflow.
    pub fn add_reward_points(&mut self, points: u64) {
        self.reward_points = self.reward_points.saturating_add(points);
    }
}

impl Entity for Customer {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_address() -> Address {
        Address::new("Main Street", 123, "12345", "Springfield").unwrap()
    }

    #[test]
    fn new_customer_starts_inactive_with_no_points() {
        let customer = Customer::new("1", "Customer 1").unwrap();

        assert_eq!(customer.id(), "1");
        assert_eq!(customer.name(), "Customer 1");
        assert!(customer.address().is_none());
        assert!(!customer.is_active());
        assert_eq!(customer.reward_points(), 0);
    }

    #[test]
    fn new_customer_rejects_empty_id() {
        let err = Customer::new("", "Customer 1").unwrap_err();
        match err {
            DomainError::Validation(msg) => assert!(msg.contains("id")),
            _ => panic!("Expected Validation error for empty id"),
        }
    }

    #[test]
    fn new_customer_rejects_empty_name() {
        let err = Customer::new("1", "").unwrap_err();
        match err {
            DomainError::Validation(msg) => assert!(msg.contains("name")),
            _ => panic!("Expected Validation error for empty name"),
        }
    }

    #[test]
    fn change_name_replaces_the_name() {
        let mut customer = Customer::new("1", "Customer 1").unwrap();

        customer.change_name("Customer 2").unwrap();

        assert_eq!(customer.name(), "Customer 2");
    }

    #[test]
    fn change_name_rejects_empty_name_and_keeps_the_old_one() {
        let mut customer = Customer::new("1", "Customer 1").unwrap();

        let err = customer.change_name("   ").unwrap_err();

        match err {
            DomainError::Validation(_) => {}
            _ => panic!("Expected Validation error for empty name"),
        }
        assert_eq!(customer.name(), "Customer 1");
    }

    #[test]
    fn activate_fails_without_address() {
        let mut customer = Customer::new("1", "Customer 1").unwrap();

        let err = customer.activate().unwrap_err();

        match err {
            DomainError::InvariantViolation(msg) => assert!(msg.contains("address")),
            _ => panic!("Expected InvariantViolation when activating without address"),
        }
        assert!(!customer.is_active());
    }

    #[test]
    fn activate_succeeds_with_address() {
        let mut customer = Customer::new("1", "Customer 1").unwrap();
        customer.change_address(test_address());

        customer.activate().unwrap();

        assert!(customer.is_active());
    }

    #[test]
    fn deactivate_is_unconditional() {
        let mut customer = Customer::new("1", "Customer 1").unwrap();
        customer.change_address(test_address());
        customer.activate().unwrap();

        customer.deactivate();

        assert!(!customer.is_active());
    }

    #[test]
    fn reward_points_accumulate() {
        let mut customer = Customer::new("1", "Customer 1").unwrap();

        customer.add_reward_points(5);
        customer.add_reward_points(3);

        assert_eq!(customer.reward_points(), 8);
    }

    #[test]
    fn restore_rebuilds_full_state() {
        let customer =
            Customer::restore("1", "Customer 1", Some(test_address()), true, 42).unwrap();

        assert!(customer.is_active());
        assert_eq!(customer.reward_points(), 42);
        assert_eq!(customer.address(), Some(&test_address()));
    }

    #[test]
    fn restore_rejects_active_customer_without_address() {
        let err = Customer::restore("1", "Customer 1", None, true, 0).unwrap_err();

        match err {
            DomainError::InvariantViolation(_) => {}
            _ => panic!("Expected InvariantViolation for active customer without address"),
        }
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: construction succeeds for any non-blank id and name.
            #[test]
            fn non_blank_inputs_always_construct(
                id in "[A-Za-z0-9][A-Za-z0-9-]{0,31}",
                name in "[A-Za-z][A-Za-z0-9 ]{0,63}"
            ) {
                let customer = Customer::new(id.clone(), name.clone()).unwrap();
                prop_assert_eq!(customer.id(), &id);
                prop_assert_eq!(customer.name(), name);
            }

            /// Property: total accrued points do not depend on call order.
            #[test]
            fn reward_accrual_is_order_independent(
                mut points in prop::collection::vec(0u64..10_000u64, 1..16)
            ) {
                let mut forward = Customer::new("1", "Customer 1").unwrap();
                for p in &points {
                    forward.add_reward_points(*p);
                }

                points.reverse();
                let mut backward = Customer::new("1", "Customer 1").unwrap();
                for p in &points {
                    backward.add_reward_points(*p);
                }

                prop_assert_eq!(forward.reward_points(), backward.reward_points());
                prop_assert_eq!(forward.reward_points(), points.iter().sum::<u64>());
            }
        }
    }
}
