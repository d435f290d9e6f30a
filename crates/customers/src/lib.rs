//! Customer bounded context: the `Customer` entity and its `Address`.

pub mod address;
pub mod customer;

pub use address::Address;
pub use customer::Customer;
