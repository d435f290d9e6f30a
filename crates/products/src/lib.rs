//! Product bounded context: the `Product` entity.

pub mod product;

pub use product::Product;
