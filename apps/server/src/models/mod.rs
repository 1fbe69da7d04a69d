//! Domain entities

pub mod country;
pub mod entity;
pub mod greeting;

pub use country::Country;
pub use entity::{same_identity, Audit, Entity};
pub use greeting::Greeting;
