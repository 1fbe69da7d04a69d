//! Business logic layer
//!
//! Services enforce entity lifecycle rules on top of the stores and own the
//! transaction scope of every write.

pub mod crud;

pub use crud::{CountryService, CrudService, GreetingService};
