pub mod entities;

pub use entities::entity_routes;
