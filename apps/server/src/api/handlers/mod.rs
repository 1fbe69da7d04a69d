pub mod entities;
pub mod system;
