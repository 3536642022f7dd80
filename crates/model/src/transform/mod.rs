pub mod mapping;
pub mod schema;
