pub mod error;
pub mod schema_file;
pub mod sync;
