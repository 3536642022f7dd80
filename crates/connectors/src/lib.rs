pub mod acquire;
pub mod file;
pub mod sink;
