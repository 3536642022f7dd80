pub mod grid;
pub mod normalized;
pub mod table;
