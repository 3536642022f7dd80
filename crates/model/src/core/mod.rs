pub mod timestamp;
pub mod utils;
pub mod value;
