pub mod error;
pub mod filter;
pub mod mapping;
pub mod normalize;
pub mod pipeline;
pub mod pruner;
pub mod reducer;
