//! Shared building blocks for the item store crates: logging setup and
//! the JSON response envelope.

pub mod types;
pub mod utils;
