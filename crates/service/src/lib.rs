//! Service layer for the item store.
//! - `storage` holds the load/save port and its JSON file implementation.
//! - `items` holds the business rules (validation, id assignment, persistence policy).

pub mod errors;
pub mod storage;
pub mod items;
