//! Domain records for the item store and the validation rules that guard them.

pub mod errors;
pub mod item;

pub use item::{Item, ItemChanges, ItemPayload, NewItem, PriceInput, Size};
