//! Item business rules on top of a [`CollectionStore`](crate::storage::CollectionStore).

pub mod service;

pub use service::ItemService;

use models::Item;

use crate::errors::ServiceError;

/// Next id: one past the largest numeric id in the collection, `"1"` when empty.
/// Ids freed by deletes are not reused while a larger id remains.
pub fn next_id(items: &[Item]) -> Result<String, ServiceError> {
    let max = items.iter().map(Item::numeric_id).max().unwrap_or(0);
    max.checked_add(1)
        .map(|id| id.to_string())
        .ok_or_else(|| ServiceError::Storage(format!("item id space exhausted (max id {max})")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::Size;

    fn item(id: &str) -> Item {
        Item { id: id.into(), name: "x".into(), price: 1.0, size: Size::S }
    }

    #[test]
    fn next_id_follows_maximum() -> Result<(), ServiceError> {
        assert_eq!(next_id(&[])?, "1");
        assert_eq!(next_id(&[item("1"), item("3")])?, "4");
        assert_eq!(next_id(&[item("10"), item("2")])?, "11");
        assert_eq!(next_id(&[item("legacy-abc")])?, "1");
        assert_eq!(next_id(&[item("12abc"), item("3")])?, "13");
        Ok(())
    }

    #[test]
    fn next_id_refuses_to_wrap() {
        let max = u64::MAX.to_string();
        assert!(matches!(next_id(&[item("1"), item(&max)]), Err(ServiceError::Storage(_))));
        assert_eq!(next_id(&[item(&(u64::MAX - 1).to_string())]).ok(), Some(max));
    }
}
