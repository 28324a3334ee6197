use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Response envelope shared by every item endpoint.
///
/// `data` and `count` are present on successful reads and writes; `message`
/// carries confirmations and error text.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn data(data: T) -> Self {
        Self { success: true, data: Some(data), count: None, message: None }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<T> ApiResponse<Vec<T>> {
    /// A list payload together with its length.
    pub fn list(data: Vec<T>) -> Self {
        let count = data.len();
        Self { success: true, data: Some(data), count: Some(count), message: None }
    }
}

impl ApiResponse<()> {
    pub fn ok(message: impl Into<String>) -> Self {
        Self { success: true, data: None, count: None, message: Some(message.into()) }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { success: false, data: None, count: None, message: Some(message.into()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn list_envelope_carries_count() -> anyhow::Result<()> {
        let body = serde_json::to_value(ApiResponse::list(vec!["a", "b"]))?;
        assert_eq!(body, json!({"success": true, "data": ["a", "b"], "count": 2}));
        Ok(())
    }

    #[test]
    fn error_envelope_omits_data() -> anyhow::Result<()> {
        let body = serde_json::to_value(ApiResponse::error("Item not found"))?;
        assert_eq!(body, json!({"success": false, "message": "Item not found"}));
        Ok(())
    }

    #[test]
    fn data_with_message() -> anyhow::Result<()> {
        let body = serde_json::to_value(ApiResponse::data(1).with_message("Item created successfully"))?;
        assert_eq!(body, json!({"success": true, "data": 1, "message": "Item created successfully"}));
        Ok(())
    }
}
