use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Stored item as returned by the API.
#[derive(ToSchema)]
pub struct ItemDoc {
    #[schema(example = "1")]
    pub id: String,
    #[schema(example = "Latte")]
    pub name: String,
    #[schema(example = 4.5)]
    pub price: f64,
    /// One of `S`, `M`, `L`.
    #[schema(example = "M")]
    pub size: String,
}

/// Create/update body. Create requires all fields; update applies the ones present.
#[derive(ToSchema)]
pub struct ItemInputDoc {
    pub name: Option<String>,
    pub price: Option<f64>,
    /// Case-insensitive `S`, `M` or `L`.
    pub size: Option<String>,
}

#[derive(ToSchema)]
pub struct ItemEnvelopeDoc {
    pub success: bool,
    pub data: ItemDoc,
    pub message: Option<String>,
}

#[derive(ToSchema)]
pub struct ItemListDoc {
    pub success: bool,
    pub data: Vec<ItemDoc>,
    pub count: usize,
}

#[derive(ToSchema)]
pub struct MessageDoc {
    pub success: bool,
    pub message: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::items::list_items,
        crate::routes::items::create_item,
        crate::routes::items::get_item,
        crate::routes::items::update_item,
        crate::routes::items::delete_item,
    ),
    components(
        schemas(
            HealthResponse,
            ItemDoc,
            ItemInputDoc,
            ItemEnvelopeDoc,
            ItemListDoc,
            MessageDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "items")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_item_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/items"));
        assert!(doc.paths.paths.contains_key("/items/{id}"));
        assert!(doc.paths.paths.contains_key("/health"));
    }
}
