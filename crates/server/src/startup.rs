use std::{net::SocketAddr, sync::Arc};

use axum::{extract::Request, ServiceExt};
use configs::{AppConfig, StorageConfig};
use models::Item;
use service::{items::ItemService, storage::JsonFileStore};
use tracing::info;

use crate::routes::{self, ServerState};

/// Open the backing file (creating its directory and an empty array when
/// missing) and wire the item service.
pub async fn build_state(storage: &StorageConfig) -> anyhow::Result<ServerState> {
    let store = JsonFileStore::<Item>::open(&storage.data_file).await?;
    let items = ItemService::new(store).with_strict_writes(storage.strict_writes);
    Ok(ServerState { items: Arc::new(items) })
}

/// Public entry: build the app and run the HTTP server
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let state = build_state(&cfg.storage).await?;
    let app = routes::build_app(state);

    let addr: SocketAddr = cfg.server.bind_addr().parse()?;
    info!(
        %addr,
        data_file = %cfg.storage.data_file.display(),
        strict_writes = cfg.storage.strict_writes,
        "starting item store"
    );
    info!("endpoints: GET /items, POST /items, GET /items/:id, PUT /items/:id, DELETE /items/:id");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;
    Ok(())
}
