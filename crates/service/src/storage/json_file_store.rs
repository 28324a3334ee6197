use std::{io::ErrorKind, marker::PhantomData, path::PathBuf, sync::Arc};

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tokio::fs;
use tracing::{debug, info};

use crate::errors::ServiceError;
use crate::storage::CollectionStore;

/// JSON file holding one array of records.
///
/// Saves are pretty-printed and go through a sibling `.tmp` file that is
/// renamed over the target, so readers never observe a half-written array.
pub struct JsonFileStore<T> {
    file_path: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    /// Open the store at `path`. Creates the parent directory and an empty
    /// array if the file does not exist yet.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        match fs::metadata(&file_path).await {
            Ok(_) => debug!(path = %file_path.display(), "using existing data file"),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                fs::write(&file_path, b"[]").await?;
                info!(path = %file_path.display(), "initialized empty data file");
            }
            Err(e) => return Err(e.into()),
        }

        Ok(Arc::new(Self { file_path, _marker: PhantomData }))
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.file_path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.file_path.with_file_name(name)
    }
}

#[async_trait]
impl<T> CollectionStore<T> for JsonFileStore<T>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    async fn load(&self) -> Result<Vec<T>, ServiceError> {
        let bytes = match fs::read(&self.file_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(ServiceError::Storage(format!("read {}: {e}", self.file_path.display()))),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        serde_json::from_slice(&bytes)
            .map_err(|e| ServiceError::Storage(format!("parse {}: {e}", self.file_path.display())))
    }

    async fn save(&self, items: &[T]) -> Result<(), ServiceError> {
        let data = serde_json::to_vec_pretty(items).map_err(|e| ServiceError::Storage(e.to_string()))?;
        let tmp = self.tmp_path();
        fs::write(&tmp, data)
            .await
            .map_err(|e| ServiceError::Storage(format!("write {}: {e}", tmp.display())))?;
        fs::rename(&tmp, &self.file_path)
            .await
            .map_err(|e| ServiceError::Storage(format!("replace {}: {e}", self.file_path.display())))?;
        Ok(())
    }

    fn location(&self) -> String {
        self.file_path.display().to_string()
    }
}
