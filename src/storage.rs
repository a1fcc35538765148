use crate::errors::AppError;
use crate::persistence::LocalStore;
use std::path::Path;
use tokio::fs;
use tracing::{error, info};

pub async fn load_store(path: &Path) -> LocalStore {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice::<LocalStore>(&bytes) {
            Ok(store) => {
                info!(records = store.items.len(), "loaded store from {}", path.display());
                store
            }
            Err(err) => {
                error!("failed to parse store file: {err}");
                LocalStore::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => LocalStore::default(),
        Err(err) => {
            error!("failed to read store file: {err}");
            LocalStore::default()
        }
    }
}

pub async fn persist_store(path: &Path, store: &LocalStore) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(store).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}
