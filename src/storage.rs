use crate::errors::AppError;
use crate::models::LogEntry;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, error};

/// Name of the single slot holding the serialized log collection.
pub const STORAGE_KEY: &str = "habit-tracker-logs";

pub fn default_data_path() -> PathBuf {
    PathBuf::from("data").join(format!("{STORAGE_KEY}.json"))
}

/// Reads the slot. Missing or unreadable data yields an empty collection.
pub async fn load_logs(path: &Path) -> Vec<LogEntry> {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(entries) => entries,
            Err(err) => {
                error!("failed to parse {}: {err}", path.display());
                Vec::new()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            debug!("no stored logs at {}", path.display());
            Vec::new()
        }
        Err(err) => {
            error!("failed to read {}: {err}", path.display());
            Vec::new()
        }
    }
}

/// Overwrites the slot with the whole collection.
pub async fn persist_logs(path: &Path, entries: &[LogEntry]) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(entries).map_err(AppError::internal)?;
    fs::write(path, payload).await?;
    debug!(count = entries.len(), "persisted logs");
    Ok(())
}
