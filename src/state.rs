use crate::models::LogEntry;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

/// The collection and the slot it is persisted to.
#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub logs: Arc<Mutex<Vec<LogEntry>>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, logs: Vec<LogEntry>) -> Self {
        Self {
            data_path,
            logs: Arc::new(Mutex::new(logs)),
        }
    }
}
