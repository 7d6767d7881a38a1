use std::path::PathBuf;

use tokio::sync::Mutex;

use crate::config::Config;
use crate::data::CsvDataProvider;
use crate::engine::batch::BatchRunner;
use crate::observability::metrics::Metrics;
use crate::store::JsonFileLogStore;

pub type Runner = BatchRunner<CsvDataProvider, JsonFileLogStore>;

pub struct AppState {
    pub runner: Runner,
    /// Held for the whole of a batch run; the log store is read-then-overwrite.
    pub batch_lock: Mutex<()>,
    pub static_dir: PathBuf,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(data_dir: impl Into<PathBuf>, log_path: impl Into<PathBuf>) -> Self {
        Self {
            runner: BatchRunner::new(
                CsvDataProvider::new(data_dir),
                JsonFileLogStore::new(log_path),
            ),
            batch_lock: Mutex::new(()),
            static_dir: PathBuf::from("static"),
            metrics: Metrics::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            static_dir: config.static_dir.clone(),
            ..Self::new(config.data_dir.clone(), config.log_path.clone())
        }
    }
}
