//! Storage module for document persistence and configuration.

pub mod config;
pub mod database;
pub mod store;

pub use config::{get_data_dir, load_config, save_config, ConfigError, EngineConfig};
pub use database::SqliteStore;
pub use store::{MemoryStore, PersistenceStore, StoreError};
