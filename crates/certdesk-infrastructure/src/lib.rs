pub mod config_service;
pub mod http_api_client;
pub mod paths;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::http_api_client::HttpApiClient;
pub use crate::paths::{CertdeskPaths, PathError};
pub use crate::storage::{FileStore, MemoryStore, TomlFile};
