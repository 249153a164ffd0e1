//! Key-value store implementations.

mod file_store;
mod memory_store;
mod toml_file;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;
pub use toml_file::TomlFile;
