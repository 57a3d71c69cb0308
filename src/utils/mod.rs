// Utils compartidos

pub mod constants;
pub mod storage;
pub mod validation;

pub use constants::*;
pub use storage::{KeyValueStore, LocalStorageStore, MemoryStore, StorageError};
pub use validation::*;
