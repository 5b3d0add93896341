// src/storage/mod.rs
pub mod file;
pub mod memory;
pub mod store;
pub mod traits;

pub use file::FileBackend;
pub use memory::MemoryBackend;
pub use store::PolicyStore;
pub use traits::{PolicyBackend, StorageError};
