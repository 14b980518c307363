//! Storage engines for the HBnB API
//!
//! Every engine implements [`Storage`]: an in-process memory store, the
//! JSON file store and the MySQL store.

mod file;
mod manager;
mod memory;
mod mysql;
mod traits;

pub use file::FileStorage;
pub use manager::open_storage;
pub use memory::MemoryStorage;
pub use mysql::DbStorage;
pub use traits::Storage;
