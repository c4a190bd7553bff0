pub mod memory;
pub mod mysql;

pub use memory::InMemoryRepository;
pub use mysql::MySqlRepository;
pub use smallurl_core::{ReadRepository, Repository, StorageError, UrlRecord};
