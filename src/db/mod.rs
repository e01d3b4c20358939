pub mod repository;

pub use repository::SqliteStore;
