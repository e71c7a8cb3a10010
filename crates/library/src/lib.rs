// Catalog adapters (beets library.db)

pub mod sqlite;

pub use sqlite::BeetsLibrary;
