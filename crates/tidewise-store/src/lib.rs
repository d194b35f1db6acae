pub mod backend;
pub mod history;
pub mod profile;
pub mod schema;
pub mod store;

pub use backend::{MemoryStore, PreferenceStore};
pub use history::{HISTORY_CAPACITY, SearchHistory};
pub use profile::{PreferenceProfile, WeightPolicy};
pub use store::{SqliteStore, StoreStats};
