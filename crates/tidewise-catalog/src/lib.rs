pub mod loader;
pub mod price;
pub mod product;

pub use loader::{CatalogError, CatalogProvider, JsonCatalog, StaticCatalog, parse_catalog};
pub use price::parse_price;
pub use product::ProductRecord;
