//! CLI command implementations for Tidewise

mod common;
mod recommend;
mod search;
mod serve;
mod stats;
mod suggest;

pub use recommend::recommend;
pub use search::{SearchArgs, search};
pub use serve::serve;
pub use stats::stats;
pub use suggest::suggest;
