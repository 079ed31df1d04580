//! Command implementations
//!
//! Each command is a module with an execute function that takes parsed CLI args
//! and runs the operation against a [`Library`](crate::Library).

pub mod completions;
pub mod config;
pub mod datasets;
pub mod images;
pub mod import;
pub mod migrate;
pub mod search;
pub mod tag;
pub mod tags;

// Re-export execute functions for convenience
pub use completions::execute as completions;
pub use config::execute as config;
pub use datasets::execute as datasets;
pub use images::execute as images;
pub use import::execute as import;
pub use migrate::execute as migrate;
pub use search::execute as search;
pub use tag::execute as tag;
pub use tags::execute as tags;
