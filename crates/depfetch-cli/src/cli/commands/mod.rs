//! CLI command handlers.

mod cache_path;
mod checksum;
mod fetch;

pub use cache_path::run_cache_path;
pub use checksum::run_checksum;
pub use fetch::run_fetch;
