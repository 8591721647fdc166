//! CLI command handlers.

mod sync;
mod urls;

pub use sync::run_sync;
pub use urls::run_urls;
