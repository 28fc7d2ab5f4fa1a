pub mod branch;
pub mod compiler;
pub mod enrich;
pub mod error;
pub mod message;
pub mod ranker;
pub mod render;

pub use branch::get_branch_autolinks;
pub use compiler::MatcherCompiler;
pub use enrich::{enrich_autolinks, pending_enrichment};
pub use error::AutolinkError;
pub use message::get_autolinks;
pub use ranker::compare_autolinks;
pub use render::render_autolinks;

#[cfg(test)]
mod message_test;
