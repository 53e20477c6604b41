//! Batch input loading.

mod loader;
mod source;

pub use loader::{Batch, BatchLoader};
pub use source::SourceMetadata;
