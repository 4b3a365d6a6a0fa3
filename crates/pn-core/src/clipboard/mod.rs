mod entry;
mod generation;

pub use entry::{ClipboardEntry, IMAGE_PLACEHOLDER};
pub use generation::{GenerationToken, GenerationTracker};
