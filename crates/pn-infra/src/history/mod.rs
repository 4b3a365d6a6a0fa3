mod codec;
mod repository;

pub use codec::{decode_history, encode_history};
pub use repository::{BlobHistoryRepository, HISTORY_KEY};
