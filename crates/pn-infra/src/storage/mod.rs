mod file_blob_storage;
mod in_memory;

pub use file_blob_storage::FileBlobStorage;
pub use in_memory::InMemoryBlobStorage;
