mod entry_id;
mod id_macro;

pub use entry_id::EntryId;
