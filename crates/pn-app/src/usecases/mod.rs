mod write_entry_to_clipboard;

pub use write_entry_to_clipboard::WriteEntryToClipboardUseCase;
