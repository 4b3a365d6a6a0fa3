mod arboard_clipboard;
mod png;

pub use arboard_clipboard::ArboardClipboard;
pub use png::{png_to_rgba, rgba_to_png};
