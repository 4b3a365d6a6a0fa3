//! System clipboard port.
//!
//! Abstracts the operating system's shared clipboard. Images cross this port
//! as PNG bytes, the only raster encoding the history stores.
//!
//! Implementations may block; async callers should run them on a blocking
//! thread.

use crate::clipboard::GenerationToken;
use crate::ports::errors::ClipboardError;

pub trait SystemClipboardPort: Send + Sync {
    /// Opaque value that changes whenever the clipboard is written.
    fn generation_token(&self) -> Result<GenerationToken, ClipboardError>;

    /// PNG encoding of the clipboard image, if one is present.
    fn read_image(&self) -> Result<Option<Vec<u8>>, ClipboardError>;

    fn read_text(&self) -> Result<Option<String>, ClipboardError>;

    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;

    fn write_image(&self, png_bytes: &[u8]) -> Result<(), ClipboardError>;

    fn clear(&self) -> Result<(), ClipboardError>;
}
