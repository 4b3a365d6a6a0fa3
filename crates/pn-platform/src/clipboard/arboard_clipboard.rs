//! System clipboard adapter over `arboard`.
//!
//! `arboard` exposes no change counter, so the generation token is a blake3
//! digest of the current text and image contents. Any write that changes the
//! contents changes the token.

use std::sync::{Mutex, MutexGuard};

use arboard::{Clipboard, Set};
use pn_core::ports::{ClipboardError, SystemClipboardPort};
use pn_core::GenerationToken;

use super::png::{png_to_rgba, rgba_to_png};

pub struct ArboardClipboard {
    inner: Mutex<Clipboard>,
    hold_selection: bool,
}

impl ArboardClipboard {
    pub fn new() -> Result<Self, ClipboardError> {
        let clipboard =
            Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        Ok(Self {
            inner: Mutex::new(clipboard),
            hold_selection: false,
        })
    }

    /// Writes block until another application takes the selection over.
    ///
    /// On X11 and Wayland the selection lives only as long as its owner, so a
    /// short-lived process must stay up for the copy to be pasteable. Other
    /// platforms keep the contents after exit and are unaffected.
    pub fn holding_selection(mut self) -> Self {
        self.hold_selection = true;
        self
    }

    fn setter<'a>(&self, clipboard: &'a mut Clipboard) -> Set<'a> {
        let set = clipboard.set();
        if self.hold_selection {
            hold(set)
        } else {
            set
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Clipboard>, ClipboardError> {
        self.inner
            .lock()
            .map_err(|_| ClipboardError::Unavailable("clipboard lock poisoned".to_string()))
    }
}

#[cfg(all(
    unix,
    not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
))]
fn hold(set: Set<'_>) -> Set<'_> {
    use arboard::SetExtLinux;
    set.wait()
}

#[cfg(not(all(
    unix,
    not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
)))]
fn hold(set: Set<'_>) -> Set<'_> {
    set
}

/// Maps "nothing of that kind on the clipboard" to `None`.
fn optional<T>(result: Result<T, arboard::Error>) -> Result<Option<T>, ClipboardError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(arboard::Error::ContentNotAvailable) => Ok(None),
        Err(e) => Err(ClipboardError::Read(e.to_string())),
    }
}

impl SystemClipboardPort for ArboardClipboard {
    fn generation_token(&self) -> Result<GenerationToken, ClipboardError> {
        let mut clipboard = self.lock()?;
        let mut hasher = blake3::Hasher::new();

        if let Some(text) = optional(clipboard.get_text())? {
            hasher.update(b"text:");
            hasher.update(text.as_bytes());
        }
        if let Some(image) = optional(clipboard.get_image())? {
            hasher.update(b"image:");
            hasher.update(&(image.width as u64).to_le_bytes());
            hasher.update(&(image.height as u64).to_le_bytes());
            hasher.update(&image.bytes);
        }

        Ok(GenerationToken::new(hasher.finalize().to_hex().to_string()))
    }

    fn read_image(&self) -> Result<Option<Vec<u8>>, ClipboardError> {
        let image = optional(self.lock()?.get_image())?;
        image.map(|image| rgba_to_png(&image)).transpose()
    }

    fn read_text(&self) -> Result<Option<String>, ClipboardError> {
        optional(self.lock()?.get_text())
    }

    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard = self.lock()?;
        self.setter(&mut clipboard)
            .text(text)
            .map_err(|e| ClipboardError::Write(e.to_string()))
    }

    fn write_image(&self, png_bytes: &[u8]) -> Result<(), ClipboardError> {
        let image = png_to_rgba(png_bytes)?;
        let mut clipboard = self.lock()?;
        self.setter(&mut clipboard)
            .image(image)
            .map_err(|e| ClipboardError::Write(e.to_string()))
    }

    fn clear(&self) -> Result<(), ClipboardError> {
        self.lock()?
            .clear()
            .map_err(|e| ClipboardError::Write(e.to_string()))
    }
}
