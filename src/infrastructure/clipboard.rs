use crate::domain::{clipboard::ClipboardSink, error::ClipboardError};
use arboard::Clipboard;
use tracing::{debug, warn};

/// The OS clipboard. One handle is kept for the whole session because on
/// X11 and Wayland the copied text is served by the process that owns it.
pub struct SystemClipboard {
    clipboard: Option<Clipboard>,
}

impl SystemClipboard {
    #[must_use]
    pub fn new() -> Self {
        let clipboard = match Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(e) => {
                warn!(error = %e, "clipboard unavailable, will retry on first copy");
                None
            }
        };
        Self { clipboard }
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipboardSink for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.clipboard.is_none() {
            let clipboard =
                Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
            self.clipboard = Some(clipboard);
        }
        let Some(clipboard) = self.clipboard.as_mut() else {
            return Err(ClipboardError::Unavailable("no clipboard handle".to_string()));
        };
        clipboard
            .set_text(text)
            .map_err(|e| ClipboardError::Write(e.to_string()))?;
        debug!(chars = text.len(), "copied to clipboard");
        Ok(())
    }
}
