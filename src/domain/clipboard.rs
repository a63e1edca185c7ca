use super::error::ClipboardError;

/// Destination for generated commands.
#[cfg_attr(test, mockall::automock)]
pub trait ClipboardSink {
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError>;
}
