//! trait seams for the external QR codec collaborators.
//!
//! veriseal does not implement image handling itself. decoding and
//! encoding are consumed as black boxes behind these traits; the server
//! only cares about the payload string that comes out of a symbol.

/// decodes a QR symbol out of raw image bytes.
///
/// best-effort: `None` means "no readable symbol", which the
/// verification engine maps to a `NoSymbolDetected` rejection.
pub trait SymbolDecoder: Send + Sync {
    /// attempt to decode a payload string from image bytes.
    fn decode(&self, image: &[u8]) -> Option<String>;
}

/// renders a payload string into a QR symbol image.
///
/// used once per registration, by whatever prints the labels. no error
/// modes are modeled beyond opaque failure.
pub trait SymbolEncoder: Send + Sync {
    /// encode a payload into image bytes.
    fn encode(&self, payload: &str) -> Option<Vec<u8>>;
}

/// decoder used when no decoder collaborator is wired in.
///
/// reports every image as unreadable, so `/scan` degrades to a
/// `NoSymbolDetected` rejection instead of failing.
pub struct DisabledDecoder;

impl SymbolDecoder for DisabledDecoder {
    fn decode(&self, _image: &[u8]) -> Option<String> {
        None
    }
}
