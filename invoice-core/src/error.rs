use std::io;

use thiserror::Error;

/// Errors surfaced by the asset loader and the PDF sink.
///
/// The data model and the layout engine are total: they never return
/// one of these. Only real I/O and image decoding can fail.
#[derive(Debug, Error)]
pub enum InvoiceError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("logo decode error: {0}")]
    LogoDecode(#[from] png::DecodingError),

    /// The logo bytes decoded, but to a pixel format the sink cannot
    /// embed (16-bit samples).
    #[error("unsupported logo format: {0}")]
    UnsupportedLogo(String),
}
