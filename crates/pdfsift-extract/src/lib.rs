//! PDF extraction collaborator: per-page text via `pdf-extract`, page
//! count and embedded metadata via `lopdf`.

mod pdf;

pub use pdf::PdfExtractor;

/// Default maximum file size: 50 MiB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;
