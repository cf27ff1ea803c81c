use std::future::Future;
use std::path::Path;
use std::pin::Pin;

use lopdf::Object;
use pdfsift_core::{DocumentError, DocumentExtractor, RawDocument};

use crate::DEFAULT_MAX_FILE_SIZE;

/// Extracts per-page text and embedded metadata from a PDF file.
///
/// The page table comes from `lopdf`, the text layer from
/// `pdf-extract`. There is no OCR fallback: an image-only page simply
/// contributes empty text.
pub struct PdfExtractor {
    pub max_file_size: u64,
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl DocumentExtractor for PdfExtractor {
    fn extract(
        &self,
        path: &Path,
    ) -> Pin<Box<dyn Future<Output = Result<RawDocument, DocumentError>> + Send + '_>> {
        let path = path.to_path_buf();
        let max_size = self.max_file_size;
        Box::pin(async move {
            let meta = tokio::fs::metadata(&path).await?;
            if meta.len() > max_size {
                return Err(DocumentError::FileTooLarge(meta.len()));
            }

            tokio::task::spawn_blocking(move || extract_blocking(&path))
                .await
                .map_err(|e| DocumentError::Extraction(e.to_string()))?
        })
    }
}

fn extract_blocking(path: &Path) -> Result<RawDocument, DocumentError> {
    let doc =
        lopdf::Document::load(path).map_err(|e| DocumentError::Extraction(e.to_string()))?;
    let page_count = doc.get_pages().len();
    let metadata_author = read_author(&doc);

    let mut pages = pdf_extract::extract_text_by_pages(path)
        .map_err(|e| DocumentError::Extraction(e.to_string()))?;

    // The page table is authoritative: pages the text extractor could
    // not surface keep an empty slot so the count stays honest.
    if pages.len() < page_count {
        tracing::warn!(
            path = %path.display(),
            extracted = pages.len(),
            page_count,
            "some pages yielded no text"
        );
        pages.resize(page_count, String::new());
    }

    Ok(RawDocument {
        source: path.display().to_string(),
        pages,
        metadata_author,
    })
}

/// Author entry of the Info dictionary, if the document carries one.
fn read_author(doc: &lopdf::Document) -> Option<String> {
    let dict = match doc.trailer.get(b"Info").ok()? {
        Object::Reference(id) => doc.get_object(*id).ok()?.as_dict().ok()?,
        Object::Dictionary(dict) => dict,
        _ => return None,
    };
    let value = match dict.get(b"Author").ok()? {
        Object::Reference(id) => doc.get_object(*id).ok()?,
        other => other,
    };
    let decoded = decode_text_string(value.as_str().ok()?);
    let author = decoded.trim();
    (!author.is_empty()).then(|| author.to_owned())
}

/// PDF text strings are UTF-16BE when they carry a BOM, otherwise a
/// byte encoding for which lossy UTF-8 is an acceptable reading.
fn decode_text_string(bytes: &[u8]) -> String {
    if let [0xFE, 0xFF, rest @ ..] = bytes {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&units)
    } else {
        String::from_utf8_lossy(bytes).into_owned()
    }
}
