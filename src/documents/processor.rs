// Document processor: text extraction for uploaded PDF and plain-text files

use std::str::FromStr;

use lopdf::Document;
use tracing::{debug, warn};

use crate::models::{ExtractedDocument, UploadedFile};
use crate::types::{AppError, AppResult};

/// File type, decided purely from the filename suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Text,
    Unsupported,
}

impl DocumentKind {
    pub fn from_filename(filename: &str) -> Self {
        if filename.ends_with(".pdf") {
            DocumentKind::Pdf
        } else if filename.ends_with(".txt") {
            DocumentKind::Text
        } else {
            DocumentKind::Unsupported
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("invalid PDF: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("text is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

/// What to do when a single document cannot be read.
///
/// Applies to PDF and plain-text failures alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionFailurePolicy {
    /// Log the failure and substitute a placeholder as the document text
    Contain,
    /// Fail the whole request
    Propagate,
}

impl FromStr for ExtractionFailurePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "contain" => Ok(Self::Contain),
            "propagate" => Ok(Self::Propagate),
            other => Err(anyhow::anyhow!(
                "Unknown extraction failure policy: {} (expected \"contain\" or \"propagate\")",
                other
            )),
        }
    }
}

pub struct DocumentProcessor;

impl DocumentProcessor {
    /// Extract the text of one file. Unsupported types yield an empty string.
    pub fn extract(filename: &str, content: &[u8]) -> Result<String, ExtractionError> {
        match DocumentKind::from_filename(filename) {
            DocumentKind::Pdf => Self::extract_pdf(content),
            DocumentKind::Text => Ok(std::str::from_utf8(content)?.to_string()),
            DocumentKind::Unsupported => {
                debug!(filename = %filename, "Unsupported file type, using empty body");
                Ok(String::new())
            }
        }
    }

    /// Concatenate page texts in page order, without separators.
    pub fn extract_pdf(content: &[u8]) -> Result<String, ExtractionError> {
        let doc = Document::load_mem(content)?;

        let mut text = String::new();
        // get_pages is keyed by page number, so iteration is in document order
        for page_number in doc.get_pages().keys() {
            text.push_str(&doc.extract_text(&[*page_number])?);
        }

        Ok(text)
    }

    /// Extract a file and apply the failure policy.
    pub fn process(
        file: &UploadedFile,
        policy: ExtractionFailurePolicy,
    ) -> AppResult<ExtractedDocument> {
        let text = match Self::extract(&file.filename, &file.content) {
            Ok(text) => text,
            Err(e) => match policy {
                ExtractionFailurePolicy::Contain => {
                    warn!(filename = %file.filename, error = %e, "Extraction failed, continuing with placeholder");
                    Self::failure_placeholder(&file.filename, &e)
                }
                ExtractionFailurePolicy::Propagate => {
                    return Err(AppError::Extraction {
                        filename: file.filename.clone(),
                        source: e,
                    });
                }
            },
        };

        debug!(filename = %file.filename, chars = text.len(), "Extracted document");

        Ok(ExtractedDocument {
            filename: file.filename.clone(),
            text,
        })
    }

    pub fn failure_placeholder(filename: &str, error: &ExtractionError) -> String {
        format!("[extraction failed for {}: {}]", filename, error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};

    /// Build an in-memory PDF with one page per entry in `pages`.
    fn build_pdf(pages: &[&str]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in pages {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![72.into(), 720.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).unwrap();
        buffer
    }

    fn upload(filename: &str, content: &[u8]) -> UploadedFile {
        UploadedFile {
            filename: filename.to_string(),
            content: Bytes::copy_from_slice(content),
        }
    }

    #[test]
    fn test_document_kind_from_filename() {
        assert_eq!(DocumentKind::from_filename("report.pdf"), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_filename("notes.txt"), DocumentKind::Text);
        assert_eq!(DocumentKind::from_filename("deck.docx"), DocumentKind::Unsupported);
        assert_eq!(DocumentKind::from_filename("pdf"), DocumentKind::Unsupported);
        assert_eq!(DocumentKind::from_filename(""), DocumentKind::Unsupported);
        // Suffix match is case-sensitive
        assert_eq!(DocumentKind::from_filename("SCAN.PDF"), DocumentKind::Unsupported);
    }

    #[test]
    fn test_extract_text_file() {
        let text = DocumentProcessor::extract("a.txt", "Taux d'intérêt stables".as_bytes()).unwrap();
        assert_eq!(text, "Taux d'intérêt stables");
    }

    #[test]
    fn test_extract_unsupported_is_empty() {
        let text = DocumentProcessor::extract("slides.pptx", b"\x00\x01binary").unwrap();
        assert_eq!(text, "");
    }

    #[test]
    fn test_extract_invalid_utf8() {
        let err = DocumentProcessor::extract("a.txt", &[0xff, 0xfe, 0x41]).unwrap_err();
        assert!(matches!(err, ExtractionError::Utf8(_)));
    }

    #[test]
    fn test_extract_pdf_concatenates_pages_in_order() {
        let pdf = build_pdf(&["First page", "Second page", "Third page"]);
        let text = DocumentProcessor::extract("q1.pdf", &pdf).unwrap();

        // lopdf closes each text object with a newline; nothing is added between pages
        assert_eq!(text, "First page\nSecond page\nThird page\n");
    }

    #[test]
    fn test_extract_pdf_single_page() {
        let pdf = build_pdf(&["Inflation eased to 3% in March."]);
        let text = DocumentProcessor::extract_pdf(&pdf).unwrap();
        assert_eq!(text, "Inflation eased to 3% in March.\n");
    }

    #[test]
    fn test_extract_corrupt_pdf() {
        let err = DocumentProcessor::extract("broken.pdf", b"%PDF-1.4 not really").unwrap_err();
        assert!(matches!(err, ExtractionError::Pdf(_)));
    }

    #[test]
    fn test_process_contains_failures() {
        for file in [upload("broken.pdf", b"garbage"), upload("bad.txt", &[0xc3, 0x28])] {
            let doc = DocumentProcessor::process(&file, ExtractionFailurePolicy::Contain).unwrap();

            assert_eq!(doc.filename, file.filename);
            assert!(doc
                .text
                .starts_with(&format!("[extraction failed for {}:", file.filename)));
        }
    }

    #[test]
    fn test_process_propagates_failures() {
        for file in [upload("broken.pdf", b"garbage"), upload("bad.txt", &[0xc3, 0x28])] {
            let err =
                DocumentProcessor::process(&file, ExtractionFailurePolicy::Propagate).unwrap_err();

            match err {
                AppError::Extraction { filename, .. } => assert_eq!(filename, file.filename),
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!(
            "Contain".parse::<ExtractionFailurePolicy>().unwrap(),
            ExtractionFailurePolicy::Contain
        );
        assert_eq!(
            " propagate ".parse::<ExtractionFailurePolicy>().unwrap(),
            ExtractionFailurePolicy::Propagate
        );
        assert!("skip".parse::<ExtractionFailurePolicy>().is_err());
    }
}
