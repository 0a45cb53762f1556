//! Document handling
//!
//! Turns uploaded files into text the trend agent can read:
//! - `processor` - per-format text extraction (PDF via lopdf, plain text)
//! - `combine_documents` - builds the single prompt body sent to the model

pub mod processor;

pub use processor::*;

use crate::models::ExtractedDocument;

/// Separator line placed between documents in the combined content
pub const DOCUMENT_SEPARATOR: &str = "\n\n---\n\n";

/// Concatenate extracted documents into one prompt body, in upload order.
///
/// Each document is rendered as `Document: {filename}\n{text}`.
pub fn combine_documents(documents: &[ExtractedDocument]) -> String {
    documents
        .iter()
        .map(|doc| format!("Document: {}\n{}", doc.filename, doc.text))
        .collect::<Vec<_>>()
        .join(DOCUMENT_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(filename: &str, text: &str) -> ExtractedDocument {
        ExtractedDocument {
            filename: filename.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_single_document() {
        let combined = combine_documents(&[doc("a.txt", "Inflation eased to 3% in March.")]);
        assert_eq!(combined, "Document: a.txt\nInflation eased to 3% in March.");
    }

    #[test]
    fn test_documents_keep_upload_order() {
        let combined = combine_documents(&[
            doc("q1.txt", "Revenue up"),
            doc("q2.txt", "Margins down"),
            doc("q3.txt", "Guidance raised"),
        ]);

        assert_eq!(
            combined,
            "Document: q1.txt\nRevenue up\n\n---\n\n\
             Document: q2.txt\nMargins down\n\n---\n\n\
             Document: q3.txt\nGuidance raised"
        );
    }

    #[test]
    fn test_empty_body_keeps_header() {
        let combined = combine_documents(&[doc("notes.docx", ""), doc("b.txt", "Rates held")]);
        assert_eq!(combined, "Document: notes.docx\n\n\n---\n\nDocument: b.txt\nRates held");
    }

    #[test]
    fn test_no_documents() {
        assert_eq!(combine_documents(&[]), "");
    }
}
