// Output backends: PDF executor over the layout's draw commands, and a DOCX
// writer over the flowed paragraph stream.

pub mod docx;
pub mod fonts;
pub mod pdf;

pub use docx::render_docx;
pub use fonts::{FontStore, GlyphSubset};
pub use pdf::render_pdf;

use thiserror::Error;

use crate::layout::{flow_resume, layout_resume, FontFamily, PageLayout};
use crate::models::ResumeDocument;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Font could not be parsed: {0}")]
    Font(String),

    #[error("DOCX packaging failed: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Lays out `doc` with the metrics of whatever font `family` resolves to.
pub fn layout_document(doc: &ResumeDocument, fonts: &FontStore, family: FontFamily) -> PageLayout {
    let selection = fonts.select(family, &doc.language);
    layout_resume(doc, &selection.style())
}

/// Full PDF pipeline for one document: font selection, layout, execution.
pub fn render_document_pdf(
    doc: &ResumeDocument,
    fonts: &FontStore,
    family: FontFamily,
) -> Result<Vec<u8>, RenderError> {
    let selection = fonts.select(family, &doc.language);
    let layout = layout_resume(doc, &selection.style());
    render_pdf(&layout, selection, doc.profile_image.as_ref(), document_title(doc))
}

pub fn render_document_docx(doc: &ResumeDocument) -> Result<Vec<u8>, RenderError> {
    render_docx(&flow_resume(doc), document_title(doc))
}

fn document_title(doc: &ResumeDocument) -> &str {
    match doc.name.trim() {
        "" => "Resume",
        name => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_lays_out_with_builtin_metrics() {
        let doc = ResumeDocument {
            name: "Ada".to_string(),
            ..Default::default()
        };
        let layout = layout_document(&doc, &FontStore::empty(), FontFamily::NotoSans);
        assert_eq!(layout.font_family, FontFamily::Helvetica);
        assert_eq!(layout.page_count, 1);
    }

    #[test]
    fn test_render_document_pdf_without_embedded_fonts() {
        let doc = ResumeDocument {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            ..Default::default()
        };
        let pdf = render_document_pdf(&doc, &FontStore::empty(), FontFamily::NotoSans).unwrap();
        assert!(pdf.starts_with(b"%PDF"));
    }

    #[test]
    fn test_document_title_defaults() {
        assert_eq!(document_title(&ResumeDocument::default()), "Resume");
    }
}
