//! DOCX writer: serialises a `Block` stream as a WordprocessingML package.
//!
//! Only what the résumé needs: paragraph styles for title/heading/body,
//! a right-aligned tab for dates, external hyperlinks and a two-level
//! bullet numbering definition.

use std::borrow::Cow;
use std::io::{Cursor, Write};

use tracing::{info, instrument};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::bullets::BulletLevel;
use crate::layout::{Block, Color, Span};
use crate::render::RenderError;

/// Text column width in twentieths of a point (A4, 40pt margins).
const RIGHT_TAB_TWIPS: u32 = 10_305;
const MARGIN_TWIPS: u32 = 800;
const BULLET_NUM_ID: u32 = 1;

fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

// ────────────────────────────────────────────────────────────────────────────
// document.xml
// ────────────────────────────────────────────────────────────────────────────

/// Builds `word/document.xml` and collects hyperlink relationships.
struct DocumentBody {
    xml: String,
    /// External targets; relationship ids are `rIdLink{index + 1}`.
    links: Vec<String>,
}

impl DocumentBody {
    fn new() -> Self {
        Self {
            xml: String::new(),
            links: Vec::new(),
        }
    }

    fn link_id(&mut self, url: &str) -> String {
        let index = match self.links.iter().position(|u| u == url) {
            Some(index) => index,
            None => {
                self.links.push(url.to_string());
                self.links.len() - 1
            }
        };
        format!("rIdLink{}", index + 1)
    }

    fn run(&mut self, span: &Span) {
        if span.text.is_empty() {
            return;
        }
        let mut props = String::new();
        if span.bold {
            props.push_str("<w:b/>");
        }
        if span.italic {
            props.push_str("<w:i/>");
        }
        if span.link.is_some() {
            props.push_str(&format!(
                r#"<w:color w:val="{}"/><w:u w:val="single"/>"#,
                Color::LINK.to_hex()
            ));
        }
        let run = format!(
            r#"<w:r><w:rPr>{props}</w:rPr><w:t xml:space="preserve">{}</w:t></w:r>"#,
            escape(&span.text)
        );
        match &span.link {
            Some(url) => {
                let id = self.link_id(url);
                self.xml
                    .push_str(&format!(r#"<w:hyperlink r:id="{id}">{run}</w:hyperlink>"#));
            }
            None => self.xml.push_str(&run),
        }
    }

    fn paragraph(&mut self, props: &str, spans: &[Span]) {
        self.xml.push_str(&format!("<w:p><w:pPr>{props}</w:pPr>"));
        for span in spans {
            self.run(span);
        }
        self.xml.push_str("</w:p>");
    }

    fn block(&mut self, block: &Block) {
        match block {
            Block::Title { text } => {
                self.paragraph(r#"<w:pStyle w:val="Title"/>"#, &[Span::bold(text.as_str())])
            }
            Block::Contact { spans } => self.paragraph(r#"<w:jc w:val="center"/>"#, spans),
            Block::Heading { text } => self.paragraph(
                r#"<w:pStyle w:val="Heading1"/>"#,
                &[Span::bold(text.as_str())],
            ),
            Block::Line { spans, trailing } => {
                let props = format!(
                    r#"<w:tabs><w:tab w:val="right" w:pos="{RIGHT_TAB_TWIPS}"/></w:tabs>"#
                );
                self.xml.push_str(&format!("<w:p><w:pPr>{props}</w:pPr>"));
                for span in spans {
                    self.run(span);
                }
                if let Some(trailing) = trailing {
                    self.xml.push_str(&format!(
                        r#"<w:r><w:tab/><w:t xml:space="preserve">{}</w:t></w:r>"#,
                        escape(trailing)
                    ));
                }
                self.xml.push_str("</w:p>");
            }
            Block::Paragraph { text } => self.paragraph("", &[Span::plain(text.as_str())]),
            Block::ListItem { level, text } => {
                let ilvl = match level {
                    BulletLevel::One => 0,
                    BulletLevel::Two => 1,
                };
                let props = format!(
                    r#"<w:pStyle w:val="ListParagraph"/><w:numPr><w:ilvl w:val="{ilvl}"/><w:numId w:val="{BULLET_NUM_ID}"/></w:numPr>"#
                );
                self.paragraph(&props, &[Span::plain(text.as_str())]);
            }
        }
    }

    fn finish(self) -> (String, Vec<String>) {
        let xml = format!(
            concat!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
                r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" "#,
                r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
                "<w:body>{body}",
                r#"<w:sectPr><w:pgSz w:w="11906" w:h="16838"/>"#,
                r#"<w:pgMar w:top="{m}" w:right="{m}" w:bottom="{m}" w:left="{m}" w:header="0" w:footer="0" w:gutter="0"/>"#,
                "</w:sectPr></w:body></w:document>"
            ),
            body = self.xml,
            m = MARGIN_TWIPS,
        );
        (xml, self.links)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static parts
// ────────────────────────────────────────────────────────────────────────────

const CONTENT_TYPES: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
    r#"<Default Extension="xml" ContentType="application/xml"/>"#,
    r#"<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>"#,
    r#"<Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>"#,
    r#"<Override PartName="/word/numbering.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml"/>"#,
    r#"<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>"#,
    "</Types>"
);

const PACKAGE_RELS: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>"#,
    r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>"#,
    "</Relationships>"
);

// Sizes are half-points: body 10pt, heading 14pt, title 16pt.
const STYLES: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
    r#"<w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="Noto Sans" w:hAnsi="Noto Sans" w:eastAsia="Noto Sans CJK JP" w:cs="Noto Sans"/>"#,
    r#"<w:sz w:val="20"/></w:rPr></w:rPrDefault>"#,
    r#"<w:pPrDefault><w:pPr><w:spacing w:after="40" w:line="320" w:lineRule="exact"/></w:pPr></w:pPrDefault></w:docDefaults>"#,
    r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/></w:style>"#,
    r#"<w:style w:type="paragraph" w:styleId="Title"><w:name w:val="Title"/><w:basedOn w:val="Normal"/>"#,
    r#"<w:pPr><w:jc w:val="center"/></w:pPr><w:rPr><w:b/><w:sz w:val="32"/></w:rPr></w:style>"#,
    r#"<w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/><w:basedOn w:val="Normal"/>"#,
    r#"<w:pPr><w:keepNext/><w:spacing w:before="200" w:after="100"/><w:pBdr><w:bottom w:val="single" w:sz="6" w:space="1" w:color="000000"/></w:pBdr><w:outlineLvl w:val="0"/></w:pPr>"#,
    r#"<w:rPr><w:b/><w:sz w:val="28"/></w:rPr></w:style>"#,
    r#"<w:style w:type="paragraph" w:styleId="ListParagraph"><w:name w:val="List Paragraph"/><w:basedOn w:val="Normal"/></w:style>"#,
    "</w:styles>"
);

// Level 0 at 10pt, level 1 at 20pt; text hangs 12pt after the marker.
const NUMBERING: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<w:numbering xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
    r#"<w:abstractNum w:abstractNumId="0"><w:multiLevelType w:val="hybridMultilevel"/>"#,
    r#"<w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="bullet"/><w:lvlText w:val="•"/><w:lvlJc w:val="left"/>"#,
    r#"<w:pPr><w:ind w:left="440" w:hanging="240"/></w:pPr></w:lvl>"#,
    r#"<w:lvl w:ilvl="1"><w:start w:val="1"/><w:numFmt w:val="bullet"/><w:lvlText w:val="◦"/><w:lvlJc w:val="left"/>"#,
    r#"<w:pPr><w:ind w:left="640" w:hanging="240"/></w:pPr></w:lvl>"#,
    "</w:abstractNum>",
    r#"<w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num>"#,
    "</w:numbering>"
);

fn document_rels(links: &[String]) -> String {
    let mut xml = String::from(concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        r#"<Relationship Id="rIdStyles" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#,
        r#"<Relationship Id="rIdNumbering" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering" Target="numbering.xml"/>"#,
    ));
    for (i, url) in links.iter().enumerate() {
        xml.push_str(&format!(
            r#"<Relationship Id="rIdLink{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink" Target="{}" TargetMode="External"/>"#,
            i + 1,
            escape(url)
        ));
    }
    xml.push_str("</Relationships>");
    xml
}

fn core_properties(title: &str) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
            r#"xmlns:dc="http://purl.org/dc/elements/1.1/">"#,
            "<dc:title>{}</dc:title></cp:coreProperties>"
        ),
        escape(title)
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Package
// ────────────────────────────────────────────────────────────────────────────

/// Writes `blocks` as a `.docx` package.
#[instrument(skip_all, fields(blocks = blocks.len()))]
pub fn render_docx(blocks: &[Block], title: &str) -> Result<Vec<u8>, RenderError> {
    let mut body = DocumentBody::new();
    for block in blocks {
        body.block(block);
    }
    let (document, links) = body.finish();

    let parts: [(&str, Cow<'_, str>); 7] = [
        ("[Content_Types].xml", Cow::Borrowed(CONTENT_TYPES)),
        ("_rels/.rels", Cow::Borrowed(PACKAGE_RELS)),
        ("docProps/core.xml", Cow::Owned(core_properties(title))),
        ("word/document.xml", Cow::Owned(document)),
        ("word/_rels/document.xml.rels", Cow::Owned(document_rels(&links))),
        ("word/styles.xml", Cow::Borrowed(STYLES)),
        ("word/numbering.xml", Cow::Borrowed(NUMBERING)),
    ];

    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in &parts {
        zip.start_file(*name, options)?;
        zip.write_all(content.as_bytes())?;
    }
    let output = zip.finish()?.into_inner();

    info!(bytes = output.len(), links = links.len(), "DOCX rendered");
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::ZipArchive;

    fn part(bytes: &[u8], name: &str) -> String {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        content
    }

    fn sample_blocks() -> Vec<Block> {
        vec![
            Block::Title {
                text: "Ada & Co".to_string(),
            },
            Block::Contact {
                spans: vec![
                    Span::plain("London"),
                    Span::plain(" • "),
                    Span::link("x", "https://github.com/x"),
                ],
            },
            Block::Heading {
                text: "Experience".to_string(),
            },
            Block::Line {
                spans: vec![Span::bold("Engineer")],
                trailing: Some("2020 - 2024".to_string()),
            },
            Block::ListItem {
                level: BulletLevel::One,
                text: "Shipped <X>".to_string(),
            },
            Block::ListItem {
                level: BulletLevel::Two,
                text: "Used Y".to_string(),
            },
        ]
    }

    #[test]
    fn test_package_contains_all_parts() {
        let bytes = render_docx(&sample_blocks(), "cv").unwrap();
        let archive = ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let names: Vec<_> = archive.file_names().collect();
        for expected in [
            "[Content_Types].xml",
            "_rels/.rels",
            "word/document.xml",
            "word/_rels/document.xml.rels",
            "word/styles.xml",
            "word/numbering.xml",
        ] {
            assert!(names.contains(&expected), "missing {expected}");
        }
    }

    #[test]
    fn test_text_is_escaped() {
        let bytes = render_docx(&sample_blocks(), "cv").unwrap();
        let document = part(&bytes, "word/document.xml");
        assert!(document.contains("Ada &amp; Co"));
        assert!(document.contains("Shipped &lt;X&gt;"));
    }

    #[test]
    fn test_list_levels_map_to_numbering_levels() {
        let bytes = render_docx(&sample_blocks(), "cv").unwrap();
        let document = part(&bytes, "word/document.xml");
        assert!(document.contains(r#"<w:ilvl w:val="0"/>"#));
        assert!(document.contains(r#"<w:ilvl w:val="1"/>"#));
    }

    #[test]
    fn test_hyperlink_relationship_is_external() {
        let bytes = render_docx(&sample_blocks(), "cv").unwrap();
        let document = part(&bytes, "word/document.xml");
        assert!(document.contains(r#"<w:hyperlink r:id="rIdLink1">"#));
        let rels = part(&bytes, "word/_rels/document.xml.rels");
        assert!(rels.contains(r#"Target="https://github.com/x" TargetMode="External""#));
    }

    #[test]
    fn test_trailing_dates_use_tab() {
        let bytes = render_docx(&sample_blocks(), "cv").unwrap();
        let document = part(&bytes, "word/document.xml");
        assert!(document.contains("<w:tab/><w:t xml:space=\"preserve\">2020 - 2024</w:t>"));
    }

    #[test]
    fn test_summary_lines_become_separate_paragraphs() {
        let doc = crate::models::ResumeDocument {
            name: "Ada".to_string(),
            summary: "First paragraph.\nSecond paragraph.".to_string(),
            ..Default::default()
        };
        let bytes = render_docx(&crate::layout::flow_resume(&doc), "cv").unwrap();
        let document = part(&bytes, "word/document.xml");
        assert!(document.contains(r#"<w:t xml:space="preserve">First paragraph.</w:t>"#));
        assert!(document.contains(r#"<w:t xml:space="preserve">Second paragraph.</w:t>"#));
        assert!(!document.contains("First paragraph.\n"));
    }

    #[test]
    fn test_repeated_url_shares_relationship() {
        let mut body = DocumentBody::new();
        assert_eq!(body.link_id("https://a.dev"), "rIdLink1");
        assert_eq!(body.link_id("https://b.dev"), "rIdLink2");
        assert_eq!(body.link_id("https://a.dev"), "rIdLink1");
    }
}
