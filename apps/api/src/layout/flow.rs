//! Flowed paragraph stream for word-processor output.
//!
//! Same content decisions as the paginated pass (section gating, blank-entry
//! skipping, bullet levels) but no coordinates: the DOCX writer lets the word
//! processor do the line breaking.

use serde::Serialize;

use crate::bullets::{BulletLevel, Bullets};
use crate::layout::header::{contact_lines, display_name, CONTACT_SEPARATOR};
use crate::layout::sections::{dash_join, filled, visible_sections, SectionKind};
use crate::models::{looks_like_url, ResumeDocument};

/// A run of text with character formatting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Span {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    /// Hyperlink target; the span renders in link colour when set.
    pub link: Option<String>,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
            ..Default::default()
        }
    }

    pub fn italic(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            italic: true,
            ..Default::default()
        }
    }

    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: Some(url.into()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    /// Centred name.
    Title { text: String },
    /// Centred contact line.
    Contact { spans: Vec<Span> },
    Heading { text: String },
    /// Entry line; `trailing` sits on a right-aligned tab stop (dates).
    Line {
        spans: Vec<Span>,
        trailing: Option<String>,
    },
    Paragraph { text: String },
    ListItem { level: BulletLevel, text: String },
}

fn line(spans: Vec<Span>) -> Block {
    Block::Line {
        spans,
        trailing: None,
    }
}

fn dated(spans: Vec<Span>, date: &str) -> Block {
    let date = date.trim();
    Block::Line {
        spans,
        trailing: (!date.is_empty()).then(|| date.to_string()),
    }
}

/// Flattens the document into blocks in render order.
pub fn flow_resume(doc: &ResumeDocument) -> Vec<Block> {
    let mut blocks = vec![Block::Title {
        text: display_name(doc).to_string(),
    }];

    for fragments in contact_lines(doc) {
        let mut spans = Vec::with_capacity(fragments.len() * 2);
        for (i, fragment) in fragments.iter().enumerate() {
            if i > 0 {
                spans.push(Span::plain(CONTACT_SEPARATOR));
            }
            spans.push(match fragment.url {
                Some(url) => Span::link(fragment.text, url),
                None => Span::plain(fragment.text),
            });
        }
        blocks.push(Block::Contact { spans });
    }

    for kind in visible_sections(doc) {
        blocks.push(Block::Heading {
            text: kind.title().to_string(),
        });
        match kind {
            SectionKind::Summary => push_paragraphs(&mut blocks, &doc.summary),
            SectionKind::Skills => {
                for entry in filled(&doc.skills) {
                    let label = entry.skill.trim();
                    let description = entry.description.trim();
                    let mut spans = vec![Span::bold(label)];
                    if !description.is_empty() {
                        spans.push(Span::plain(if label.is_empty() {
                            description.to_string()
                        } else {
                            format!(", {description}")
                        }));
                    }
                    blocks.push(line(spans));
                }
            }
            SectionKind::Experience => {
                for entry in filled(&doc.experiences) {
                    if !entry.position.trim().is_empty() || !entry.dates.trim().is_empty() {
                        blocks.push(dated(vec![Span::bold(entry.position.trim())], &entry.dates));
                    }
                    let company = entry.company.trim().to_uppercase();
                    let location = entry.location.trim();
                    if !company.is_empty() || !location.is_empty() {
                        let mut spans = vec![Span::plain(company.as_str())];
                        if !company.is_empty() && !location.is_empty() {
                            spans.push(Span::plain(" - "));
                        }
                        spans.push(Span::italic(location));
                        blocks.push(line(spans));
                    }
                    push_bullets(&mut blocks, &entry.bullets);
                }
            }
            SectionKind::Projects => {
                for entry in filled(&doc.projects) {
                    let name = entry.project_name.trim();
                    if !name.is_empty() {
                        blocks.push(line(vec![Span::bold(name.to_uppercase())]));
                    }
                    let link = entry.project_link.trim();
                    if !link.is_empty() {
                        let span = if looks_like_url(link) {
                            Span::link(link, link)
                        } else {
                            Span::plain(link)
                        };
                        blocks.push(line(vec![span]));
                    }
                    push_bullets(&mut blocks, &entry.bullets);
                }
            }
            SectionKind::Education => {
                for entry in filled(&doc.educations) {
                    if !entry.university.trim().is_empty()
                        || !entry.graduation_date.trim().is_empty()
                    {
                        blocks.push(dated(
                            vec![Span::bold(entry.university.trim())],
                            &entry.graduation_date,
                        ));
                    }
                    let degree = dash_join(&entry.degree, &entry.gpa);
                    if !degree.is_empty() {
                        blocks.push(line(vec![Span::plain(degree)]));
                    }
                }
            }
            SectionKind::Certificates => {
                for entry in filled(&doc.certificates) {
                    if !entry.cert_name.trim().is_empty() || !entry.cert_date.trim().is_empty() {
                        let name = vec![Span::bold(entry.cert_name.trim())];
                        blocks.push(dated(name, &entry.cert_date));
                    }
                    push_paragraphs(&mut blocks, &entry.issuer_or_description);
                }
            }
        }
    }

    blocks
}

/// One paragraph per source line, blank lines included, so the breaks match
/// the paginated wrap.
fn push_paragraphs(blocks: &mut Vec<Block>, text: &str) {
    blocks.extend(text.trim().lines().map(|line| Block::Paragraph {
        text: line.split_whitespace().collect::<Vec<_>>().join(" "),
    }));
}

fn push_bullets(blocks: &mut Vec<Block>, bullets: &Bullets) {
    if bullets.has_description() {
        push_paragraphs(blocks, &bullets.description);
    }
    blocks.extend(bullets.render_items().map(|item| Block::ListItem {
        level: item.level,
        text: item.text.to_string(),
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bullets::parse_bullets;
    use crate::models::{ExperienceEntry, LinkField, SkillEntry};

    fn headings(blocks: &[Block]) -> Vec<&str> {
        blocks
            .iter()
            .filter_map(|b| match b {
                Block::Heading { text } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_minimal_document_is_header_only() {
        let doc = ResumeDocument {
            name: "Ada".to_string(),
            email: "a@x.com".to_string(),
            ..Default::default()
        };
        let blocks = flow_resume(&doc);
        assert_eq!(blocks.len(), 2);
        assert!(headings(&blocks).is_empty());
    }

    #[test]
    fn test_gated_section_is_absent_even_with_later_entries() {
        let mut doc = ResumeDocument::default();
        doc.skills.push(SkillEntry {
            skill: "Rust".to_string(),
            description: String::new(),
        });
        assert!(headings(&flow_resume(&doc)).is_empty());
    }

    fn paragraphs(blocks: &[Block]) -> Vec<&str> {
        blocks
            .iter()
            .filter_map(|b| match b {
                Block::Paragraph { text } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_multi_line_text_becomes_separate_paragraphs() {
        let mut doc = ResumeDocument {
            summary: "First paragraph.\nSecond paragraph.\n\nAfter a gap.".to_string(),
            ..Default::default()
        };
        doc.certificates[0].cert_name = "AWS".to_string();
        doc.certificates[0].issuer_or_description = "Amazon\nProfessional tier".to_string();

        let blocks = flow_resume(&doc);
        assert_eq!(
            paragraphs(&blocks),
            vec![
                "First paragraph.",
                "Second paragraph.",
                "",
                "After a gap.",
                "Amazon",
                "Professional tier",
            ]
        );
        assert!(paragraphs(&blocks).iter().all(|p| !p.contains('\n')));
    }

    #[test]
    fn test_bullet_levels_are_preserved() {
        let mut doc = ResumeDocument::default();
        doc.experiences[0] = ExperienceEntry {
            position: "Lead".to_string(),
            bullets: parse_bullets("# Led team\n- Shipped X\n+ Used Y"),
            ..Default::default()
        };
        let blocks = flow_resume(&doc);
        assert_eq!(headings(&blocks), vec!["Experience"]);
        assert!(blocks.contains(&Block::Paragraph {
            text: "Led team".to_string()
        }));
        assert!(blocks.contains(&Block::ListItem {
            level: BulletLevel::One,
            text: "Shipped X".to_string()
        }));
        assert!(blocks.contains(&Block::ListItem {
            level: BulletLevel::Two,
            text: "Used Y".to_string()
        }));
    }

    #[test]
    fn test_contact_link_span_targets_raw_url() {
        let mut doc = ResumeDocument::default();
        doc.links.github = LinkField::new("https://github.com/x", "");
        let blocks = flow_resume(&doc);
        assert_eq!(
            blocks[1],
            Block::Contact {
                spans: vec![Span::link("x", "https://github.com/x")]
            }
        );
    }

    #[test]
    fn test_dates_go_to_trailing_tab() {
        let mut doc = ResumeDocument::default();
        doc.educations[0].university = "MIT".to_string();
        doc.educations[0].graduation_date = "2019".to_string();
        let blocks = flow_resume(&doc);
        assert!(blocks.contains(&Block::Line {
            spans: vec![Span::bold("MIT")],
            trailing: Some("2019".to_string()),
        }));
    }
}
