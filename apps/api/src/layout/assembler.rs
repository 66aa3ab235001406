//! Paginated layout pass: header, then each visible section in fixed order.

use tracing::{debug, instrument};

use crate::layout::canvas::Canvas;
use crate::layout::commands::PageLayout;
use crate::layout::cursor::PageGeometry;
use crate::layout::header::render_header;
use crate::layout::sections::{render_section, visible_sections};
use crate::layout::style::StyleConfig;
use crate::models::ResumeDocument;

/// Lays out the résumé onto A4 pages.
///
/// Pure: the document is only read, and every call starts from a fresh
/// cursor at the top of page one.
#[instrument(skip_all, fields(family = ?style.font_family))]
pub fn layout_resume(doc: &ResumeDocument, style: &StyleConfig) -> PageLayout {
    layout_resume_on(doc, style, PageGeometry::a4())
}

pub fn layout_resume_on(
    doc: &ResumeDocument,
    style: &StyleConfig,
    geometry: PageGeometry,
) -> PageLayout {
    let mut canvas = Canvas::new(geometry, style.clone());
    render_header(&mut canvas, doc);

    for kind in visible_sections(doc) {
        render_section(&mut canvas, doc, kind);
    }

    let layout = canvas.finish();
    debug!(
        pages = layout.page_count,
        commands = layout.commands.len(),
        text_runs = layout.text_runs().count(),
        "Résumé laid out"
    );
    layout
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bullets::parse_bullets;
    use crate::layout::commands::{DrawCommand, DrawOp};
    use crate::layout::font_metrics::{measure_width, FontFamily, FontStyle};
    use crate::models::{ExperienceEntry, LinkField, SkillEntry};

    fn is_text(command: &DrawCommand, pred: impl Fn(&str) -> bool) -> bool {
        matches!(&command.op, DrawOp::Text { text, .. } if pred(text.as_str()))
    }

    fn style() -> StyleConfig {
        StyleConfig::new(FontFamily::Helvetica)
    }

    fn minimal() -> ResumeDocument {
        ResumeDocument {
            name: "Ada".to_string(),
            email: "a@x.com".to_string(),
            ..Default::default()
        }
    }

    fn heading_texts(layout: &PageLayout) -> Vec<String> {
        layout
            .commands
            .iter()
            .filter_map(|c| match &c.op {
                DrawOp::Text { text, style } if style.size_pt == 14.0 => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_minimal_document_renders_header_only() {
        let layout = layout_resume(&minimal(), &style());
        assert_eq!(layout.page_count, 1);
        assert!(heading_texts(&layout).is_empty());
        let texts: Vec<_> = layout.text_runs().map(|(_, _, t)| t).collect();
        assert_eq!(texts, vec!["Ada", "a@x.com"]);
    }

    #[test]
    fn test_sections_render_in_fixed_order() {
        let mut doc = minimal();
        doc.certificates[0].cert_name = "CKA".to_string();
        doc.skills[0] = SkillEntry {
            skill: "Rust".to_string(),
            description: "tokio, axum".to_string(),
        };
        doc.summary = "Backend engineer.".to_string();
        doc.educations[0].university = "ETH".to_string();

        let layout = layout_resume(&doc, &style());
        assert_eq!(
            heading_texts(&layout),
            vec!["Summary", "Skills", "Education", "Certificates"]
        );
    }

    #[test]
    fn test_layout_is_deterministic() {
        let mut doc = minimal();
        doc.summary = "Builds resilient services. ".repeat(30);
        doc.experiences[0].bullets = parse_bullets("# Platform\n- one\n+ two\n- three");
        doc.experiences[0].position = "SRE".to_string();

        let first: Vec<_> = layout_resume(&doc, &style())
            .text_runs()
            .map(|(p, y, t)| (p, y, t.to_string()))
            .collect();
        let second: Vec<_> = layout_resume(&doc, &style())
            .text_runs()
            .map(|(p, y, t)| (p, y, t.to_string()))
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_layout_does_not_touch_document() {
        let mut doc = minimal();
        doc.experiences[0].bullets = parse_bullets("- a\n+ b");
        let before = doc.clone();
        let _ = layout_resume(&doc, &style());
        assert_eq!(doc, before);
    }

    #[test]
    fn test_long_bullet_breaks_mid_item() {
        let geometry = PageGeometry::a4();
        let mut doc = minimal();
        // Enough preceding bullets to push the long one near the bottom.
        let mut text = String::from("- filler\n").repeat(40);
        text.push_str(&format!("- {}", "continuation ".repeat(80)));
        doc.experiences[0] = ExperienceEntry {
            position: "Engineer".to_string(),
            bullets: parse_bullets(&text),
            ..Default::default()
        };

        let layout = layout_resume(&doc, &style());
        assert_eq!(layout.page_count, 2);

        let long_lines: Vec<_> = layout
            .commands
            .iter()
            .filter(|c| is_text(c, |t| t.starts_with("continuation")))
            .collect();
        assert!(long_lines.iter().any(|c| c.page == 0));

        let first_on_next = layout.commands_on(1).next().unwrap();
        assert_eq!(first_on_next.y, geometry.margin_top);
        assert_eq!(first_on_next.x, geometry.margin_left + 12.0);
        assert!(is_text(first_on_next, |t| t.starts_with("continuation")));

        // One marker per item: 40 fillers plus the long bullet.
        let markers = layout
            .commands
            .iter()
            .filter(|c| is_text(c, |t| t == "•"))
            .count();
        assert_eq!(markers, 41);
        assert!(layout.commands_on(1).all(|c| !is_text(c, |t| t == "•")));
    }

    #[test]
    fn test_github_link_rendered_with_handle_width() {
        let mut doc = minimal();
        doc.links.github = LinkField::new("https://github.com/x", "");
        let layout = layout_resume(&doc, &style());
        let expected = measure_width("x", FontFamily::Helvetica, FontStyle::Normal, 10.0);
        let link = layout
            .commands
            .iter()
            .find_map(|c| match &c.op {
                DrawOp::Link { width, url, .. } => Some((*width, url.clone())),
                _ => None,
            })
            .unwrap();
        assert_eq!(link.1, "https://github.com/x");
        assert!((link.0 - expected).abs() < 1e-4);
    }

    #[test]
    fn test_heading_stays_with_first_line() {
        let mut doc = minimal();
        doc.summary = "Summary text.".to_string();
        let layout = layout_resume(&doc, &style());
        let heading = layout
            .commands
            .iter()
            .find(|c| matches!(&c.op, DrawOp::Text { text, .. } if text == "Summary"))
            .unwrap();
        let body = layout
            .commands
            .iter()
            .find(|c| matches!(&c.op, DrawOp::Text { text, .. } if text == "Summary text."))
            .unwrap();
        assert_eq!(heading.page, body.page);
        assert!(body.y > heading.y);
    }
}
