//! Name and contact block at the top of the first page.
//!
//! With a profile image, the name and contact lines start to the right of the
//! image. Without one, every line is centred on the page.

use crate::layout::canvas::Canvas;
use crate::layout::commands::Color;
use crate::layout::font_metrics::FontStyle;
use crate::models::{LinkField, ResumeDocument};

pub const NAME_PLACEHOLDER: &str = "Your Name";
pub const CONTACT_SEPARATOR: &str = " • ";

/// One piece of a contact line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactFragment<'a> {
    pub text: &'a str,
    /// Hyperlink target when the fragment came from a URL-like link field.
    pub url: Option<&'a str>,
    /// True for link fields, which render in link colour when `url` is set.
    pub is_link: bool,
}

impl<'a> ContactFragment<'a> {
    fn plain(text: &'a str) -> Self {
        Self {
            text,
            url: None,
            is_link: false,
        }
    }

    fn link(field: &'a LinkField) -> Self {
        Self {
            text: field.display(),
            url: field.target(),
            is_link: true,
        }
    }
}

pub fn display_name(doc: &ResumeDocument) -> &str {
    let name = doc.name.trim();
    if name.is_empty() {
        NAME_PLACEHOLDER
    } else {
        name
    }
}

/// Contact lines in display order, empty fields and empty lines dropped.
///
/// Line 1: location, email, phone, LinkedIn. Line 2: GitHub, website.
pub fn contact_lines(doc: &ResumeDocument) -> Vec<Vec<ContactFragment<'_>>> {
    let mut first: Vec<ContactFragment<'_>> = [&doc.location, &doc.email, &doc.phone]
        .into_iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(ContactFragment::plain)
        .collect();
    if !doc.links.linkedin.is_empty() {
        first.push(ContactFragment::link(&doc.links.linkedin));
    }

    let second: Vec<ContactFragment<'_>> = [&doc.links.github, &doc.links.website]
        .into_iter()
        .filter(|l| !l.is_empty())
        .map(ContactFragment::link)
        .collect();

    [first, second]
        .into_iter()
        .filter(|line| !line.is_empty())
        .collect()
}

pub fn render_header(canvas: &mut Canvas, doc: &ResumeDocument) {
    let lines = contact_lines(doc);
    if doc.profile_image.is_some() {
        render_beside_image(canvas, doc, &lines);
    } else {
        render_centered(canvas, doc, &lines);
    }
}

fn render_beside_image(
    canvas: &mut Canvas,
    doc: &ResumeDocument,
    lines: &[Vec<ContactFragment<'_>>],
) {
    let style = canvas.style().clone();
    let image_top = canvas.y() - style.name_size;
    let image_x = canvas.left();
    canvas.image(image_x, image_top, style.image_size);

    let text_x = image_x + style.image_size + style.image_gap;
    canvas.text(
        text_x,
        display_name(doc),
        FontStyle::Bold,
        style.name_size,
        Color::BLACK,
    );
    canvas.advance(style.line_height + style.padding);

    for line in lines {
        let mut x = text_x;
        for (i, fragment) in line.iter().enumerate() {
            if i > 0 {
                x += canvas.body(x, CONTACT_SEPARATOR, FontStyle::Normal);
            }
            x += draw_fragment(canvas, x, fragment);
        }
        canvas.advance(style.line_height + style.padding);
    }

    // The body starts below whichever is lower: the text or the image.
    canvas.advance_to(image_top + style.image_size + style.padding + style.line_height);
}

fn render_centered(
    canvas: &mut Canvas,
    doc: &ResumeDocument,
    lines: &[Vec<ContactFragment<'_>>],
) {
    let style = canvas.style().clone();
    let mid = canvas.geometry().mid_x();

    let name = display_name(doc);
    let name_width = canvas.measure(name, FontStyle::Bold, style.name_size);
    canvas.text(
        mid - name_width / 2.0,
        name,
        FontStyle::Bold,
        style.name_size,
        Color::BLACK,
    );
    canvas.advance(style.line_height + style.padding);

    for line in lines {
        let full: String = line
            .iter()
            .map(|f| f.text)
            .collect::<Vec<_>>()
            .join(CONTACT_SEPARATOR);
        let full_width = canvas.measure(&full, FontStyle::Normal, style.body_size);
        let separator_width = canvas.measure(CONTACT_SEPARATOR, FontStyle::Normal, style.body_size);

        let mut consumed = 0.0_f32;
        for (i, fragment) in line.iter().enumerate() {
            let text_width = canvas.measure(fragment.text, FontStyle::Normal, style.body_size);
            if i > 0 {
                consumed += separator_width;
            }
            consumed += text_width;

            // Right-align this fragment against what is left of the line.
            let right_edge = mid - (full_width / 2.0 - consumed);
            let x = right_edge - text_width;
            if i > 0 {
                canvas.body(x - separator_width, CONTACT_SEPARATOR, FontStyle::Normal);
            }
            draw_fragment(canvas, x, fragment);
        }
        canvas.advance(style.line_height + style.padding);
    }

    canvas.advance(style.padding);
}

fn draw_fragment(canvas: &mut Canvas, x: f32, fragment: &ContactFragment<'_>) -> f32 {
    let size = canvas.style().body_size;
    if fragment.is_link {
        canvas.link(x, fragment.text, size, fragment.url)
    } else {
        canvas.body(x, fragment.text, FontStyle::Normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::commands::DrawOp;
    use crate::layout::cursor::PageGeometry;
    use crate::layout::font_metrics::{measure_width, FontFamily};
    use crate::layout::style::StyleConfig;
    use crate::models::{Links, ProfileImage};

    fn canvas() -> Canvas {
        Canvas::new(PageGeometry::a4(), StyleConfig::new(FontFamily::Helvetica))
    }

    fn doc() -> ResumeDocument {
        ResumeDocument {
            name: "Ada".to_string(),
            email: "a@x.com".to_string(),
            location: "London".to_string(),
            links: Links {
                github: LinkField::new("https://github.com/x", ""),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_contact_lines_skip_empty_fields() {
        let doc = doc();
        let lines = contact_lines(&doc);
        assert_eq!(lines.len(), 2);
        let texts: Vec<_> = lines[0].iter().map(|f| f.text).collect();
        assert_eq!(texts, vec!["London", "a@x.com"]);
        assert_eq!(lines[1][0].text, "x");
        assert_eq!(lines[1][0].url, Some("https://github.com/x"));
    }

    #[test]
    fn test_no_contacts_no_lines() {
        let doc = ResumeDocument {
            name: "Ada".to_string(),
            ..Default::default()
        };
        assert!(contact_lines(&doc).is_empty());
    }

    #[test]
    fn test_empty_name_uses_placeholder() {
        let mut canvas = canvas();
        render_header(&mut canvas, &ResumeDocument::default());
        assert!(canvas.finish().contains_text(NAME_PLACEHOLDER));
    }

    #[test]
    fn test_centered_line_is_symmetric() {
        let mut canvas = canvas();
        render_header(&mut canvas, &doc());
        let layout = canvas.finish();
        let size = 10.0;
        let family = FontFamily::Helvetica;

        let texts: Vec<_> = layout
            .commands
            .iter()
            .filter_map(|c| match &c.op {
                DrawOp::Text { text, style } if style.size_pt == size => {
                    Some((c.x, c.y, text.clone()))
                }
                _ => None,
            })
            .collect();
        let first_line_y = texts[0].1;
        let line: Vec<_> = texts.iter().filter(|t| t.1 == first_line_y).collect();
        // London, separator, email
        assert_eq!(line.len(), 3);
        let left = line[0].0;
        let last = line[2];
        let right = last.0 + measure_width(&last.2, family, FontStyle::Normal, size);
        let mid = PageGeometry::a4().mid_x();
        assert!(((left + right) / 2.0 - mid).abs() < 0.01);
    }

    #[test]
    fn test_github_link_underline_is_handle_width() {
        let mut canvas = canvas();
        render_header(&mut canvas, &doc());
        let layout = canvas.finish();
        let expected = measure_width("x", FontFamily::Helvetica, FontStyle::Normal, 10.0);

        let underline = layout
            .commands
            .iter()
            .find_map(|c| match c.op {
                DrawOp::Rule { width, color, .. } if color == Color::LINK => Some(width),
                _ => None,
            })
            .unwrap();
        assert!((underline - expected).abs() < 1e-4);

        let colored = layout.commands.iter().any(|c| {
            matches!(
                &c.op,
                DrawOp::Text { text, style } if text == "x" && style.color == Color::LINK
            )
        });
        assert!(colored);
    }

    #[test]
    fn test_placeholder_underline_uses_placeholder_width() {
        let mut doc = doc();
        doc.links.github.display_text = "My GitHub".to_string();
        let mut canvas = canvas();
        render_header(&mut canvas, &doc);
        let layout = canvas.finish();
        let expected = measure_width("My GitHub", FontFamily::Helvetica, FontStyle::Normal, 10.0);
        assert!(layout.commands.iter().any(|c| matches!(
            c.op,
            DrawOp::Rule { width, .. } if (width - expected).abs() < 1e-4
        )));
    }

    #[test]
    fn test_image_layout_is_left_aligned_beside_image() {
        let mut doc = doc();
        doc.profile_image = Some(ProfileImage {
            data: vec![1, 2, 3],
            mime_type: "image/png".to_string(),
        });
        let mut canvas = canvas();
        render_header(&mut canvas, &doc);
        let body_top = canvas.y();
        let layout = canvas.finish();

        assert!(matches!(layout.commands[0].op, DrawOp::Image { .. }));
        let name = layout
            .commands
            .iter()
            .find(|c| matches!(&c.op, DrawOp::Text { text, .. } if text == "Ada"))
            .unwrap();
        assert_eq!(name.x, 40.0 + 72.0 + 15.0);
        // Body never starts over the image.
        assert!(body_top >= layout.commands[0].y + 72.0);
    }
}
