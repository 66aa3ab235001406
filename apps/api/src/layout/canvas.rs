//! Recording surface the section renderers draw on.
//!
//! Wraps the cursor, the metric tables and the command list so renderers
//! speak in lines and fragments rather than raw coordinates.

use crate::layout::commands::{Color, DrawCommand, DrawOp, PageLayout, TextStyle};
use crate::layout::cursor::{LayoutCursor, PageGeometry};
use crate::layout::font_metrics::FontStyle;
use crate::layout::style::StyleConfig;
use crate::layout::wrap::{wrap, wrap_hanging};

pub struct Canvas {
    cursor: LayoutCursor,
    style: StyleConfig,
    commands: Vec<DrawCommand>,
}

impl Canvas {
    pub fn new(geometry: PageGeometry, style: StyleConfig) -> Self {
        Self {
            cursor: LayoutCursor::new(geometry),
            style,
            commands: Vec::new(),
        }
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn geometry(&self) -> &PageGeometry {
        self.cursor.geometry()
    }

    pub fn y(&self) -> f32 {
        self.cursor.y()
    }

    pub fn left(&self) -> f32 {
        self.geometry().margin_left
    }

    pub fn right(&self) -> f32 {
        self.geometry().content_right()
    }

    // ── Measurement ─────────────────────────────────────────────────────────

    pub fn measure(&self, text: &str, font_style: FontStyle, size_pt: f32) -> f32 {
        self.style.metrics(font_style).measure(text, size_pt)
    }

    pub fn wrap(&self, text: &str, max_width: f32, font_style: FontStyle) -> Vec<String> {
        wrap(text, max_width, self.style.metrics(font_style), self.style.body_size)
    }

    pub fn wrap_hanging(
        &self,
        text: &str,
        first_width: f32,
        rest_width: f32,
        font_style: FontStyle,
    ) -> Vec<String> {
        wrap_hanging(
            text,
            first_width,
            rest_width,
            self.style.metrics(font_style),
            self.style.body_size,
        )
    }

    // ── Cursor ──────────────────────────────────────────────────────────────

    /// Ends the current line: advance one line height, then break if past
    /// the bottom margin.
    pub fn next_line(&mut self) {
        self.cursor.advance(self.style.line_height);
        self.cursor.check_and_break();
    }

    /// Moves down without a break check. The next emitted line checks.
    pub fn advance(&mut self, delta: f32) {
        self.cursor.advance(delta);
    }

    pub fn advance_to(&mut self, y: f32) {
        self.cursor.advance_to(y);
    }

    // ── Emission ────────────────────────────────────────────────────────────

    fn push(&mut self, x: f32, y: f32, op: DrawOp) {
        self.commands.push(DrawCommand {
            page: self.cursor.page(),
            x,
            y,
            op,
        });
    }

    /// Draws `text` on the current baseline. Returns its width.
    pub fn text(
        &mut self,
        x: f32,
        text: &str,
        font_style: FontStyle,
        size_pt: f32,
        color: Color,
    ) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        let y = self.cursor.y();
        self.push(
            x,
            y,
            DrawOp::Text {
                text: text.to_string(),
                style: TextStyle {
                    font_style,
                    size_pt,
                    color,
                },
            },
        );
        self.measure(text, font_style, size_pt)
    }

    /// Body-size black text.
    pub fn body(&mut self, x: f32, text: &str, font_style: FontStyle) -> f32 {
        let size = self.style.body_size;
        self.text(x, text, font_style, size, Color::BLACK)
    }

    /// Body-size text whose right edge sits on the right margin.
    pub fn body_right(&mut self, text: &str, font_style: FontStyle) {
        let width = self.measure(text, font_style, self.style.body_size);
        let x = self.right() - width;
        self.body(x, text, font_style);
    }

    /// Horizontal rule `offset` below the current baseline.
    pub fn rule(&mut self, x: f32, width: f32, offset: f32, color: Color) {
        let y = self.cursor.y() + offset;
        let thickness = self.style.rule_thickness;
        self.push(
            x,
            y,
            DrawOp::Rule {
                width,
                thickness,
                color,
            },
        );
    }

    /// Link-coloured text, underlined to its exact width, with a clickable
    /// region when `url` is present. Returns the text width.
    pub fn link(&mut self, x: f32, text: &str, size_pt: f32, url: Option<&str>) -> f32 {
        let Some(url) = url else {
            return self.text(x, text, FontStyle::Normal, size_pt, Color::BLACK);
        };
        let width = self.text(x, text, FontStyle::Normal, size_pt, Color::LINK);
        let underline = self.style.underline_offset;
        self.rule(x, width, underline, Color::LINK);
        let top = self.cursor.y() - size_pt;
        self.push(
            x,
            top,
            DrawOp::Link {
                width,
                height: size_pt + underline,
                url: url.to_string(),
            },
        );
        width
    }

    /// Image whose top-left corner is at (`x`, `top`).
    pub fn image(&mut self, x: f32, top: f32, size: f32) {
        self.push(
            x,
            top,
            DrawOp::Image {
                width: size,
                height: size,
            },
        );
    }

    /// Consumes the canvas. Trailing pages with nothing drawn are not counted.
    pub fn finish(self) -> PageLayout {
        let page_count = self.commands.iter().map(|c| c.page + 1).max().unwrap_or(1);
        PageLayout {
            page_count,
            geometry: *self.cursor.geometry(),
            font_family: self.style.font_family,
            commands: self.commands,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::{EmbeddedMetrics, FontFamily, FontMetricTable};
    use std::sync::Arc;

    fn canvas() -> Canvas {
        Canvas::new(PageGeometry::a4(), StyleConfig::new(FontFamily::Helvetica))
    }

    #[test]
    fn test_empty_canvas_has_one_page() {
        let layout = canvas().finish();
        assert_eq!(layout.page_count, 1);
        assert!(layout.commands.is_empty());
    }

    #[test]
    fn test_break_without_content_adds_no_page() {
        let mut canvas = canvas();
        canvas.body(40.0, "only line", FontStyle::Normal);
        canvas.advance(2000.0);
        canvas.next_line();
        assert_eq!(canvas.finish().page_count, 1);
    }

    #[test]
    fn test_link_underline_matches_text_width() {
        let mut canvas = canvas();
        let width = canvas.link(40.0, "ada", 10.0, Some("https://github.com/ada"));
        let layout = canvas.finish();
        let rule = layout
            .commands
            .iter()
            .find_map(|c| match c.op {
                DrawOp::Rule { width, color, .. } => Some((width, color)),
                _ => None,
            })
            .unwrap();
        assert_eq!(rule, (width, Color::LINK));
        assert!(layout
            .commands
            .iter()
            .any(|c| matches!(&c.op, DrawOp::Link { url, .. } if url == "https://github.com/ada")));
    }

    #[test]
    fn test_link_without_target_is_plain_text() {
        let mut canvas = canvas();
        canvas.link(40.0, "ada on github", 10.0, None);
        let layout = canvas.finish();
        assert_eq!(layout.commands.len(), 1);
        assert!(matches!(
            &layout.commands[0].op,
            DrawOp::Text { style, .. } if style.color == Color::BLACK
        ));
    }

    #[test]
    fn test_embedded_metrics_drive_underline_and_right_alignment() {
        let wide = FontMetricTable::from_advances(|_| Some(1.0));
        let style = StyleConfig::new(FontFamily::NotoSans).with_embedded_metrics(Arc::new(
            EmbeddedMetrics {
                regular: wide.clone(),
                bold: wide,
            },
        ));
        let mut canvas = Canvas::new(PageGeometry::a4(), style);
        let width = canvas.link(40.0, "abcd", 10.0, Some("https://example.com"));
        assert!((width - 40.0).abs() < 1e-4, "got {width}");

        canvas.body_right("2020", FontStyle::Normal);
        let right = canvas.right();
        let layout = canvas.finish();
        let date = layout
            .commands
            .iter()
            .find(|c| matches!(&c.op, DrawOp::Text { text, .. } if text == "2020"))
            .unwrap();
        assert!((date.x - (right - 40.0)).abs() < 1e-3);
    }
}
