//! Immutable draw commands produced by one layout pass.
//!
//! The assembler emits these in draw order; backends only execute them.

use serde::Serialize;

use crate::layout::cursor::PageGeometry;
use crate::layout::font_metrics::{FontFamily, FontStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    /// `#115bca`
    pub const LINK: Color = Color {
        r: 0x11,
        g: 0x5b,
        b: 0xca,
    };

    /// `RRGGBB`, as WordprocessingML expects it.
    pub fn to_hex(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Channels scaled to 0.0..=1.0.
    pub fn to_unit(self) -> (f32, f32, f32) {
        (
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextStyle {
    pub font_style: FontStyle,
    pub size_pt: f32,
    pub color: Color,
}

/// What to draw. Positions live on the enclosing [`DrawCommand`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    /// Text with its baseline at the command's `y`.
    Text { text: String, style: TextStyle },
    /// Horizontal line starting at `x`.
    Rule {
        width: f32,
        thickness: f32,
        color: Color,
    },
    /// Clickable region whose top-left corner is at (`x`, `y`).
    Link { width: f32, height: f32, url: String },
    /// Profile image whose top-left corner is at (`x`, `y`).
    Image { width: f32, height: f32 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawCommand {
    pub page: usize,
    pub x: f32,
    pub y: f32,
    #[serde(flatten)]
    pub op: DrawOp,
}

/// Finished, page-addressed output of the PDF layout pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLayout {
    pub page_count: usize,
    pub geometry: PageGeometry,
    pub font_family: FontFamily,
    pub commands: Vec<DrawCommand>,
}

impl PageLayout {
    pub fn commands_on(&self, page: usize) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(move |c| c.page == page)
    }

    /// `(page, y, text)` for every text command, in draw order.
    pub fn text_runs(&self) -> impl Iterator<Item = (usize, f32, &str)> {
        self.commands.iter().filter_map(|c| match &c.op {
            DrawOp::Text { text, .. } => Some((c.page, c.y, text.as_str())),
            _ => None,
        })
    }
}

#[cfg(test)]
impl PageLayout {
    pub fn contains_text(&self, needle: &str) -> bool {
        self.text_runs().any(|(_, _, text)| text.contains(needle))
    }
}
