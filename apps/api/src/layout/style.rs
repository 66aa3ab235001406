//! Typographic constants shared by the section renderers.

use std::sync::Arc;

use crate::layout::font_metrics::{
    get_metrics, EmbeddedMetrics, FontFamily, FontMetricTable, FontStyle,
};

#[derive(Debug, Clone, PartialEq)]
pub struct StyleConfig {
    pub font_family: FontFamily,
    /// Widths measured from the embedded pair; the static tables otherwise.
    pub embedded_metrics: Option<Arc<EmbeddedMetrics>>,
    pub line_height: f32,
    /// Gap after a section heading and after each section body.
    pub padding: f32,
    pub name_size: f32,
    pub heading_size: f32,
    pub body_size: f32,
    /// Heading underline sits this far below the heading baseline.
    pub heading_rule_offset: f32,
    pub rule_thickness: f32,
    /// Horizontal distance from a bullet marker to its text.
    pub marker_gap: f32,
    /// Extra level-1 indent when the entry has a description line.
    pub described_indent: f32,
    pub nested_indent: f32,
    pub image_size: f32,
    pub image_gap: f32,
    /// Link underline sits this far below the baseline.
    pub underline_offset: f32,
}

impl StyleConfig {
    pub fn new(font_family: FontFamily) -> Self {
        Self {
            font_family,
            embedded_metrics: None,
            line_height: 16.0,
            padding: 5.0,
            name_size: 16.0,
            heading_size: 14.0,
            body_size: 10.0,
            heading_rule_offset: 5.0,
            rule_thickness: 0.75,
            marker_gap: 12.0,
            described_indent: 10.0,
            nested_indent: 20.0,
            image_size: 72.0,
            image_gap: 15.0,
            underline_offset: 1.5,
        }
    }

    pub fn with_embedded_metrics(mut self, metrics: Arc<EmbeddedMetrics>) -> Self {
        self.embedded_metrics = Some(metrics);
        self
    }

    /// The width table text in `style` is measured with.
    pub fn metrics(&self, style: FontStyle) -> &FontMetricTable {
        match &self.embedded_metrics {
            Some(embedded) => embedded.table(style),
            None => get_metrics(self.font_family, style),
        }
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self::new(FontFamily::NotoSans)
    }
}
