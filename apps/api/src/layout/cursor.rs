//! Page geometry and the vertical layout cursor.
//!
//! Coordinates are in points with the origin at the top-left corner of the
//! page and `y` growing downwards. The PDF backend flips them at draw time.

use serde::Serialize;

/// Fixed page size and margins, in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageGeometry {
    pub page_width: f32,
    pub page_height: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
}

impl PageGeometry {
    /// A4 portrait with 40pt margins on every edge.
    pub fn a4() -> Self {
        Self {
            page_width: 595.28,
            page_height: 841.89,
            margin_left: 40.0,
            margin_right: 40.0,
            margin_top: 40.0,
            margin_bottom: 40.0,
        }
    }

    /// Right edge of the text column.
    pub fn content_right(&self) -> f32 {
        self.page_width - self.margin_right
    }

    pub fn content_width(&self) -> f32 {
        self.content_right() - self.margin_left
    }

    pub fn mid_x(&self) -> f32 {
        self.page_width / 2.0
    }

    /// Once the cursor passes this line, the next page begins.
    pub fn bottom_limit(&self) -> f32 {
        self.page_height - self.margin_bottom
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}

/// Vertical position plus page index for one layout pass.
///
/// Breaks are reactive: content is drawn at the current `y`, the cursor is
/// advanced, and only then is the bottom margin checked.
#[derive(Debug, Clone)]
pub struct LayoutCursor {
    geometry: PageGeometry,
    y: f32,
    page: usize,
}

impl LayoutCursor {
    /// A fresh cursor at the top of the first page.
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            y: geometry.margin_top,
            page: 0,
        }
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn advance(&mut self, delta_pt: f32) {
        self.y += delta_pt;
    }

    /// Moves the cursor down to `y` if it is above it. Never moves up.
    pub fn advance_to(&mut self, y: f32) {
        if y > self.y {
            self.y = y;
        }
    }

    /// Starts a new page when the cursor is past the bottom margin.
    /// Returns whether a break happened.
    pub fn check_and_break(&mut self) -> bool {
        if self.y > self.geometry.bottom_limit() {
            self.page += 1;
            self.y = self.geometry.margin_top;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_starts_at_top_margin() {
        let cursor = LayoutCursor::new(PageGeometry::a4());
        assert_eq!(cursor.page(), 0);
        assert_eq!(cursor.y(), 40.0);
    }

    #[test]
    fn test_no_break_exactly_at_bottom_limit() {
        let geometry = PageGeometry {
            page_height: 800.0,
            ..PageGeometry::a4()
        };
        let mut cursor = LayoutCursor::new(geometry);
        cursor.advance(720.0);
        assert_eq!(cursor.y(), geometry.bottom_limit());
        assert!(!cursor.check_and_break());
        assert_eq!(cursor.page(), 0);
    }

    #[test]
    fn test_break_past_bottom_resets_to_top() {
        let geometry = PageGeometry::a4();
        let mut cursor = LayoutCursor::new(geometry);
        cursor.advance(geometry.page_height);
        assert!(cursor.check_and_break());
        assert_eq!(cursor.page(), 1);
        assert_eq!(cursor.y(), geometry.margin_top);
    }

    #[test]
    fn test_advance_to_never_moves_up() {
        let mut cursor = LayoutCursor::new(PageGeometry::a4());
        cursor.advance(100.0);
        cursor.advance_to(50.0);
        assert_eq!(cursor.y(), 140.0);
        cursor.advance_to(200.0);
        assert_eq!(cursor.y(), 200.0);
    }

    #[test]
    fn test_content_width() {
        let geometry = PageGeometry::a4();
        assert!((geometry.content_width() - 515.28).abs() < 1e-3);
        assert!((geometry.mid_x() - 297.64).abs() < 1e-3);
    }
}
