//! Font-metric tables for the résumé font families.
//!
//! Character widths are in em units (relative to font size). The built-in
//! families use static tables from the standard Helvetica / Helvetica-Bold /
//! Courier AFM files. Embedded NotoSans pairs are measured from their own
//! advances when the fonts are loaded (`EmbeddedMetrics`); the sans tables
//! only stand in when no pair is loaded.
//!
//! All tables cover ASCII 0x20..=0x7E (95 printable characters).
//! Index = (char as usize) - 32.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Font family / style
// ────────────────────────────────────────────────────────────────────────────

/// Font families the PDF backend can draw with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontFamily {
    /// Embedded NotoSans glyph subsets, chosen per document language.
    NotoSans,
    /// Built-in PDF base font; nothing is embedded.
    Helvetica,
    /// Built-in monospaced base font; nothing is embedded.
    Courier,
}

impl FontFamily {
    /// Parses a configured family name. System font names map onto the
    /// matching built-in family.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().replace([' ', '-', '_'], "").as_str() {
            "notosans" | "noto" => Some(FontFamily::NotoSans),
            "helvetica" | "arial" | "sansserif" | "sans" => Some(FontFamily::Helvetica),
            "courier" | "couriernew" | "monospace" | "mono" => Some(FontFamily::Courier),
            _ => None,
        }
    }

    /// Whether this family ships glyph subsets inside the PDF.
    pub fn is_embedded(self) -> bool {
        matches!(self, FontFamily::NotoSans)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontStyle {
    Normal,
    Bold,
    Italic,
    BoldItalic,
}

impl FontStyle {
    pub fn is_bold(self) -> bool {
        matches!(self, FontStyle::Bold | FontStyle::BoldItalic)
    }

    pub fn is_italic(self) -> bool {
        matches!(self, FontStyle::Italic | FontStyle::BoldItalic)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for one weight of a font family.
///
/// `widths[i]` = width of ASCII character `(i + 32)` in em units.
///
/// Width array slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FontMetricTable {
    widths: [f32; 95],
    /// Fallback width for non-ASCII characters that are not East-Asian wide.
    pub average_char_width: f32,
    pub space_width: f32,
    /// Width of the bullet markers `•` and `◦`.
    pub marker_width: f32,
}

impl FontMetricTable {
    /// Width of a single character in em units.
    pub fn char_width(&self, c: char) -> f32 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            self.widths[code - 32]
        } else if c == '•' || c == '◦' {
            self.marker_width
        } else if is_wide(c) {
            WIDE_CHAR_WIDTH
        } else if c.is_whitespace() {
            self.space_width
        } else {
            self.average_char_width
        }
    }

    /// Measures the rendered width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| self.char_width(c)).sum()
    }

    /// Width of `text` in points at `font_size_pt`.
    pub fn measure(&self, text: &str, font_size_pt: f32) -> f32 {
        self.measure_str(text) * font_size_pt
    }

    /// Builds a table from per-character advances in em units.
    ///
    /// Characters the font has no glyph for take the mean of the printable
    /// ASCII advances it does have.
    pub fn from_advances(advance: impl Fn(char) -> Option<f32>) -> Self {
        let found: Vec<Option<f32>> = (32u8..=126).map(|b| advance(b as char)).collect();
        let (total, count) = found
            .iter()
            .flatten()
            .fold((0.0_f32, 0u32), |(total, count), w| (total + w, count + 1));
        let average_char_width = if count > 0 {
            total / count as f32
        } else {
            DEFAULT_AVERAGE_WIDTH
        };

        let mut widths = [average_char_width; 95];
        for (slot, width) in widths.iter_mut().zip(&found) {
            if let Some(width) = width {
                *slot = *width;
            }
        }
        Self {
            widths,
            average_char_width,
            space_width: widths[0],
            marker_width: advance('•').unwrap_or(average_char_width),
        }
    }
}

const DEFAULT_AVERAGE_WIDTH: f32 = 0.5;

/// Regular and bold tables measured from one embedded font pair.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedMetrics {
    pub regular: FontMetricTable,
    pub bold: FontMetricTable,
}

impl EmbeddedMetrics {
    /// Italic measures as its upright counterpart.
    pub fn table(&self, style: FontStyle) -> &FontMetricTable {
        if style.is_bold() {
            &self.bold
        } else {
            &self.regular
        }
    }
}

/// Full-width East-Asian glyphs occupy one em.
const WIDE_CHAR_WIDTH: f32 = 1.0;

/// Hangul, CJK ideographs, kana and full-width forms.
fn is_wide(c: char) -> bool {
    matches!(c as u32,
        0x1100..=0x115F
        | 0x2E80..=0x303E
        | 0x3041..=0x33FF
        | 0x3400..=0x4DBF
        | 0x4E00..=0x9FFF
        | 0xA960..=0xA97F
        | 0xAC00..=0xD7A3
        | 0xF900..=0xFAFF
        | 0xFE30..=0xFE4F
        | 0xFF00..=0xFF60
        | 0xFFE0..=0xFFE6)
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

/// Sans regular (Helvetica metrics; stands in for NotoSans with no pair loaded).
static SANS_REGULAR_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
        // {      |      }      ~
        0.334, 0.260, 0.334, 0.584,
    ],
    average_char_width: 0.556,
    space_width: 0.278,
    marker_width: 0.350,
};

/// Sans bold (Helvetica-Bold metrics).
static SANS_BOLD_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.333, 0.474, 0.556, 0.556, 0.889, 0.722, 0.238, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.333, 0.333, 0.584, 0.584, 0.584, 0.611, 0.975,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.722, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.556, 0.722, 0.611, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.584, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.611, 0.556, 0.611, 0.556, 0.333, 0.611, 0.611, 0.278, 0.278, 0.556, 0.278, 0.889,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.611, 0.611, 0.611, 0.611, 0.389, 0.556, 0.333, 0.611, 0.556, 0.778, 0.556, 0.556, 0.500,
        // {      |      }      ~
        0.389, 0.280, 0.389, 0.584,
    ],
    average_char_width: 0.611,
    space_width: 0.278,
    marker_width: 0.350,
};

/// Courier: every glyph is 0.6em, bold included.
static MONO_TABLE: FontMetricTable = FontMetricTable {
    widths: [0.600; 95],
    average_char_width: 0.600,
    space_width: 0.600,
    marker_width: 0.600,
};

/// Returns the static metric table for a family and style.
///
/// Italic measures as its upright counterpart.
pub fn get_metrics(family: FontFamily, style: FontStyle) -> &'static FontMetricTable {
    match family {
        FontFamily::NotoSans | FontFamily::Helvetica => {
            if style.is_bold() {
                &SANS_BOLD_TABLE
            } else {
                &SANS_REGULAR_TABLE
            }
        }
        FontFamily::Courier => &MONO_TABLE,
    }
}

/// Width of `text` in points at `font_size_pt`, using the static tables.
#[cfg(test)]
pub fn measure_width(text: &str, family: FontFamily, style: FontStyle, font_size_pt: f32) -> f32 {
    get_metrics(family, style).measure(text, font_size_pt)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
