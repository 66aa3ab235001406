//! Glyph-subset fonts for the PDF backend.
//!
//! Embedded output uses a NotoSans regular/bold pair chosen by document
//! language. The pairs are read from `FONT_DIR` once at start-up; a missing
//! or unparsable pair is logged and the backend falls back to the Latin pair,
//! then to built-in Helvetica. Each pair's advance widths are read at load
//! time so the layout measures exactly what the PDF draws.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use printpdf::{ParsedFont, PdfWarnMsg};
use tracing::{debug, info, warn};

use crate::layout::font_metrics::{EmbeddedMetrics, FontMetricTable};
use crate::layout::{FontFamily, StyleConfig};

/// Which glyph coverage a document needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlyphSubset {
    Latin,
    Japanese,
    Korean,
    Chinese,
}

impl GlyphSubset {
    pub const ALL: [GlyphSubset; 4] = [
        GlyphSubset::Latin,
        GlyphSubset::Japanese,
        GlyphSubset::Korean,
        GlyphSubset::Chinese,
    ];

    /// CJK languages get their own subset; everything else is Latin-extended.
    pub fn for_language(language: &str) -> Self {
        match language.trim().to_ascii_lowercase().as_str() {
            "japanese" | "ja" | "日本語" => GlyphSubset::Japanese,
            "korean" | "ko" | "한국어" => GlyphSubset::Korean,
            "chinese" | "zh" | "中文" => GlyphSubset::Chinese,
            _ => GlyphSubset::Latin,
        }
    }

    /// `(regular, bold)` file names inside the font directory.
    pub fn file_names(self) -> (&'static str, &'static str) {
        match self {
            GlyphSubset::Latin => ("NotoSans-Regular.ttf", "NotoSans-Bold.ttf"),
            GlyphSubset::Japanese => ("NotoSansJP-Regular.ttf", "NotoSansJP-Bold.ttf"),
            GlyphSubset::Korean => ("NotoSansKR-Regular.ttf", "NotoSansKR-Bold.ttf"),
            GlyphSubset::Chinese => ("NotoSansSC-Regular.ttf", "NotoSansSC-Bold.ttf"),
        }
    }
}

/// Raw TTF bytes of one regular/bold pair, plus their measured widths.
#[derive(Debug, Clone)]
pub struct FontPair {
    pub regular: Vec<u8>,
    pub bold: Vec<u8>,
    pub metrics: Arc<EmbeddedMetrics>,
}

/// What the PDF backend should draw with for one render.
#[derive(Debug, Clone, Copy)]
pub enum FontSelection<'a> {
    Embedded {
        subset: GlyphSubset,
        pair: &'a FontPair,
    },
    /// A built-in PDF base family; nothing is embedded.
    Builtin(FontFamily),
}

impl FontSelection<'_> {
    /// Layout style measuring with the widths of the selected font.
    pub fn style(&self) -> StyleConfig {
        match self {
            FontSelection::Embedded { pair, .. } => StyleConfig::new(FontFamily::NotoSans)
                .with_embedded_metrics(Arc::clone(&pair.metrics)),
            FontSelection::Builtin(family) => StyleConfig::new(*family),
        }
    }
}

/// Font pairs available to this process.
#[derive(Debug, Clone, Default)]
pub struct FontStore {
    pairs: HashMap<GlyphSubset, FontPair>,
}

impl FontStore {
    /// A store with no embedded fonts; every render uses built-in families.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Loads every subset pair found in `dir`.
    pub fn load(dir: &Path) -> Self {
        let mut pairs = HashMap::new();
        for subset in GlyphSubset::ALL {
            match load_pair(dir, subset) {
                Ok(pair) => {
                    debug!(?subset, "Loaded glyph subset");
                    pairs.insert(subset, pair);
                }
                Err(reason) => {
                    warn!(?subset, dir = %dir.display(), "Glyph subset unavailable: {reason}")
                }
            }
        }
        info!(loaded = pairs.len(), "Font store initialised");
        Self { pairs }
    }

    pub fn has(&self, subset: GlyphSubset) -> bool {
        self.pairs.contains_key(&subset)
    }

    /// Picks the font for a render of `family` in `language`.
    pub fn select(&self, family: FontFamily, language: &str) -> FontSelection<'_> {
        if !family.is_embedded() {
            return FontSelection::Builtin(family);
        }

        let wanted = GlyphSubset::for_language(language);
        if let Some(pair) = self.pairs.get(&wanted) {
            return FontSelection::Embedded {
                subset: wanted,
                pair,
            };
        }
        if let Some(pair) = self.pairs.get(&GlyphSubset::Latin) {
            warn!(?wanted, "Glyph subset missing, using Latin");
            return FontSelection::Embedded {
                subset: GlyphSubset::Latin,
                pair,
            };
        }
        FontSelection::Builtin(FontFamily::Helvetica)
    }
}

fn load_pair(dir: &Path, subset: GlyphSubset) -> Result<FontPair, String> {
    let (regular_name, bold_name) = subset.file_names();
    let regular = read_font(&dir.join(regular_name))?;
    let bold = read_font(&dir.join(bold_name))?;
    let metrics = EmbeddedMetrics {
        regular: measure_face(&regular).map_err(|e| format!("{regular_name}: {e}"))?,
        bold: measure_face(&bold).map_err(|e| format!("{bold_name}: {e}"))?,
    };
    Ok(FontPair {
        regular,
        bold,
        metrics: Arc::new(metrics),
    })
}

/// Reads horizontal advances (hmtx) for the metric table, in em units.
fn measure_face(bytes: &[u8]) -> Result<FontMetricTable, ttf_parser::FaceParsingError> {
    let face = ttf_parser::Face::parse(bytes, 0)?;
    let scale = 1.0 / f32::from(face.units_per_em());
    Ok(FontMetricTable::from_advances(|c| {
        face.glyph_index(c)
            .and_then(|glyph| face.glyph_hor_advance(glyph))
            .map(|advance| f32::from(advance) * scale)
    }))
}

fn read_font(path: &Path) -> Result<Vec<u8>, String> {
    let bytes = std::fs::read(path).map_err(|e| format!("{}: {e}", path.display()))?;
    let mut warnings: Vec<PdfWarnMsg> = Vec::new();
    if ParsedFont::from_bytes(&bytes, 0, &mut warnings).is_none() {
        return Err(format!("{}: not a parsable font", path.display()));
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::FontStyle;

    #[test]
    fn test_subset_for_language() {
        assert_eq!(GlyphSubset::for_language("Japanese"), GlyphSubset::Japanese);
        assert_eq!(GlyphSubset::for_language("korean"), GlyphSubset::Korean);
        assert_eq!(GlyphSubset::for_language("Chinese"), GlyphSubset::Chinese);
        assert_eq!(GlyphSubset::for_language("Vietnamese"), GlyphSubset::Latin);
        assert_eq!(GlyphSubset::for_language(""), GlyphSubset::Latin);
    }

    #[test]
    fn test_builtin_family_never_embeds() {
        let store = FontStore::empty();
        assert!(matches!(
            store.select(FontFamily::Courier, "Japanese"),
            FontSelection::Builtin(FontFamily::Courier)
        ));
    }

    #[test]
    fn test_missing_fonts_fall_back_to_helvetica() {
        let store = FontStore::empty();
        let selection = store.select(FontFamily::NotoSans, "English");
        assert!(matches!(selection, FontSelection::Builtin(FontFamily::Helvetica)));
        let style = selection.style();
        assert_eq!(style.font_family, FontFamily::Helvetica);
        assert!(style.embedded_metrics.is_none());
    }

    #[test]
    fn test_load_skips_missing_and_invalid_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("NotoSans-Regular.ttf"), b"not a font").unwrap();
        std::fs::write(dir.path().join("NotoSans-Bold.ttf"), b"not a font").unwrap();

        let store = FontStore::load(dir.path());
        for subset in GlyphSubset::ALL {
            assert!(!store.has(subset));
        }
    }

    fn fake_pair(width: f32) -> FontPair {
        let table = FontMetricTable::from_advances(|_| Some(width));
        FontPair {
            regular: vec![1],
            bold: vec![2],
            metrics: Arc::new(EmbeddedMetrics {
                regular: table.clone(),
                bold: table,
            }),
        }
    }

    #[test]
    fn test_missing_cjk_subset_falls_back_to_latin() {
        let mut store = FontStore::empty();
        store.pairs.insert(GlyphSubset::Latin, fake_pair(0.5));
        match store.select(FontFamily::NotoSans, "Japanese") {
            FontSelection::Embedded { subset, .. } => assert_eq!(subset, GlyphSubset::Latin),
            other => panic!("expected embedded Latin, got {other:?}"),
        }
    }

    #[test]
    fn test_embedded_selection_measures_with_pair_widths() {
        let mut store = FontStore::empty();
        store.pairs.insert(GlyphSubset::Latin, fake_pair(0.5));
        let style = store.select(FontFamily::NotoSans, "English").style();
        assert_eq!(style.font_family, FontFamily::NotoSans);
        // Every glyph of the pair is half an em, unlike the Helvetica table.
        let width = style.metrics(FontStyle::Normal).measure("Ada Lovelace", 10.0);
        assert!((width - 60.0).abs() < 1e-4, "got {width}");
        let bold = style.metrics(FontStyle::Bold).measure("Ada Lovelace", 10.0);
        assert!((bold - 60.0).abs() < 1e-4, "got {bold}");
    }

    #[test]
    fn test_measure_face_rejects_non_font_bytes() {
        assert!(measure_face(b"not a font").is_err());
    }
}
