//! Bullet parser: turns a one-item-per-line text blob into a `Bullets` record.
//!
//! # Line grammar
//! - `# text`  → the entry's description (unbulleted header line; last one wins)
//! - `- text`  → level-1 bullet
//! - `+ text`  → level-2 bullet
//! - `text`    → level-1 bullet (legacy freeform input)
//!
//! Items keep their original prefix verbatim; the level is derived per line
//! when rendering, never stored.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// Canonical bullets of an experience or project entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "BulletsInput")]
pub struct Bullets {
    /// Optional single header line rendered without a marker. Empty = absent.
    pub description: String,
    /// Raw item lines, order preserved, prefixes (`-` / `+`) kept.
    pub items: Vec<String>,
}

/// Every shape a `bullets` field arrives in on the JSON boundary.
///
/// Normalised once into `Bullets`; nothing past the model boundary sees this.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BulletsInput {
    /// Legacy freeform block, one bullet per line.
    Legacy(String),
    /// Bare array of item lines (AI payloads).
    Lines(Vec<String>),
    /// Already structured; passed through untouched.
    Structured {
        #[serde(default)]
        description: Option<String>,
        #[serde(default)]
        items: Vec<String>,
    },
}

impl From<BulletsInput> for Bullets {
    fn from(input: BulletsInput) -> Self {
        match input {
            BulletsInput::Legacy(text) => parse_bullets(&text),
            BulletsInput::Lines(items) => Bullets {
                description: String::new(),
                items,
            },
            BulletsInput::Structured { description, items } => Bullets {
                description: description.unwrap_or_default(),
                items,
            },
        }
    }
}

/// Exports the structured form plus `text`, the editable block the client
/// shows in its textarea. Importers ignore `text`.
impl Serialize for Bullets {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Bullets", 3)?;
        state.serialize_field("description", &self.description)?;
        state.serialize_field("items", &self.items)?;
        state.serialize_field("text", &serialize_bullets(self))?;
        state.end()
    }
}

/// Nesting level of a bullet item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BulletLevel {
    One,
    Two,
}

/// A bullet item as seen by the renderers: level + text without its prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulletItem<'a> {
    pub level: BulletLevel,
    pub text: &'a str,
}

impl BulletLevel {
    /// Derives the level from a raw item line. Unprefixed lines are level 1.
    pub fn of(line: &str) -> Self {
        if line.trim_start().starts_with('+') {
            BulletLevel::Two
        } else {
            BulletLevel::One
        }
    }

    /// Marker glyph drawn before the first wrapped line of an item.
    pub fn marker(self) -> &'static str {
        match self {
            BulletLevel::One => "•",
            BulletLevel::Two => "◦",
        }
    }
}

impl Bullets {
    pub fn has_description(&self) -> bool {
        !self.description.trim().is_empty()
    }

    /// True when neither the description nor any item carries text.
    pub fn is_empty(&self) -> bool {
        !self.has_description() && self.render_items().next().is_none()
    }

    /// Items with their level derived and prefix stripped; blank items skipped.
    pub fn render_items(&self) -> impl Iterator<Item = BulletItem<'_>> {
        self.items.iter().filter_map(|raw| {
            let text = strip_marker(raw);
            if text.is_empty() {
                None
            } else {
                Some(BulletItem {
                    level: BulletLevel::of(raw),
                    text,
                })
            }
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Parse / serialize
// ────────────────────────────────────────────────────────────────────────────

/// Parses a freeform text block into `Bullets`.
///
/// Lines are trimmed and blank lines dropped. A `#` line becomes the
/// description (the last one wins); every other line is kept verbatim as an item.
pub fn parse_bullets(text: &str) -> Bullets {
    let mut bullets = Bullets::default();
    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(header) = line.strip_prefix('#') {
            bullets.description = header.trim().to_string();
        } else {
            bullets.items.push(line.to_string());
        }
    }
    bullets
}

/// Reconstructs the editable text form: `# description` then the item lines.
///
/// `parse_bullets` of the result gives back `bullets` up to the parser's
/// normalisation: the description and items are trimmed, a whitespace-only
/// description is dropped along with its header line, blank items are
/// dropped, and an unprefixed item starting with `#` is written as `- #...`
/// so it stays an item. Marker-only items (`-`, `+`) survive as they are.
pub fn serialize_bullets(bullets: &Bullets) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(bullets.items.len() + 1);
    if bullets.has_description() {
        lines.push(format!("# {}", bullets.description.trim()));
    }
    for item in &bullets.items {
        let item = item.trim();
        if item.starts_with('#') {
            lines.push(format!("- {item}"));
        } else if !item.is_empty() {
            lines.push(item.to_string());
        }
    }
    lines.join("\n")
}

/// Strips a leading `-` or `+` marker and surrounding whitespace.
fn strip_marker(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix('-')
        .or_else(|| trimmed.strip_prefix('+'))
        .unwrap_or(trimmed)
        .trim()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_two_level_block() {
        let parsed = parse_bullets("# Led team\n- Shipped X\n+ Used Y");
        assert_eq!(parsed.description, "Led team");
        assert_eq!(parsed.items, vec!["- Shipped X", "+ Used Y"]);
    }

    #[test]
    fn test_parse_drops_blank_lines_and_trims() {
        let parsed = parse_bullets("\n   - one  \n\n\t+ two\n   \n");
        assert_eq!(parsed.description, "");
        assert_eq!(parsed.items, vec!["- one", "+ two"]);
    }

    #[test]
    fn test_parse_last_header_wins() {
        let parsed = parse_bullets("# first\n- a\n#second");
        assert_eq!(parsed.description, "second");
        assert_eq!(parsed.items, vec!["- a"]);
    }

    #[test]
    fn test_unprefixed_lines_are_level_one() {
        let parsed = parse_bullets("Built the thing\n+ nested");
        let items: Vec<_> = parsed.render_items().collect();
        assert_eq!(items[0].level, BulletLevel::One);
        assert_eq!(items[0].text, "Built the thing");
        assert_eq!(items[1].level, BulletLevel::Two);
        assert_eq!(items[1].text, "nested");
    }

    #[test]
    fn test_serialize_then_parse_is_identity() {
        let bullets = Bullets {
            description: "Platform team".to_string(),
            items: vec![
                "- Cut p99 latency by 40%".to_string(),
                "+ Rewrote the cache in Rust".to_string(),
                "- Mentored two engineers".to_string(),
            ],
        };
        assert_eq!(parse_bullets(&serialize_bullets(&bullets)), bullets);
    }

    #[test]
    fn test_serialize_then_parse_normalises() {
        let strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        // (description, items) in, (description, items) expected back.
        let cases: &[(&str, &[&str], &str, &[&str])] = &[
            ("", &[], "", &[]),
            ("  Team  ", &["  - a  ", "\t+ b"], "Team", &["- a", "+ b"]),
            ("Team", &["-", "+", "- real"], "Team", &["-", "+", "- real"]),
            ("   ", &["- a"], "", &["- a"]),
            ("", &["", "   ", "- kept"], "", &["- kept"]),
            ("", &["#1 in sales", "- #2"], "", &["- #1 in sales", "- #2"]),
            ("# nested", &["plain"], "# nested", &["plain"]),
        ];
        for (description, items, want_description, want_items) in cases {
            let bullets = Bullets {
                description: description.to_string(),
                items: strings(items),
            };
            let text = serialize_bullets(&bullets);
            let back = parse_bullets(&text);
            assert_eq!(back.description, *want_description, "description of {text:?}");
            assert_eq!(back.items, strings(want_items), "items of {text:?}");
            if description.trim().is_empty() {
                assert!(!text.starts_with('#'), "{text:?}");
            }
            // Normalised input is a fixed point.
            assert_eq!(parse_bullets(&serialize_bullets(&back)), back);
        }
    }

    #[test]
    fn test_serialize_without_description() {
        let bullets = Bullets {
            description: String::new(),
            items: vec!["- a".to_string(), "+ b".to_string()],
        };
        assert_eq!(serialize_bullets(&bullets), "- a\n+ b");
    }

    #[test]
    fn test_render_items_skips_bare_markers() {
        let bullets = Bullets {
            description: String::new(),
            items: vec!["-".to_string(), "  + ".to_string(), "- real".to_string()],
        };
        let items: Vec<_> = bullets.render_items().collect();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].text, "real");
        assert!(!bullets.is_empty());
    }

    #[test]
    fn test_export_carries_editable_text() {
        let bullets = parse_bullets("# Team\n- a\n+ b");
        let value = serde_json::to_value(&bullets).unwrap();
        assert_eq!(value["text"], "# Team\n- a\n+ b");
        let back: Bullets = serde_json::from_value(value).unwrap();
        assert_eq!(back, bullets);
    }

    #[test]
    fn test_deserialize_legacy_string() {
        let bullets: Bullets = serde_json::from_str(r##""# Header\n- a\n+ b""##).unwrap();
        assert_eq!(bullets.description, "Header");
        assert_eq!(bullets.items, vec!["- a", "+ b"]);
    }

    #[test]
    fn test_deserialize_array_form() {
        let bullets: Bullets = serde_json::from_str(r#"["Led migration", "Cut costs"]"#).unwrap();
        assert_eq!(bullets.description, "");
        assert_eq!(bullets.items, vec!["Led migration", "Cut costs"]);
    }

    #[test]
    fn test_deserialize_structured_passes_through() {
        let bullets: Bullets =
            serde_json::from_str(r#"{"description": "Team", "items": ["- x", "+ y"]}"#).unwrap();
        assert_eq!(bullets.description, "Team");
        assert_eq!(bullets.items, vec!["- x", "+ y"]);

        let no_description: Bullets = serde_json::from_str(r#"{"items": []}"#).unwrap();
        assert_eq!(no_description, Bullets::default());
    }

    #[test]
    fn test_structured_round_trip_through_json() {
        let bullets = parse_bullets("# Lead\n- one\n+ two");
        let json = serde_json::to_string(&bullets).unwrap();
        let back: Bullets = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bullets);
    }
}
