//! PDF executor. Replays a `PageLayout` into a `printpdf` 0.8 document.
//!
//! Layout coordinates are top-down points; PDF user space is bottom-up, so
//! every `y` is flipped against the page height here and nowhere else.

use printpdf::{
    Actions, BuiltinFont, Color as PdfColor, DictItem, FontId, Line, LinePoint, LinkAnnotation,
    Mm, Op, ParsedFont, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Point, Pt, RawImage,
    RawImageData, RawImageFormat, Rect, Rgb, TextItem, TextMatrix, XObjectId, XObjectTransform,
};
use tracing::{debug, info, instrument, warn};

use crate::layout::{Color, DrawCommand, DrawOp, FontFamily, FontStyle, PageLayout, TextStyle};
use crate::models::ProfileImage;
use crate::render::fonts::FontSelection;
use crate::render::RenderError;

const PT_TO_MM: f32 = 25.4 / 72.0;

/// Horizontal shear for synthetic italic (about 12 degrees).
const ITALIC_SHEAR: f32 = 0.21;

/// Resolved fonts for one document.
enum Fonts {
    Embedded { regular: FontId, bold: FontId },
    Builtin(FontFamily),
}

impl Fonts {
    fn register(doc: &mut PdfDocument, selection: FontSelection<'_>) -> Result<Self, RenderError> {
        match selection {
            FontSelection::Embedded { subset, pair } => {
                let mut warnings: Vec<PdfWarnMsg> = Vec::new();
                let regular = ParsedFont::from_bytes(&pair.regular, 0, &mut warnings)
                    .ok_or_else(|| RenderError::Font(format!("{subset:?} regular")))?;
                let bold = ParsedFont::from_bytes(&pair.bold, 0, &mut warnings)
                    .ok_or_else(|| RenderError::Font(format!("{subset:?} bold")))?;
                Ok(Fonts::Embedded {
                    regular: doc.add_font(&regular),
                    bold: doc.add_font(&bold),
                })
            }
            FontSelection::Builtin(family) => Ok(Fonts::Builtin(family)),
        }
    }
}

fn builtin_font(family: FontFamily, style: FontStyle) -> BuiltinFont {
    match (family, style) {
        (FontFamily::Courier, FontStyle::Normal) => BuiltinFont::Courier,
        (FontFamily::Courier, FontStyle::Bold) => BuiltinFont::CourierBold,
        (FontFamily::Courier, FontStyle::Italic) => BuiltinFont::CourierOblique,
        (FontFamily::Courier, FontStyle::BoldItalic) => BuiltinFont::CourierBoldOblique,
        (_, FontStyle::Normal) => BuiltinFont::Helvetica,
        (_, FontStyle::Bold) => BuiltinFont::HelveticaBold,
        (_, FontStyle::Italic) => BuiltinFont::HelveticaOblique,
        (_, FontStyle::BoldItalic) => BuiltinFont::HelveticaBoldOblique,
    }
}

/// WinAnsi (cp1252) code for `c`, if the base fonts can draw it.
fn win_ansi_code(c: char) -> Option<u8> {
    let code = match c {
        ' '..='~' | '\u{a0}'..='\u{ff}' => c as u8,
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8a,
        '‹' => 0x8b,
        'Œ' => 0x8c,
        'Ž' => 0x8e,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9a,
        '›' => 0x9b,
        'œ' => 0x9c,
        'ž' => 0x9e,
        'Ÿ' => 0x9f,
        _ => return None,
    };
    Some(code)
}

/// Encodes `text` for the base fonts. ◦ becomes `-`; anything else outside
/// WinAnsi becomes `?`.
fn win_ansi_bytes(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '◦' => b'-',
            c => win_ansi_code(c).unwrap_or(b'?'),
        })
        .collect()
}

fn pdf_color(color: Color) -> PdfColor {
    let (r, g, b) = color.to_unit();
    PdfColor::Rgb(Rgb {
        r,
        g,
        b,
        icc_profile: None,
    })
}

/// Renders `layout` to PDF bytes.
///
/// The profile image is drawn where the layout placed it; an image that
/// cannot be decoded is skipped with a warning rather than failing the render.
#[instrument(skip_all, fields(pages = layout.page_count, commands = layout.commands.len()))]
pub fn render_pdf(
    layout: &PageLayout,
    fonts: FontSelection<'_>,
    image: Option<&ProfileImage>,
    title: &str,
) -> Result<Vec<u8>, RenderError> {
    let mut doc = PdfDocument::new(title);
    let fonts = Fonts::register(&mut doc, fonts)?;
    let image = image.and_then(|img| add_image(&mut doc, img));

    let page_w = layout.geometry.page_width;
    let page_h = layout.geometry.page_height;

    let pages: Vec<PdfPage> = (0..layout.page_count)
        .map(|page| {
            let mut ops: Vec<Op> = Vec::new();
            for command in layout.commands_on(page) {
                emit(&mut ops, command, page_h, &fonts, image.as_ref());
            }
            PdfPage::new(Mm(page_w * PT_TO_MM), Mm(page_h * PT_TO_MM), ops)
        })
        .collect();
    doc.with_pages(pages);

    // Non-ASCII base-font runs are raw `Tj` ops, which the secure mode drops.
    let options = PdfSaveOptions {
        secure: false,
        ..PdfSaveOptions::default()
    };
    let mut warnings: Vec<PdfWarnMsg> = Vec::new();
    let output = doc.save(&options, &mut warnings);
    if !warnings.is_empty() {
        debug!(count = warnings.len(), "PDF serialiser warnings");
    }
    info!(bytes = output.len(), "PDF rendered");
    Ok(output)
}

/// Decoded image plus its native pixel size.
struct PlacedImage {
    id: XObjectId,
    width_px: f32,
    height_px: f32,
}

fn add_image(doc: &mut PdfDocument, image: &ProfileImage) -> Option<PlacedImage> {
    let decoded = match ::image::load_from_memory(&image.data) {
        Ok(decoded) => decoded,
        Err(e) => {
            warn!(mime = %image.mime_type, "Skipping undecodable profile image: {e}");
            return None;
        }
    };
    let width = decoded.width() as usize;
    let height = decoded.height() as usize;
    if width == 0 || height == 0 {
        return None;
    }
    let raw = RawImage {
        pixels: RawImageData::U8(decoded.to_rgb8().into_raw()),
        width,
        height,
        data_format: RawImageFormat::RGB8,
        tag: Vec::new(),
    };
    Some(PlacedImage {
        id: doc.add_image(&raw),
        width_px: width as f32,
        height_px: height as f32,
    })
}

fn emit(
    ops: &mut Vec<Op>,
    command: &DrawCommand,
    page_h: f32,
    fonts: &Fonts,
    image: Option<&PlacedImage>,
) {
    let x = command.x;
    let y = page_h - command.y;
    match &command.op {
        DrawOp::Text { text, style } => emit_text(ops, x, y, text, style, fonts),
        DrawOp::Rule {
            width,
            thickness,
            color,
        } => {
            ops.push(Op::SetOutlineColor {
                col: pdf_color(*color),
            });
            ops.push(Op::SetOutlineThickness { pt: Pt(*thickness) });
            ops.push(Op::DrawLine {
                line: Line {
                    points: vec![
                        LinePoint {
                            p: Point { x: Pt(x), y: Pt(y) },
                            bezier: false,
                        },
                        LinePoint {
                            p: Point {
                                x: Pt(x + width),
                                y: Pt(y),
                            },
                            bezier: false,
                        },
                    ],
                    is_closed: false,
                },
            });
        }
        DrawOp::Link { width, height, url } => {
            let rect = Rect {
                x: Pt(x),
                y: Pt(y - height),
                width: Pt(*width),
                height: Pt(*height),
            };
            ops.push(Op::LinkAnnotation {
                link: LinkAnnotation::new(rect, Actions::Uri(url.clone()), None, None, None),
            });
        }
        DrawOp::Image { width, height } => {
            let Some(image) = image else {
                return;
            };
            // At 72 dpi one pixel is one point.
            ops.push(Op::UseXobject {
                id: image.id.clone(),
                transform: XObjectTransform {
                    translate_x: Some(Pt(x)),
                    translate_y: Some(Pt(y - height)),
                    scale_x: Some(width / image.width_px),
                    scale_y: Some(height / image.height_px),
                    dpi: Some(72.0),
                    rotate: None,
                },
            });
        }
    }
}

fn emit_text(ops: &mut Vec<Op>, x: f32, y: f32, text: &str, style: &TextStyle, fonts: &Fonts) {
    ops.push(Op::StartTextSection);
    ops.push(Op::SetFillColor {
        col: pdf_color(style.color),
    });
    match fonts {
        Fonts::Embedded { regular, bold } => {
            // The subsets ship upright faces only; italic is a sheared text matrix.
            if style.font_style.is_italic() {
                ops.push(Op::SetTextMatrix {
                    matrix: TextMatrix::Raw([1.0, 0.0, ITALIC_SHEAR, 1.0, x, y]),
                });
            } else {
                ops.push(Op::SetTextCursor {
                    pos: Point { x: Pt(x), y: Pt(y) },
                });
            }
            let font = if style.font_style.is_bold() { bold } else { regular };
            ops.push(Op::SetFontSize {
                size: Pt(style.size_pt),
                font: font.clone(),
            });
            ops.push(Op::WriteText {
                items: vec![TextItem::Text(text.to_string())],
                font: font.clone(),
            });
        }
        Fonts::Builtin(family) => {
            ops.push(Op::SetTextCursor {
                pos: Point { x: Pt(x), y: Pt(y) },
            });
            let font = builtin_font(*family, style.font_style);
            ops.push(Op::SetFontSizeBuiltinFont {
                size: Pt(style.size_pt),
                font,
            });
            let bytes = win_ansi_bytes(text);
            if bytes.is_ascii() {
                ops.push(Op::WriteTextBuiltinFont {
                    items: vec![TextItem::Text(bytes.iter().map(|&b| char::from(b)).collect())],
                    font,
                });
            } else {
                // The serialiser writes base-font text as UTF-8, so WinAnsi
                // bytes above 0x7F go out as a hex string. The empty write
                // still registers the font on the page.
                ops.push(Op::WriteTextBuiltinFont {
                    items: Vec::new(),
                    font,
                });
                ops.push(Op::Unknown {
                    key: "Tj".to_string(),
                    value: vec![DictItem::Bytes(bytes)],
                });
            }
        }
    }
    ops.push(Op::EndTextSection);
}
