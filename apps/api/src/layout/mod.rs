// Résumé layout engine.
// Measures and wraps text, tracks a vertical cursor across A4 pages and emits
// immutable draw commands; also flattens the same content into a paragraph
// stream for word-processor output. Pure and synchronous: handlers run it
// inside tokio::task::spawn_blocking.

pub mod assembler;
pub mod canvas;
pub mod commands;
pub mod cursor;
pub mod flow;
pub mod font_metrics;
pub mod header;
pub mod sections;
pub mod style;
pub mod wrap;

// Re-export the public API consumed by the renderers and handlers.
pub use assembler::layout_resume;
pub use commands::{Color, DrawCommand, DrawOp, PageLayout, TextStyle};
pub use flow::{flow_resume, Block, Span};
pub use font_metrics::{FontFamily, FontStyle};
pub use style::StyleConfig;
