//! Section gating and the body-section renderers.
//!
//! Every renderer draws a line at the current baseline and then calls
//! `next_line`, so a break can happen after any wrapped sub-line, including
//! in the middle of a single bullet.

use crate::bullets::{BulletLevel, Bullets};
use crate::layout::canvas::Canvas;
use crate::layout::commands::Color;
use crate::layout::font_metrics::FontStyle;
use crate::models::{
    looks_like_url, CertificateEntry, EducationEntry, ExperienceEntry, ProjectEntry, ResumeDocument,
    SectionEntry, SkillEntry,
};

// ────────────────────────────────────────────────────────────────────────────
// Gating
// ────────────────────────────────────────────────────────────────────────────

/// Body sections in render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Summary,
    Skills,
    Experience,
    Projects,
    Education,
    Certificates,
}

pub const SECTION_ORDER: [SectionKind; 6] = [
    SectionKind::Summary,
    SectionKind::Skills,
    SectionKind::Experience,
    SectionKind::Projects,
    SectionKind::Education,
    SectionKind::Certificates,
];

impl SectionKind {
    pub fn title(self) -> &'static str {
        match self {
            SectionKind::Summary => "Summary",
            SectionKind::Skills => "Skills",
            SectionKind::Experience => "Experience",
            SectionKind::Projects => "Projects",
            SectionKind::Education => "Education",
            SectionKind::Certificates => "Certificates",
        }
    }
}

fn first_is_filled<E: SectionEntry>(entries: &[E]) -> bool {
    entries.first().is_some_and(|e| !e.is_blank())
}

/// Whether a section is emitted at all.
///
/// Only the first entry is consulted: a blank first entry hides the whole
/// section even when later entries carry content.
pub fn is_visible(doc: &ResumeDocument, kind: SectionKind) -> bool {
    match kind {
        SectionKind::Summary => !doc.summary.trim().is_empty(),
        SectionKind::Skills => first_is_filled(&doc.skills),
        SectionKind::Experience => first_is_filled(&doc.experiences),
        SectionKind::Projects => first_is_filled(&doc.projects),
        SectionKind::Education => first_is_filled(&doc.educations),
        SectionKind::Certificates => first_is_filled(&doc.certificates),
    }
}

pub fn visible_sections(doc: &ResumeDocument) -> Vec<SectionKind> {
    SECTION_ORDER
        .into_iter()
        .filter(|kind| is_visible(doc, *kind))
        .collect()
}

/// Entries that produce output. Blank entries past the first are skipped.
pub fn filled<E: SectionEntry>(entries: &[E]) -> impl Iterator<Item = &E> {
    entries.iter().filter(|e| !e.is_blank())
}

/// `a - b`, or whichever side is non-empty.
pub fn dash_join(left: &str, right: &str) -> String {
    match (left.trim(), right.trim()) {
        ("", r) => r.to_string(),
        (l, "") => l.to_string(),
        (l, r) => format!("{l} - {r}"),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Renderers
// ────────────────────────────────────────────────────────────────────────────

pub fn render_section(canvas: &mut Canvas, doc: &ResumeDocument, kind: SectionKind) {
    heading(canvas, kind.title());
    match kind {
        SectionKind::Summary => render_summary(canvas, &doc.summary),
        SectionKind::Skills => filled(&doc.skills).for_each(|e| render_skill(canvas, e)),
        SectionKind::Experience => {
            filled(&doc.experiences).for_each(|e| render_experience(canvas, e))
        }
        SectionKind::Projects => filled(&doc.projects).for_each(|e| render_project(canvas, e)),
        SectionKind::Education => {
            filled(&doc.educations).for_each(|e| render_education(canvas, e))
        }
        SectionKind::Certificates => {
            filled(&doc.certificates).for_each(|e| render_certificate(canvas, e))
        }
    }
    let padding = canvas.style().padding;
    canvas.advance(padding);
}

/// Bold title with a full-width rule below it.
///
/// No break check here: the first content line checks, which keeps the
/// heading on the same page as that line.
fn heading(canvas: &mut Canvas, title: &str) {
    let style = canvas.style().clone();
    let left = canvas.left();
    let width = canvas.geometry().content_width();
    canvas.text(left, title, FontStyle::Bold, style.heading_size, Color::BLACK);
    canvas.rule(left, width, style.heading_rule_offset, Color::BLACK);
    canvas.advance(style.line_height + style.padding);
}

fn render_summary(canvas: &mut Canvas, summary: &str) {
    let left = canvas.left();
    let width = canvas.geometry().content_width();
    for line in canvas.wrap(summary, width, FontStyle::Normal) {
        canvas.body(left, &line, FontStyle::Normal);
        canvas.next_line();
    }
}

/// `**Skill**, description`, the description wrapping back to the margin.
///
/// A label wider than the column wraps on its own; the description hangs
/// after the label's last line.
fn render_skill(canvas: &mut Canvas, entry: &SkillEntry) {
    let left = canvas.left();
    let right = canvas.right();
    let label = entry.skill.trim();
    let description = entry.description.trim();

    let mut label_lines = canvas.wrap(label, right - left, FontStyle::Bold);
    let last_label = label_lines.pop().unwrap_or_default();
    for line in &label_lines {
        canvas.body(left, line, FontStyle::Bold);
        canvas.next_line();
    }
    let label_width = canvas.body(left, &last_label, FontStyle::Bold);
    if description.is_empty() {
        canvas.next_line();
        return;
    }

    let text = if label.is_empty() {
        description.to_string()
    } else {
        format!(", {description}")
    };
    let mut first_x = left + label_width;
    let first_word = text.split_whitespace().next().unwrap_or_default();
    let size = canvas.style().body_size;
    if first_x + canvas.measure(first_word, FontStyle::Normal, size) > right {
        canvas.next_line();
        first_x = left;
    }
    let lines = canvas.wrap_hanging(&text, right - first_x, right - left, FontStyle::Normal);
    for (i, line) in lines.iter().enumerate() {
        let x = if i == 0 { first_x } else { left };
        canvas.body(x, line, FontStyle::Normal);
        canvas.next_line();
    }
}

fn render_experience(canvas: &mut Canvas, entry: &ExperienceEntry) {
    let left = canvas.left();
    let position = entry.position.trim();
    let dates = entry.dates.trim();
    if !position.is_empty() || !dates.is_empty() {
        canvas.body(left, position, FontStyle::Bold);
        canvas.body_right(dates, FontStyle::Normal);
        canvas.next_line();
    }

    let company = entry.company.trim().to_uppercase();
    let location = entry.location.trim();
    if !company.is_empty() || !location.is_empty() {
        let mut x = left + canvas.body(left, &company, FontStyle::Normal);
        if !company.is_empty() && !location.is_empty() {
            x += canvas.body(x, " - ", FontStyle::Normal);
        }
        canvas.body(x, location, FontStyle::Italic);
        canvas.next_line();
    }

    render_bullets(canvas, &entry.bullets);
}

fn render_project(canvas: &mut Canvas, entry: &ProjectEntry) {
    let left = canvas.left();
    let width = canvas.geometry().content_width();

    let name = entry.project_name.trim().to_uppercase();
    for line in canvas.wrap(&name, width, FontStyle::Bold) {
        canvas.body(left, &line, FontStyle::Bold);
        canvas.next_line();
    }

    let link = entry.project_link.trim();
    let target = looks_like_url(link).then_some(link);
    let size = canvas.style().body_size;
    for line in canvas.wrap(link, width, FontStyle::Normal) {
        if target.is_some() {
            canvas.link(left, &line, size, target);
        } else {
            canvas.body(left, &line, FontStyle::Normal);
        }
        canvas.next_line();
    }

    render_bullets(canvas, &entry.bullets);
}

fn render_education(canvas: &mut Canvas, entry: &EducationEntry) {
    let left = canvas.left();
    let university = entry.university.trim();
    let date = entry.graduation_date.trim();
    if !university.is_empty() || !date.is_empty() {
        canvas.body(left, university, FontStyle::Bold);
        canvas.body_right(date, FontStyle::Normal);
        canvas.next_line();
    }

    let degree = dash_join(&entry.degree, &entry.gpa);
    if !degree.is_empty() {
        canvas.body(left, &degree, FontStyle::Normal);
        canvas.next_line();
    }
}

fn render_certificate(canvas: &mut Canvas, entry: &CertificateEntry) {
    let left = canvas.left();
    let width = canvas.geometry().content_width();
    let name = entry.cert_name.trim();
    let date = entry.cert_date.trim();
    if !name.is_empty() || !date.is_empty() {
        canvas.body(left, name, FontStyle::Bold);
        canvas.body_right(date, FontStyle::Normal);
        canvas.next_line();
    }

    for line in canvas.wrap(&entry.issuer_or_description, width, FontStyle::Normal) {
        canvas.body(left, &line, FontStyle::Normal);
        canvas.next_line();
    }
}

/// Description line, then items with level markers and hanging indents.
///
/// Level 1 sits at the margin, or 10pt in when a description is present;
/// level 2 sits 20pt in. Continuation lines align with the item text and
/// carry no marker.
pub fn render_bullets(canvas: &mut Canvas, bullets: &Bullets) {
    let style = canvas.style().clone();
    let left = canvas.left();
    let right = canvas.right();

    let has_description = bullets.has_description();
    if has_description {
        for line in canvas.wrap(&bullets.description, right - left, FontStyle::Normal) {
            canvas.body(left, &line, FontStyle::Normal);
            canvas.next_line();
        }
    }

    for item in bullets.render_items() {
        let indent = match item.level {
            BulletLevel::One if has_description => left + style.described_indent,
            BulletLevel::One => left,
            BulletLevel::Two => left + style.nested_indent,
        };
        let text_x = indent + style.marker_gap;
        for (i, line) in canvas
            .wrap(item.text, right - text_x, FontStyle::Normal)
            .iter()
            .enumerate()
        {
            if i == 0 {
                canvas.body(indent, item.level.marker(), FontStyle::Normal);
            }
            canvas.body(text_x, line, FontStyle::Normal);
            canvas.next_line();
        }
    }
}
