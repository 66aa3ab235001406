//! Résumé and cover-letter records: the data every renderer reads.
//!
//! Renderers only ever borrow these; the layout pass never mutates them.

use serde::{Deserialize, Serialize};

use crate::bullets::Bullets;
use crate::models::nullable;
use crate::models::wire::CvWire;

/// Substrings that make a field render as a hyperlink.
const URL_MARKERS: [&str; 2] = ["https://", "www."];

/// True when `value` should be rendered and annotated as a hyperlink.
pub fn looks_like_url(value: &str) -> bool {
    URL_MARKERS.iter().any(|m| value.contains(m))
}

// ────────────────────────────────────────────────────────────────────────────
// Root record
// ────────────────────────────────────────────────────────────────────────────

/// One résumé per editing session.
///
/// Every entry collection holds at least one element; `Default` seeds each with
/// a blank entry and imports pad empty collections the same way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CvWire", into = "CvWire")]
pub struct ResumeDocument {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub links: Links,
    pub summary: String,
    pub skills: Vec<SkillEntry>,
    pub experiences: Vec<ExperienceEntry>,
    pub projects: Vec<ProjectEntry>,
    pub educations: Vec<EducationEntry>,
    pub certificates: Vec<CertificateEntry>,
    pub profile_image: Option<ProfileImage>,
    /// Selects the embedded glyph subset and the AI translation target.
    pub language: String,
}

impl Default for ResumeDocument {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            location: String::new(),
            links: Links::default(),
            summary: String::new(),
            skills: vec![SkillEntry::default()],
            experiences: vec![ExperienceEntry::default()],
            projects: vec![ProjectEntry::default()],
            educations: vec![EducationEntry::default()],
            certificates: vec![CertificateEntry::default()],
            profile_image: None,
            language: "English".to_string(),
        }
    }
}

/// Profile picture bytes as uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileImage {
    pub data: Vec<u8>,
    pub mime_type: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Links
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links {
    pub linkedin: LinkField,
    pub github: LinkField,
    pub website: LinkField,
}

/// A URL plus the text shown in its place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkField {
    pub url: String,
    /// Placeholder text; overrides the URL when rendering if non-empty.
    pub display_text: String,
}

impl LinkField {
    pub fn new(url: impl Into<String>, display_text: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            display_text: display_text.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.url.trim().is_empty()
    }

    /// Hyperlink target, present only when the raw URL looks like a URL.
    pub fn target(&self) -> Option<&str> {
        let url = self.url.trim();
        looks_like_url(url).then_some(url)
    }

    /// Text drawn for this link.
    ///
    /// Placeholder when set; otherwise the URL's last path segment (or its host
    /// when there is no path); a value that isn't a URL is shown verbatim.
    pub fn display(&self) -> &str {
        let placeholder = self.display_text.trim();
        if !placeholder.is_empty() {
            return placeholder;
        }
        let url = self.url.trim();
        if looks_like_url(url) {
            url_handle(url)
        } else {
            url
        }
    }
}

/// `https://github.com/ada` → `ada`, `https://www.ada.dev/` → `ada.dev`.
fn url_handle(url: &str) -> &str {
    let rest = url.split_once("://").map_or(url, |(_, r)| r);
    let rest = rest.strip_prefix("www.").unwrap_or(rest);
    let rest = rest.split(['?', '#']).next().unwrap_or(rest);
    rest.split('/')
        .filter(|segment| !segment.is_empty())
        .last()
        .unwrap_or(rest)
}

// ────────────────────────────────────────────────────────────────────────────
// Section entries
// ────────────────────────────────────────────────────────────────────────────

/// Shared emptiness check used by section gating and entry skipping.
pub trait SectionEntry {
    /// True when every field of the entry is empty or whitespace.
    fn is_blank(&self) -> bool;
}

fn blank(fields: &[&str]) -> bool {
    fields.iter().all(|f| f.trim().is_empty())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillEntry {
    #[serde(default, deserialize_with = "nullable")]
    pub skill: String,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
}

impl SectionEntry for SkillEntry {
    fn is_blank(&self) -> bool {
        blank(&[&self.skill, &self.description])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    #[serde(default, deserialize_with = "nullable")]
    pub position: String,
    #[serde(default, deserialize_with = "nullable")]
    pub company: String,
    #[serde(default, deserialize_with = "nullable")]
    pub location: String,
    #[serde(default, deserialize_with = "nullable")]
    pub dates: String,
    #[serde(default, deserialize_with = "nullable")]
    pub bullets: Bullets,
}

impl SectionEntry for ExperienceEntry {
    fn is_blank(&self) -> bool {
        blank(&[&self.position, &self.company, &self.location, &self.dates])
            && self.bullets.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEntry {
    #[serde(default, deserialize_with = "nullable")]
    pub project_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub project_link: String,
    #[serde(default, deserialize_with = "nullable")]
    pub bullets: Bullets,
}

impl SectionEntry for ProjectEntry {
    fn is_blank(&self) -> bool {
        blank(&[&self.project_name, &self.project_link]) && self.bullets.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    #[serde(default, deserialize_with = "nullable")]
    pub university: String,
    #[serde(default, deserialize_with = "nullable")]
    pub degree: String,
    #[serde(default, deserialize_with = "nullable")]
    pub gpa: String,
    #[serde(default, deserialize_with = "nullable")]
    pub graduation_date: String,
}

impl SectionEntry for EducationEntry {
    fn is_blank(&self) -> bool {
        blank(&[
            &self.university,
            &self.degree,
            &self.gpa,
            &self.graduation_date,
        ])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateEntry {
    #[serde(default, deserialize_with = "nullable")]
    pub cert_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub issuer_or_description: String,
    #[serde(default, deserialize_with = "nullable")]
    pub cert_date: String,
}

impl SectionEntry for CertificateEntry {
    fn is_blank(&self) -> bool {
        blank(&[&self.cert_name, &self.issuer_or_description, &self.cert_date])
    }
}

/// The résumé sections that hold entry collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntrySection {
    Skills,
    Experiences,
    Projects,
    Educations,
    Certificates,
}

impl EntrySection {
    pub fn from_path(segment: &str) -> Option<Self> {
        match segment {
            "skills" => Some(EntrySection::Skills),
            "experiences" => Some(EntrySection::Experiences),
            "projects" => Some(EntrySection::Projects),
            "educations" => Some(EntrySection::Educations),
            "certificates" => Some(EntrySection::Certificates),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EntrySection::Skills => "skills",
            EntrySection::Experiences => "experiences",
            EntrySection::Projects => "projects",
            EntrySection::Educations => "educations",
            EntrySection::Certificates => "certificates",
        }
    }
}

impl ResumeDocument {
    /// Number of entries currently held by `section`.
    pub fn entry_count(&self, section: EntrySection) -> usize {
        match section {
            EntrySection::Skills => self.skills.len(),
            EntrySection::Experiences => self.experiences.len(),
            EntrySection::Projects => self.projects.len(),
            EntrySection::Educations => self.educations.len(),
            EntrySection::Certificates => self.certificates.len(),
        }
    }

    /// Appends a blank entry to `section`.
    pub fn push_blank_entry(&mut self, section: EntrySection) {
        match section {
            EntrySection::Skills => self.skills.push(SkillEntry::default()),
            EntrySection::Experiences => self.experiences.push(ExperienceEntry::default()),
            EntrySection::Projects => self.projects.push(ProjectEntry::default()),
            EntrySection::Educations => self.educations.push(EducationEntry::default()),
            EntrySection::Certificates => self.certificates.push(CertificateEntry::default()),
        }
    }

    /// Removes the entry at `index`. Callers guard the last-entry invariant.
    pub fn remove_entry(&mut self, section: EntrySection, index: usize) {
        match section {
            EntrySection::Skills => {
                self.skills.remove(index);
            }
            EntrySection::Experiences => {
                self.experiences.remove(index);
            }
            EntrySection::Projects => {
                self.projects.remove(index);
            }
            EntrySection::Educations => {
                self.educations.remove(index);
            }
            EntrySection::Certificates => {
                self.certificates.remove(index);
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Cover letter
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterHeader {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub email: String,
    #[serde(default, deserialize_with = "nullable")]
    pub phone: String,
    #[serde(default, deserialize_with = "nullable")]
    pub location: String,
    #[serde(default, deserialize_with = "nullable")]
    pub date: String,
    #[serde(default, deserialize_with = "nullable")]
    pub recipient_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub recipient_title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub company_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub company_address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetter {
    #[serde(default, deserialize_with = "nullable")]
    pub header: CoverLetterHeader,
    #[serde(default, deserialize_with = "nullable")]
    pub greeting: String,
    #[serde(default, deserialize_with = "nullable")]
    pub opening_paragraph: String,
    #[serde(default, deserialize_with = "nullable")]
    pub body_paragraphs: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub closing_paragraph: String,
    #[serde(default, deserialize_with = "nullable")]
    pub sign_off: String,
}

/// The persisted/exported JSON document: `{"cv": …, "coverLetter": …}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentEnvelope {
    pub cv: ResumeDocument,
    #[serde(default, deserialize_with = "nullable")]
    pub cover_letter: CoverLetter,
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_looks_like_url() {
        assert!(looks_like_url("https://github.com/ada"));
        assert!(looks_like_url("www.ada.dev"));
        assert!(!looks_like_url("http://plain.example"));
        assert!(!looks_like_url("ada on github"));
    }

    #[test]
    fn test_link_display_prefers_placeholder() {
        let link = LinkField::new("https://github.com/ada", "My GitHub");
        assert_eq!(link.display(), "My GitHub");
        assert_eq!(link.target(), Some("https://github.com/ada"));
    }

    #[test]
    fn test_link_display_uses_last_path_segment() {
        assert_eq!(LinkField::new("https://github.com/x", "").display(), "x");
        assert_eq!(
            LinkField::new("https://linkedin.com/in/ada-l/", "").display(),
            "ada-l"
        );
        assert_eq!(LinkField::new("https://www.ada.dev", "").display(), "ada.dev");
        assert_eq!(LinkField::new("www.ada.dev/?ref=cv", "").display(), "ada.dev");
    }

    #[test]
    fn test_non_url_link_has_no_target() {
        let link = LinkField::new("ada (GitHub)", "");
        assert_eq!(link.display(), "ada (GitHub)");
        assert_eq!(link.target(), None);
    }

    #[test]
    fn test_default_document_has_one_entry_per_section() {
        let doc = ResumeDocument::default();
        for section in [
            EntrySection::Skills,
            EntrySection::Experiences,
            EntrySection::Projects,
            EntrySection::Educations,
            EntrySection::Certificates,
        ] {
            assert_eq!(doc.entry_count(section), 1, "{section:?}");
        }
    }

    #[test]
    fn test_experience_with_only_bullets_is_not_blank() {
        let entry = ExperienceEntry {
            bullets: crate::bullets::parse_bullets("- shipped"),
            ..Default::default()
        };
        assert!(!entry.is_blank());
        assert!(ExperienceEntry::default().is_blank());
    }

    #[test]
    fn test_entry_section_path_round_trip() {
        for name in ["skills", "experiences", "projects", "educations", "certificates"] {
            let section = EntrySection::from_path(name).unwrap();
            assert_eq!(section.as_str(), name);
        }
        assert_eq!(EntrySection::from_path("hobbies"), None);
    }
}
