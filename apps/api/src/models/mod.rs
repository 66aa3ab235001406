pub mod document;
pub mod wire;

use serde::{Deserialize, Deserializer};

pub use document::{
    looks_like_url, CertificateEntry, CoverLetter, CoverLetterHeader, DocumentEnvelope,
    EducationEntry, EntrySection, ExperienceEntry, LinkField, Links, ProfileImage, ProjectEntry,
    ResumeDocument, SectionEntry, SkillEntry,
};

/// Treats an explicit JSON `null` like a missing field.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
