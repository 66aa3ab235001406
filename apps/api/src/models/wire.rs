//! Flat JSON shape of the `cv` object, as written by the browser client.
//!
//! Links travel as `linkedin` + `linkedin_placeholder` pairs and the profile
//! image as base64 text. `ResumeDocument` converts through this type in both
//! directions via `#[serde(from, into)]`.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::document::{
    CertificateEntry, EducationEntry, ExperienceEntry, LinkField, Links, ProfileImage,
    ProjectEntry, ResumeDocument, SkillEntry,
};
use crate::models::nullable;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CvWire {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub email: String,
    #[serde(default, deserialize_with = "nullable")]
    pub phone: String,
    #[serde(default, deserialize_with = "nullable")]
    pub location: String,
    #[serde(default, deserialize_with = "nullable")]
    pub linkedin: String,
    #[serde(default, deserialize_with = "nullable", rename = "linkedin_placeholder")]
    pub linkedin_placeholder: String,
    #[serde(default, deserialize_with = "nullable")]
    pub github: String,
    #[serde(default, deserialize_with = "nullable", rename = "github_placeholder")]
    pub github_placeholder: String,
    #[serde(default, deserialize_with = "nullable")]
    pub website: String,
    #[serde(default, deserialize_with = "nullable", rename = "website_placeholder")]
    pub website_placeholder: String,
    #[serde(default, deserialize_with = "nullable")]
    pub summary: String,
    #[serde(default, deserialize_with = "nullable")]
    pub skills: Vec<SkillEntry>,
    #[serde(default, deserialize_with = "nullable")]
    pub experiences: Vec<ExperienceEntry>,
    #[serde(default, deserialize_with = "nullable")]
    pub projects: Vec<ProjectEntry>,
    #[serde(default, deserialize_with = "nullable")]
    pub educations: Vec<EducationEntry>,
    #[serde(default, deserialize_with = "nullable")]
    pub certificates: Vec<CertificateEntry>,
    /// Base64 image bytes; a `data:<mime>;base64,` prefix is accepted on import.
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub profile_image: String,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub profile_image_type: String,
    #[serde(default, deserialize_with = "nullable")]
    pub language: String,
}

impl From<CvWire> for ResumeDocument {
    fn from(wire: CvWire) -> Self {
        let profile_image = decode_image(&wire.profile_image, &wire.profile_image_type);
        ResumeDocument {
            name: wire.name,
            email: wire.email,
            phone: wire.phone,
            location: wire.location,
            links: Links {
                linkedin: LinkField::new(wire.linkedin, wire.linkedin_placeholder),
                github: LinkField::new(wire.github, wire.github_placeholder),
                website: LinkField::new(wire.website, wire.website_placeholder),
            },
            summary: wire.summary,
            skills: at_least_one(wire.skills),
            experiences: at_least_one(wire.experiences),
            projects: at_least_one(wire.projects),
            educations: at_least_one(wire.educations),
            certificates: at_least_one(wire.certificates),
            profile_image,
            language: wire.language,
        }
    }
}

impl From<ResumeDocument> for CvWire {
    fn from(doc: ResumeDocument) -> Self {
        let (profile_image, profile_image_type) = encode_image(doc.profile_image.as_ref());
        CvWire {
            name: doc.name,
            email: doc.email,
            phone: doc.phone,
            location: doc.location,
            linkedin: doc.links.linkedin.url,
            linkedin_placeholder: doc.links.linkedin.display_text,
            github: doc.links.github.url,
            github_placeholder: doc.links.github.display_text,
            website: doc.links.website.url,
            website_placeholder: doc.links.website.display_text,
            summary: doc.summary,
            skills: doc.skills,
            experiences: doc.experiences,
            projects: doc.projects,
            educations: doc.educations,
            certificates: doc.certificates,
            profile_image,
            profile_image_type,
            language: doc.language,
        }
    }
}

fn at_least_one<T: Default>(mut entries: Vec<T>) -> Vec<T> {
    if entries.is_empty() {
        entries.push(T::default());
    }
    entries
}

/// `(base64, mime)` pair for the image fields; empty strings when absent.
pub(crate) fn encode_image(image: Option<&ProfileImage>) -> (String, String) {
    match image {
        Some(image) => (BASE64.encode(&image.data), image.mime_type.clone()),
        None => (String::new(), String::new()),
    }
}

/// Decodes the image field. Empty or undecodable data means "no image".
pub(crate) fn decode_image(encoded: &str, mime_type: &str) -> Option<ProfileImage> {
    let encoded = encoded.trim();
    if encoded.is_empty() {
        return None;
    }

    // data:image/png;base64,AAAA
    let (data_url_mime, payload) = match encoded
        .strip_prefix("data:")
        .and_then(|rest| rest.split_once(";base64,"))
    {
        Some((mime, payload)) => (Some(mime), payload),
        None => (None, encoded),
    };

    match BASE64.decode(payload) {
        Ok(data) if !data.is_empty() => {
            let mime_type = if mime_type.trim().is_empty() {
                data_url_mime.unwrap_or("image/png").to_string()
            } else {
                mime_type.trim().to_string()
            };
            Some(ProfileImage { data, mime_type })
        }
        Ok(_) => None,
        Err(e) => {
            warn!("Ignoring undecodable profile image: {e}");
            None
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bullets::parse_bullets;
    use crate::models::document::{CoverLetter, DocumentEnvelope};

    fn full_document() -> ResumeDocument {
        ResumeDocument {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "+44 20 0000 0000".to_string(),
            location: "London".to_string(),
            links: Links {
                linkedin: LinkField::new("https://linkedin.com/in/ada", "ada-l"),
                github: LinkField::new("https://github.com/ada", ""),
                website: LinkField::default(),
            },
            summary: "Analyst of engines.".to_string(),
            skills: vec![SkillEntry {
                skill: "Math".to_string(),
                description: "Analysis, notes".to_string(),
            }],
            experiences: vec![ExperienceEntry {
                position: "Collaborator".to_string(),
                company: "Analytical Engine".to_string(),
                location: "London".to_string(),
                dates: "1842 - 1843".to_string(),
                bullets: parse_bullets(
                    "# Notes on the engine\n- Wrote Note G\n+ Bernoulli numbers",
                ),
            }],
            projects: vec![ProjectEntry::default()],
            educations: vec![EducationEntry::default()],
            certificates: vec![CertificateEntry::default()],
            profile_image: Some(ProfileImage {
                data: vec![0x89, b'P', b'N', b'G', 1, 2, 3],
                mime_type: "image/png".to_string(),
            }),
            language: "English".to_string(),
        }
    }

    #[test]
    fn test_document_round_trips_through_json() {
        let doc = full_document();
        let json = serde_json::to_string(&doc).unwrap();
        let back: ResumeDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_empty_document_round_trips() {
        let doc = ResumeDocument::default();
        let json = serde_json::to_string(&doc).unwrap();
        let back: ResumeDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_wire_uses_flat_link_fields() {
        let value = serde_json::to_value(full_document()).unwrap();
        assert_eq!(value["linkedin"], "https://linkedin.com/in/ada");
        assert_eq!(value["linkedin_placeholder"], "ada-l");
        assert_eq!(value["github_placeholder"], "");
        assert_eq!(value["profileImageType"], "image/png");
        assert_eq!(
            value["experiences"][0]["bullets"]["description"],
            "Notes on the engine"
        );
    }

    #[test]
    fn test_legacy_string_bullets_are_normalised_on_import() {
        let json = r##"{
            "name": "Ada",
            "experiences": [{"position": "Dev", "bullets": "# Team\n- one\n+ two"}]
        }"##;
        let doc: ResumeDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.experiences[0].bullets.description, "Team");
        assert_eq!(doc.experiences[0].bullets.items, vec!["- one", "+ two"]);
    }

    #[test]
    fn test_missing_collections_are_padded() {
        let doc: ResumeDocument = serde_json::from_str(r#"{"name": "Ada", "skills": []}"#).unwrap();
        assert_eq!(doc.skills.len(), 1);
        assert_eq!(doc.certificates.len(), 1);
        assert!(doc.profile_image.is_none());
    }

    #[test]
    fn test_nulls_are_treated_as_empty() {
        let json = r#"{"name": null, "github": null,
                       "projects": [{"projectName": null, "bullets": null}]}"#;
        let doc: ResumeDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.name, "");
        assert!(doc.links.github.is_empty());
        assert!(doc.projects[0].bullets.is_empty());
    }

    #[test]
    fn test_data_url_image_is_decoded() {
        let json = r#"{"profileImage": "data:image/jpeg;base64,AAEC"}"#;
        let doc: ResumeDocument = serde_json::from_str(json).unwrap();
        let image = doc.profile_image.unwrap();
        assert_eq!(image.data, vec![0, 1, 2]);
        assert_eq!(image.mime_type, "image/jpeg");
    }

    #[test]
    fn test_garbage_image_is_absent() {
        let doc: ResumeDocument =
            serde_json::from_str(r#"{"profileImage": "%%% not base64 %%%"}"#).unwrap();
        assert!(doc.profile_image.is_none());
    }

    #[test]
    fn test_envelope_requires_cv() {
        let missing = serde_json::from_str::<DocumentEnvelope>(r#"{"coverLetter": {}}"#);
        assert!(missing.is_err());

        let envelope: DocumentEnvelope =
            serde_json::from_str(r#"{"cv": {"name": "Ada"}}"#).unwrap();
        assert_eq!(envelope.cv.name, "Ada");
        assert_eq!(envelope.cover_letter, CoverLetter::default());
    }
}
