//! Editor session: the single owner of the document being edited.
//!
//! Handlers never hold the document across an await: they take a snapshot,
//! work on it, and write back whole values. Every mutation bumps a revision
//! so a preview rendered from an older snapshot is never stored as current.

use bytes::Bytes;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::errors::ImportError;
use crate::models::{CoverLetter, DocumentEnvelope, EntrySection, ResumeDocument};
use crate::profiles::Profile;

/// Result of a delete request against an entry collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Removed { remaining: usize },
    /// The section's only entry is never removed.
    LastEntry,
    OutOfRange { len: usize },
}

#[derive(Debug, Default)]
struct SessionState {
    envelope: DocumentEnvelope,
    revision: u64,
    preview: Option<(u64, Bytes)>,
}

impl SessionState {
    fn touch(&mut self) {
        self.revision += 1;
        self.preview = None;
    }
}

#[derive(Debug, Default)]
pub struct EditorSession {
    state: RwLock<SessionState>,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the whole envelope.
    pub async fn snapshot(&self) -> DocumentEnvelope {
        self.state.read().await.envelope.clone()
    }

    /// Snapshot of the résumé plus the revision it was taken at.
    pub async fn get_document(&self) -> (u64, ResumeDocument) {
        let state = self.state.read().await;
        (state.revision, state.envelope.cv.clone())
    }

    pub async fn cover_letter(&self) -> CoverLetter {
        self.state.read().await.envelope.cover_letter.clone()
    }

    pub async fn replace(&self, envelope: DocumentEnvelope) {
        let mut state = self.state.write().await;
        state.envelope = envelope;
        state.touch();
    }

    /// Parses `bytes` as a document envelope and replaces the session with it.
    /// On any parse failure the session is left untouched.
    pub async fn import_json(&self, bytes: &[u8]) -> Result<(), ImportError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(ImportError::Empty);
        }
        let envelope: DocumentEnvelope = serde_json::from_slice(bytes)?;
        info!(name = %envelope.cv.name, "Document imported");
        self.replace(envelope).await;
        Ok(())
    }

    /// Pretty-printed JSON of the current envelope.
    pub async fn export_json(&self) -> serde_json::Result<Vec<u8>> {
        let state = self.state.read().await;
        serde_json::to_vec_pretty(&state.envelope)
    }

    /// Appends a blank entry; returns the new entry count.
    pub async fn add_entry(&self, section: EntrySection) -> usize {
        let mut state = self.state.write().await;
        state.envelope.cv.push_blank_entry(section);
        state.touch();
        state.envelope.cv.entry_count(section)
    }

    pub async fn delete_entry(&self, section: EntrySection, index: usize) -> DeleteOutcome {
        let mut state = self.state.write().await;
        let len = state.envelope.cv.entry_count(section);
        if index >= len {
            return DeleteOutcome::OutOfRange { len };
        }
        if len == 1 {
            warn!(section = section.as_str(), "Refusing to delete the last entry");
            return DeleteOutcome::LastEntry;
        }
        state.envelope.cv.remove_entry(section, index);
        state.touch();
        DeleteOutcome::Removed { remaining: len - 1 }
    }

    /// Overwrites the personal fields with a saved profile.
    pub async fn apply_profile(&self, profile: &Profile) {
        let mut state = self.state.write().await;
        profile.apply_to(&mut state.envelope.cv);
        state.touch();
    }

    /// Replaces résumé and cover letter with AI output, keeping the current
    /// profile image. The model output carries no language, so a blank one
    /// becomes `language` (the generation target), or the previous language
    /// when that is blank too.
    pub async fn apply_generated(
        &self,
        mut generated: DocumentEnvelope,
        language: &str,
    ) -> DocumentEnvelope {
        let mut state = self.state.write().await;
        generated.cv.profile_image = state.envelope.cv.profile_image.take();
        if generated.cv.language.trim().is_empty() {
            generated.cv.language = if language.trim().is_empty() {
                std::mem::take(&mut state.envelope.cv.language)
            } else {
                language.trim().to_string()
            };
        }
        state.envelope = generated;
        state.touch();
        state.envelope.clone()
    }

    /// Stores a rendered preview if the document has not changed since
    /// `revision` was read.
    pub async fn store_preview(&self, revision: u64, pdf: Bytes) -> bool {
        let mut state = self.state.write().await;
        if state.revision != revision {
            return false;
        }
        state.preview = Some((revision, pdf));
        true
    }

    pub async fn preview(&self) -> Option<Bytes> {
        let state = self.state.read().await;
        state
            .preview
            .as_ref()
            .filter(|(rev, _)| *rev == state.revision)
            .map(|(_, pdf)| pdf.clone())
    }
}
