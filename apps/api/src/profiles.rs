//! Personal-profile slots.
//!
//! A fixed number of slots, each holding the personal subset of a document
//! (contact fields, links, image, language) so it can be stamped onto a new
//! résumé. Last write wins. Slots persist to a JSON file when configured.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::models::wire::{decode_image, encode_image};
use crate::models::{nullable, LinkField, Links, ResumeDocument};

pub const SLOT_COUNT: usize = 7;

/// Maps any requested index onto a valid slot.
pub fn clamp_slot(slot: i64) -> usize {
    slot.clamp(0, SLOT_COUNT as i64 - 1) as usize
}

/// Stored personal fields, in the same flat shape the document JSON uses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
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
    pub profile_image: String,
    #[serde(default, deserialize_with = "nullable")]
    pub profile_image_type: String,
    #[serde(default, deserialize_with = "nullable")]
    pub language: String,
}

impl Profile {
    /// Copies the personal fields out of `doc`.
    pub fn capture(doc: &ResumeDocument) -> Self {
        let (profile_image, profile_image_type) = encode_image(doc.profile_image.as_ref());
        Self {
            name: doc.name.clone(),
            email: doc.email.clone(),
            phone: doc.phone.clone(),
            location: doc.location.clone(),
            linkedin: doc.links.linkedin.url.clone(),
            linkedin_placeholder: doc.links.linkedin.display_text.clone(),
            github: doc.links.github.url.clone(),
            github_placeholder: doc.links.github.display_text.clone(),
            website: doc.links.website.url.clone(),
            website_placeholder: doc.links.website.display_text.clone(),
            profile_image,
            profile_image_type,
            language: doc.language.clone(),
        }
    }

    /// Overwrites the personal fields of `doc`; sections are left alone.
    pub fn apply_to(&self, doc: &mut ResumeDocument) {
        doc.name = self.name.clone();
        doc.email = self.email.clone();
        doc.phone = self.phone.clone();
        doc.location = self.location.clone();
        doc.links = Links {
            linkedin: LinkField::new(self.linkedin.clone(), self.linkedin_placeholder.clone()),
            github: LinkField::new(self.github.clone(), self.github_placeholder.clone()),
            website: LinkField::new(self.website.clone(), self.website_placeholder.clone()),
        };
        doc.profile_image = decode_image(&self.profile_image, &self.profile_image_type);
        doc.language = self.language.clone();
    }

    /// `"{name} - {language}"`, as shown in the slot picker.
    pub fn label(&self) -> String {
        format!("{} - {}", self.name, self.language)
    }
}

/// A slot as read from disk: any object is a profile, anything else is empty.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredSlot {
    Filled(Profile),
    Empty(serde::de::IgnoredAny),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotLabel {
    pub slot: usize,
    pub label: String,
    pub occupied: bool,
}

pub struct ProfileStore {
    slots: RwLock<Vec<Option<Profile>>>,
    path: Option<PathBuf>,
}

impl ProfileStore {
    pub fn in_memory() -> Self {
        Self {
            slots: RwLock::new(vec![None; SLOT_COUNT]),
            path: None,
        }
    }

    /// Opens the store backed by `path`. A missing file starts empty; an
    /// unreadable or malformed one is logged and replaced by empty slots.
    pub async fn open(path: PathBuf) -> Self {
        let slots = match tokio::fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice::<Vec<StoredSlot>>(&bytes) {
                Ok(stored) => {
                    let mut slots: Vec<Option<Profile>> = stored
                        .into_iter()
                        .take(SLOT_COUNT)
                        .map(|slot| match slot {
                            StoredSlot::Filled(profile) => Some(profile),
                            StoredSlot::Empty(_) => None,
                        })
                        .collect();
                    slots.resize(SLOT_COUNT, None);
                    info!(path = %path.display(), "Profile slots loaded");
                    slots
                }
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        "Profile store is malformed, starting empty: {e}"
                    );
                    vec![None; SLOT_COUNT]
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => vec![None; SLOT_COUNT],
            Err(e) => {
                warn!(path = %path.display(), "Profile store is unreadable, starting empty: {e}");
                vec![None; SLOT_COUNT]
            }
        };
        Self {
            slots: RwLock::new(slots),
            path: Some(path),
        }
    }

    pub async fn labels(&self) -> Vec<SlotLabel> {
        self.slots
            .read()
            .await
            .iter()
            .enumerate()
            .map(|(slot, profile)| SlotLabel {
                slot,
                label: profile
                    .as_ref()
                    .map_or_else(|| (slot + 1).to_string(), Profile::label),
                occupied: profile.is_some(),
            })
            .collect()
    }

    pub async fn get(&self, slot: usize) -> Option<Profile> {
        self.slots.read().await.get(slot).cloned().flatten()
    }

    /// Fills a slot. Memory only changes once the store file is written.
    pub async fn save(&self, slot: usize, profile: Profile) -> Result<()> {
        let mut slots = self.slots.write().await;
        let mut next = slots.clone();
        if let Some(entry) = next.get_mut(slot) {
            *entry = Some(profile);
        }
        self.persist(&next).await?;
        *slots = next;
        Ok(())
    }

    /// Clears a slot; returns whether it held a profile. A failed write
    /// leaves the slot as it was.
    pub async fn delete(&self, slot: usize) -> Result<bool> {
        let mut slots = self.slots.write().await;
        let mut next = slots.clone();
        let existed = next.get_mut(slot).and_then(Option::take).is_some();
        self.persist(&next).await?;
        *slots = next;
        Ok(existed)
    }

    async fn persist(&self, slots: &[Option<Profile>]) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let json = serde_json::to_vec_pretty(slots).context("Failed to serialise profile slots")?;
        tokio::fs::write(path, json)
            .await
            .with_context(|| format!("Failed to write profile store {}", path.display()))
    }
}
