use std::sync::Arc;

use crate::config::Config;
use crate::generation::generator::ResumeGenerator;
use crate::profiles::ProfileStore;
use crate::render::FontStore;
use crate::session::EditorSession;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub session: Arc<EditorSession>,
    pub profiles: Arc<ProfileStore>,
    /// Loaded once at startup; read-only afterwards.
    pub fonts: Arc<FontStore>,
    /// `None` when no LLM API key is configured.
    pub generator: Option<Arc<dyn ResumeGenerator>>,
}

impl AppState {
    /// State with an empty document, in-memory profiles and no embedded fonts.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            session: Arc::new(EditorSession::new()),
            profiles: Arc::new(ProfileStore::in_memory()),
            fonts: Arc::new(FontStore::empty()),
            generator: None,
        }
    }
}
