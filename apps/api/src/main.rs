mod bullets;
mod config;
mod cover_letter;
mod errors;
mod generation;
mod i18n;
mod layout;
mod llm_client;
mod models;
mod profiles;
mod render;
mod routes;
mod session;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::generation::generator::{LlmResumeGenerator, ResumeGenerator};
use crate::llm_client::LlmClient;
use crate::profiles::ProfileStore;
use crate::render::{FontStore, GlyphSubset};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CV Forge API v{}", env!("CARGO_PKG_VERSION"));

    let mut state = AppState::new(config.clone());

    // Embedded fonts; built-in PDF families are used when none are found
    match &config.font_dir {
        Some(dir) => {
            let fonts = FontStore::load(dir);
            if !fonts.has(GlyphSubset::Latin) {
                warn!("NotoSans Latin pair missing from {}; PDFs may use Helvetica", dir.display());
            }
            state.fonts = Arc::new(fonts);
        }
        None => warn!("FONT_DIR not set; PDFs will use built-in fonts"),
    }
    info!("PDF font family: {:?}", config.pdf_font_family);

    if let Some(path) = &config.profile_store_path {
        state.profiles = Arc::new(ProfileStore::open(path.clone()).await);
    }

    // AI generation is optional
    match LlmClient::from_config(&config)? {
        Some(llm) => {
            info!("LLM client initialized (model: {})", llm.model());
            let generator: Arc<dyn ResumeGenerator> = Arc::new(LlmResumeGenerator::new(llm));
            state.generator = Some(generator);
        }
        None => info!("LLM_API_KEY not set; AI generation disabled"),
    }

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
