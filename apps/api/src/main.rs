mod answers;
mod autofill;
mod config;
mod db;
mod errors;
mod field_mapping;
mod llm_client;
mod matching;
mod models;
mod questions;
mod routes;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::answers::AnswerLearningEngine;
use crate::config::Config;
use crate::db::create_pool;
use crate::field_mapping::ai::LlmFieldMapper;
use crate::field_mapping::FieldMappingEngine;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{AnswerStore, InMemoryStore, MappingStore, PgStore};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting autofill API v{}", env!("CARGO_PKG_VERSION"));

    let (mapping_store, answer_store) = match &config.database_url {
        Some(url) => {
            let store = Arc::new(PgStore::new(create_pool(url).await?));
            (
                store.clone() as Arc<dyn MappingStore>,
                store as Arc<dyn AnswerStore>,
            )
        }
        None => {
            warn!("DATABASE_URL not set; learned mappings and answers are kept in memory only");
            let store = Arc::new(InMemoryStore::new());
            (
                store.clone() as Arc<dyn MappingStore>,
                store as Arc<dyn AnswerStore>,
            )
        }
    };

    let mut mappings = FieldMappingEngine::new(mapping_store);
    match &config.anthropic_api_key {
        Some(key) => {
            let llm = LlmClient::new(key.clone(), config.ai_timeout)?;
            info!(
                "AI field mapping enabled (model: {}, timeout: {}s)",
                llm_client::MODEL,
                config.ai_timeout.as_secs()
            );
            mappings = mappings.with_ai(Arc::new(LlmFieldMapper::new(llm)), config.ai_timeout);
        }
        None => info!("ANTHROPIC_API_KEY not set; field mapping uses heuristics only"),
    }

    let state = AppState {
        config: config.clone(),
        mappings,
        answers: AnswerLearningEngine::new(answer_store),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
