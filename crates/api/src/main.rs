use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};

use api::config::ApiConfig;
use api::sessions::SessionStore;
use api::{build_router, AppState};
use database::Database;
use llm_factory::FactoryConfig;
use retrieval::DocumentIndex;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = ApiConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");
    db.migrate().await.expect("Failed to run migrations");

    let index = match &config.docs_path {
        Some(path) => match DocumentIndex::load(path) {
            Ok(index) => {
                info!(documents = index.len(), path = %path, "Loaded document index");
                index.with_top_k(config.retrieval_top_k)
            }
            Err(err) => {
                warn!(error = %err, "Failed to load document index, retrieval disabled");
                DocumentIndex::empty()
            }
        },
        None => {
            info!("No docs path configured, retrieval disabled");
            DocumentIndex::empty()
        }
    };

    let factory = FactoryConfig::from_env().build();
    if factory.is_empty() {
        warn!("No LLM providers available; chat requests will be degraded");
    }

    let sessions = SessionStore::new(config.max_sessions, config.session_ttl_secs);

    let addr: SocketAddr = config.addr.parse().expect("Invalid RAGCHAT_ADDR");

    let state = AppState {
        config: Arc::new(config),
        factory: Arc::new(factory),
        index: Arc::new(index),
        db,
        sessions: Arc::new(sessions),
    };

    let app = build_router(state);

    info!(%addr, "Chat API listening");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
