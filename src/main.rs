use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use discord_news_relay::controllers::news::NewsController;
use discord_news_relay::domain::news::NewsService;
use discord_news_relay::infrastructure::config::{Config, LogFormat, StoreConfig};
use discord_news_relay::infrastructure::github::GitHubContentsClient;
use discord_news_relay::infrastructure::http::start_http_server;
use discord_news_relay::infrastructure::repositories::{
    GitHubNewsRepository, InMemoryNewsRepository, NewsStore,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting Discord news relay on {}:{}",
        config.host,
        config.port
    );

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate the feed store selected by configuration
    let store: Arc<dyn NewsStore> = match &config.store {
        StoreConfig::Memory => {
            tracing::info!("Using in-memory news store (resets on restart)");
            Arc::new(InMemoryNewsRepository::seeded())
        }
        StoreConfig::GitHub(github) => {
            tracing::info!(
                repository = %github.repository,
                path = %github.file_path,
                branch = ?github.branch,
                "Using GitHub-backed news store"
            );
            let client = GitHubContentsClient::new(
                &github.api_url,
                github.repository.clone(),
                github.token.clone(),
            )?;
            Arc::new(GitHubNewsRepository::new(
                client,
                github.file_path.clone(),
                github.branch.clone(),
            ))
        }
    };

    // 2. Instantiate services and controllers
    let news_service = Arc::new(NewsService::new(store));
    let news_controller = Arc::new(NewsController::new(news_service));

    // Start HTTP server
    start_http_server(Arc::new(config), news_controller).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "discord_news_relay=debug,tower_http=debug".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
