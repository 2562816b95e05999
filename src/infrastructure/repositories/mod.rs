pub mod github_news_repository;
pub mod in_memory_news_repository;
pub mod news_store;

pub use github_news_repository::GitHubNewsRepository;
pub use in_memory_news_repository::InMemoryNewsRepository;
pub use news_store::{NewsStore, NewsStoreError, StoreBackend};
