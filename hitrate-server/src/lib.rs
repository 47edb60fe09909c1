pub mod config;
pub mod core;
pub mod db;
pub mod server;

// Re-export commonly used types
pub use config::ServerConfig;
pub use core::{
    CacheAsideAccessor, CacheConfig, CacheStats, Clock, DataSource, HitrateError, Item, KeyStatus,
    ManualClock, SystemClock,
};
pub use db::SqliteItemRepository;
pub use server::{AppState, ITEMS_CACHE_KEY, create_router};
