pub mod handlers;
pub mod router;

pub use handlers::{AppState, ITEMS_CACHE_KEY};
pub use router::create_router;
