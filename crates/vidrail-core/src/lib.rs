pub mod error;
pub mod history;
pub mod projector;
pub mod storage;

pub use error::{PersistenceError, ProjectError};
pub use history::{HistoryStore, HISTORY_KEY, HISTORY_LIMIT};
pub use projector::{avatar_url, format_count, project, relative_age};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
