pub mod storage;
pub mod store;
pub mod sync_log;

pub use storage::{KeyValueStorage, MemoryStorage, SqliteStorage};
pub use store::{DesignSystemPatch, DesignSystemStore, StoreStats, DESIGN_SYSTEMS_KEY};
pub use sync_log::{SyncHistoryEntry, SyncLog, SyncSettings, SyncStatus, FIGMA_SYNC_KEY};
