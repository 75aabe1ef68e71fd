mod progress_sync;

pub use progress_sync::ProgressSyncService;
