mod watch_progress;

pub use watch_progress::WatchProgressRepository;
