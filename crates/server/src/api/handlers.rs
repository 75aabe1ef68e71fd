pub mod media;
pub mod progress;
