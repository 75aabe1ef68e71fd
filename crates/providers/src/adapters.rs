//! Upstream-specific provider adapters

mod consumet_adapter;
mod mangadex_adapter;
mod vidsrc_adapter;

pub use consumet_adapter::ConsumetProvider;
pub use mangadex_adapter::MangaDexProvider;
pub use vidsrc_adapter::VidsrcProvider;
