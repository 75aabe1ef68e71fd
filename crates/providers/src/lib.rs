//! Content provider abstraction layer
//!
//! This crate normalizes several unrelated upstream catalogs (TMDB,
//! Consumet/AniList, MangaDex) behind one contract so callers can
//! request metadata, streams, pages and trending lists without knowing
//! which upstream served them.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │              ContentProvider trait           │
//! │  fetch_metadata(id)    -> MediaMetadata      │
//! │  fetch_trending(hint)  -> Vec<MediaMetadata> │
//! └──────────────────────────────────────────────┘
//!        △                 △                 △
//!        │                 │                 │
//! ┌──────┴───────┐ ┌───────┴────────┐ ┌──────┴─────────┐
//! │VidsrcProvider│ │ConsumetProvider│ │MangaDexProvider│
//! │ (movie/tv)   │ │    (anime)     │ │    (manga)     │
//! │ VideoProvider│ │  VideoProvider │ │  MangaProvider │
//! └──────────────┘ └────────────────┘ └────────────────┘
//! ```
//!
//! Each provider exposes exactly one extended capability: streams
//! ([`VideoProvider`]) or pages ([`MangaProvider`]). The
//! [`ProviderRegistry`] maps a [`MediaType`] tag to the right provider
//! and narrows it to the capability the caller needs.

mod adapters;
mod error;
mod provider;
mod registry;
pub mod models;

pub use adapters::{ConsumetProvider, MangaDexProvider, VidsrcProvider};
pub use error::ProviderError;
pub use models::{
    Chapter, Episode, MangaPage, MediaMetadata, MediaType, Subtitle, VideoStream,
};
pub use provider::{ContentProvider, MangaProvider, VideoProvider};
pub use registry::{ProviderRegistry, ResolvedProvider};
