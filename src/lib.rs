//! Local persistence and marketplace statistics for a campus book exchange.
//!
//! - [`storage`]: key/value storage of JSON values behind an explicit
//!   [`StorageService`] handle.
//! - [`listing`]: book listings and the [`ListingRepository`] that seeds and
//!   mutates them.
//! - [`wishlist`]: bookmarked listing ids.
//! - [`stats`]: the pure [`StatsEngine`].

pub mod config;
pub mod error;
#[cfg(feature = "http")]
pub mod http;
pub mod listing;
pub mod stats;
pub mod storage;
pub mod wishlist;

pub use config::{Config, ConfigError};
pub use error::{Result, StorageError};
pub use listing::{
    Listing, ListingFilter, ListingPatch, ListingRepository, ListingStatus, ListingType,
    NewListing,
};
pub use stats::{BreakdownEntry, StatsEngine, StatsReport};
pub use storage::{FileStorage, InMemoryStorage, StorageBackend, StorageService};
pub use wishlist::WishlistRepository;
