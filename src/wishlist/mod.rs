//! Wishlist - the listing ids a user has bookmarked.
//!
//! Entries are references only: removing a listing does not touch the
//! wishlist. Dangling ids are skipped when resolving entries against the
//! live collection (`listings`) and can be dropped explicitly with `prune`.

use std::collections::HashSet;

use tracing::{debug, error, info};

use crate::error::Result;
use crate::listing::{Listing, ListingRepository, LISTINGS_KEY};
use crate::storage::StorageService;

/// Storage key holding the wishlist ids.
pub const WISHLIST_KEY: &str = "campusbooks_wishlist";

/// Owns the ordered, duplicate-free set of bookmarked listing ids.
#[derive(Debug, Clone)]
pub struct WishlistRepository {
    storage: StorageService,
}

impl WishlistRepository {
    pub fn new(storage: StorageService) -> Self {
        Self { storage }
    }

    /// Bookmarked ids in insertion order. Storage failures are logged and
    /// yield an empty list.
    pub async fn list(&self) -> Vec<String> {
        match self.load().await {
            Ok(ids) => ids,
            Err(e) => {
                error!(error = %e, "failed to load wishlist");
                Vec::new()
            }
        }
    }

    async fn load(&self) -> Result<Vec<String>> {
        Ok(self.storage.get(WISHLIST_KEY).await?.unwrap_or_default())
    }

    pub async fn contains(&self, id: &str) -> bool {
        self.list().await.iter().any(|entry| entry == id)
    }

    /// Append `id` unless already present. Returns whether it was added.
    pub async fn add(&self, id: &str) -> Result<bool> {
        let _guard = self.storage.lock(WISHLIST_KEY).await?;
        let mut ids = self.load().await?;

        if ids.iter().any(|entry| entry == id) {
            return Ok(false);
        }
        ids.push(id.to_string());
        self.storage.set(WISHLIST_KEY, &ids).await?;
        debug!(id, "wishlist add");
        Ok(true)
    }

    /// Remove `id` if present. Returns whether it was removed.
    pub async fn remove(&self, id: &str) -> Result<bool> {
        let _guard = self.storage.lock(WISHLIST_KEY).await?;
        let mut ids = self.load().await?;

        let before = ids.len();
        ids.retain(|entry| entry != id);
        let removed = ids.len() != before;

        self.storage.set(WISHLIST_KEY, &ids).await?;
        debug!(id, removed, "wishlist remove");
        Ok(removed)
    }

    /// Add `id` if absent, remove it otherwise. Returns the new membership.
    pub async fn toggle(&self, id: &str) -> Result<bool> {
        let _guard = self.storage.lock(WISHLIST_KEY).await?;
        let mut ids = self.load().await?;

        let present = match ids.iter().position(|entry| entry == id) {
            Some(index) => {
                ids.remove(index);
                false
            }
            None => {
                ids.push(id.to_string());
                true
            }
        };
        self.storage.set(WISHLIST_KEY, &ids).await?;
        debug!(id, present, "wishlist toggle");
        Ok(present)
    }

    /// Resolve bookmarked ids to live listings, in wishlist order.
    /// Ids whose listing no longer exists are skipped; nothing is written.
    pub async fn listings(&self, listings: &ListingRepository) -> Vec<Listing> {
        let ids = self.list().await;
        if ids.is_empty() {
            return Vec::new();
        }
        let live = listings.list().await;
        ids.iter()
            .filter_map(|id| live.iter().find(|l| &l.id == id).cloned())
            .collect()
    }

    /// Drop ids whose listing no longer exists. Returns how many were dropped.
    /// Holds the listings lock, then the wishlist lock.
    pub async fn prune(&self, listings: &ListingRepository) -> Result<usize> {
        let _listings_guard = listings.storage().lock(LISTINGS_KEY).await?;
        let _guard = self.storage.lock(WISHLIST_KEY).await?;
        let mut ids = self.load().await?;
        if ids.is_empty() {
            return Ok(0);
        }

        let live: HashSet<String> = listings
            .load_locked()
            .await?
            .into_iter()
            .map(|l| l.id)
            .collect();
        let before = ids.len();
        ids.retain(|id| live.contains(id));
        let dropped = before - ids.len();

        if dropped > 0 {
            self.storage.set(WISHLIST_KEY, &ids).await?;
            info!(dropped, "pruned dangling wishlist entries");
        }
        Ok(dropped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repos() -> (WishlistRepository, ListingRepository) {
        let storage = StorageService::in_memory();
        (
            WishlistRepository::new(storage.clone()),
            ListingRepository::new(storage),
        )
    }

    #[tokio::test]
    async fn empty_by_default() {
        let (wishlist, _) = repos();
        assert!(wishlist.list().await.is_empty());
    }

    #[tokio::test]
    async fn add_is_idempotent() {
        let (wishlist, _) = repos();
        assert!(wishlist.add("seed-1").await.unwrap());
        assert!(!wishlist.add("seed-1").await.unwrap());
        assert_eq!(wishlist.list().await, vec!["seed-1".to_string()]);
    }

    #[tokio::test]
    async fn keeps_insertion_order() {
        let (wishlist, _) = repos();
        for id in ["seed-3", "seed-1", "seed-2"] {
            wishlist.add(id).await.unwrap();
        }
        assert_eq!(wishlist.list().await, vec!["seed-3", "seed-1", "seed-2"]);
    }

    #[tokio::test]
    async fn remove_absent_is_not_an_error() {
        let (wishlist, _) = repos();
        wishlist.add("seed-1").await.unwrap();
        assert!(!wishlist.remove("seed-9").await.unwrap());
        assert!(wishlist.remove("seed-1").await.unwrap());
        assert!(!wishlist.contains("seed-1").await);
    }

    #[tokio::test]
    async fn toggle_flips_membership() {
        let (wishlist, _) = repos();
        assert!(wishlist.toggle("seed-4").await.unwrap());
        assert!(wishlist.contains("seed-4").await);
        assert!(!wishlist.toggle("seed-4").await.unwrap());
        assert!(!wishlist.contains("seed-4").await);
    }

    #[tokio::test]
    async fn listings_skip_dangling_ids() {
        let (wishlist, listings) = repos();
        wishlist.add("seed-2").await.unwrap();
        wishlist.add("seed-5").await.unwrap();
        listings.remove("seed-2").await.unwrap();

        let resolved = wishlist.listings(&listings).await;
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].id, "seed-5");
        // Lazy filtering leaves the stored ids alone.
        assert_eq!(wishlist.list().await.len(), 2);
    }

    #[tokio::test]
    async fn prune_drops_dangling_ids() {
        let (wishlist, listings) = repos();
        wishlist.add("seed-2").await.unwrap();
        wishlist.add("gone").await.unwrap();

        assert_eq!(wishlist.prune(&listings).await.unwrap(), 1);
        assert_eq!(wishlist.list().await, vec!["seed-2".to_string()]);
        assert_eq!(wishlist.prune(&listings).await.unwrap(), 0);
    }
}
