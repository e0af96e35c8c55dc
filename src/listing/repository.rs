//! ListingRepository - the authoritative listing collection.

use tracing::{debug, error, info};
use uuid::Uuid;

use super::{seed_catalog, Listing, ListingFilter, ListingPatch, NewListing};
use crate::error::Result;
use crate::storage::StorageService;

/// Storage key holding the ordered listing collection.
pub const LISTINGS_KEY: &str = "campusbooks_listings";

/// Owns the listing collection stored under `LISTINGS_KEY`.
///
/// The collection is kept newest-first. On first use (key absent) it is
/// seeded with the built-in catalog; an explicitly stored empty collection
/// is left alone. Every write holds the key lock for its whole
/// read-modify-write cycle.
#[derive(Debug, Clone)]
pub struct ListingRepository {
    storage: StorageService,
}

impl ListingRepository {
    pub fn new(storage: StorageService) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &StorageService {
        &self.storage
    }

    /// Current listings, newest first. Seeds the catalog if nothing has been
    /// stored yet. Storage failures are logged and yield an empty list.
    pub async fn list(&self) -> Vec<Listing> {
        match self.snapshot().await {
            Ok(listings) => listings,
            Err(e) => {
                error!(error = %e, "failed to load listings");
                Vec::new()
            }
        }
    }

    /// Like `list`, but storage failures are returned to the caller.
    pub async fn snapshot(&self) -> Result<Vec<Listing>> {
        if let Some(listings) = self.storage.get(LISTINGS_KEY).await? {
            return Ok(listings);
        }
        let _guard = self.storage.lock(LISTINGS_KEY).await?;
        self.load_locked().await
    }

    /// Read the collection, seeding it if absent. Caller holds the key lock.
    pub(crate) async fn load_locked(&self) -> Result<Vec<Listing>> {
        if let Some(listings) = self.storage.get(LISTINGS_KEY).await? {
            return Ok(listings);
        }
        let catalog = seed_catalog();
        self.storage.set(LISTINGS_KEY, &catalog).await?;
        info!(count = catalog.len(), "seeded listing catalog");
        Ok(catalog)
    }

    pub async fn get(&self, id: &str) -> Option<Listing> {
        self.list().await.into_iter().find(|l| l.id == id)
    }

    /// Create a listing with a fresh id and Available status, prepended to
    /// the collection.
    pub async fn add(&self, new: NewListing) -> Result<Listing> {
        let _guard = self.storage.lock(LISTINGS_KEY).await?;
        let mut listings = self.load_locked().await?;

        let listing = new.into_listing(Uuid::new_v4().to_string());
        listings.insert(0, listing.clone());
        self.storage.set(LISTINGS_KEY, &listings).await?;

        debug!(id = %listing.id, title = %listing.title, "listing added");
        Ok(listing)
    }

    /// Merge `patch` into the listing with `id`. Returns None (and writes
    /// nothing) if no such listing exists.
    pub async fn update(&self, id: &str, patch: ListingPatch) -> Result<Option<Listing>> {
        let _guard = self.storage.lock(LISTINGS_KEY).await?;
        let mut listings = self.load_locked().await?;

        let Some(listing) = listings.iter_mut().find(|l| l.id == id) else {
            debug!(id, "update target not found");
            return Ok(None);
        };
        patch.apply_to(listing);
        let updated = listing.clone();

        self.storage.set(LISTINGS_KEY, &listings).await?;
        debug!(id, "listing updated");
        Ok(Some(updated))
    }

    /// Delete the listing with `id`. The collection is written back either
    /// way; returns whether anything was removed.
    pub async fn remove(&self, id: &str) -> Result<bool> {
        let _guard = self.storage.lock(LISTINGS_KEY).await?;
        let mut listings = self.load_locked().await?;

        let before = listings.len();
        listings.retain(|l| l.id != id);
        let removed = listings.len() != before;

        self.storage.set(LISTINGS_KEY, &listings).await?;
        debug!(id, removed, "listing remove");
        Ok(removed)
    }

    /// Flip Available <-> Sold for the listing with `id`.
    pub async fn toggle_status(&self, id: &str) -> Result<Option<Listing>> {
        let _guard = self.storage.lock(LISTINGS_KEY).await?;
        let mut listings = self.load_locked().await?;

        let Some(listing) = listings.iter_mut().find(|l| l.id == id) else {
            debug!(id, "toggle target not found");
            return Ok(None);
        };
        listing.status = listing.status.toggled();
        let toggled = listing.clone();

        self.storage.set(LISTINGS_KEY, &listings).await?;
        debug!(id, status = %toggled.status, "listing status toggled");
        Ok(Some(toggled))
    }

    /// Listings posted with the given contact.
    pub async fn by_owner(&self, contact: &str) -> Vec<Listing> {
        self.list()
            .await
            .into_iter()
            .filter(|l| l.contact == contact)
            .collect()
    }

    /// Other listings sharing the category or the author of `listing`.
    pub async fn similar_to(&self, listing: &Listing) -> Vec<Listing> {
        self.list()
            .await
            .into_iter()
            .filter(|l| {
                l.id != listing.id
                    && (l.category == listing.category || l.author == listing.author)
            })
            .collect()
    }

    pub async fn search(&self, filter: &ListingFilter) -> Vec<Listing> {
        self.list()
            .await
            .into_iter()
            .filter(|l| filter.matches(l))
            .collect()
    }

    /// Drop the stored collection. The next read seeds the catalog again.
    pub async fn clear(&self) -> Result<()> {
        let _guard = self.storage.lock(LISTINGS_KEY).await?;
        self.storage.remove(LISTINGS_KEY).await?;
        info!("listings cleared");
        Ok(())
    }
}
