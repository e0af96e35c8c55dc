#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use campus_books::storage::{InMemoryStorage, StorageBackend};
use campus_books::{
    ListingRepository, NewListing, Result, StorageError, StorageService, WishlistRepository,
};

/// In-memory backend whose reads and writes can be switched to fail.
#[derive(Clone, Default)]
pub struct FlakyStorage {
    inner: InMemoryStorage,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
}

impl FlakyStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check(&self, flag: &AtomicBool, key: &str) -> Result<()> {
        if flag.load(Ordering::SeqCst) {
            return Err(StorageError::Io {
                key: key.to_string(),
                message: "injected failure".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl StorageBackend for FlakyStorage {
    async fn get_raw(&self, key: &str) -> Result<Option<String>> {
        self.check(&self.fail_reads, key)?;
        self.inner.get_raw(key).await
    }

    async fn set_raw(&self, key: &str, value: String) -> Result<()> {
        self.check(&self.fail_writes, key)?;
        self.inner.set_raw(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.check(&self.fail_writes, key)?;
        self.inner.remove(key).await
    }

    async fn clear(&self) -> Result<()> {
        self.check(&self.fail_writes, "*")?;
        self.inner.clear().await
    }

    async fn keys(&self) -> Result<Vec<String>> {
        self.check(&self.fail_reads, "*")?;
        self.inner.keys().await
    }
}

pub struct Marketplace {
    pub storage: StorageService,
    pub listings: ListingRepository,
    pub wishlist: WishlistRepository,
}

impl Marketplace {
    pub fn new(storage: StorageService) -> Self {
        Self {
            listings: ListingRepository::new(storage.clone()),
            wishlist: WishlistRepository::new(storage.clone()),
            storage,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(StorageService::in_memory())
    }
}

pub fn textbook(title: &str, price: f64) -> NewListing {
    NewListing::sale(title, "Some Author", "seller@campus.edu", price).category("Other")
}
