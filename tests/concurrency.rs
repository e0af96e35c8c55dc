//! Concurrent writers through one storage handle do not lose updates.

mod support;

use std::collections::HashSet;

use campus_books::listing::seed_catalog;
use campus_books::{ListingPatch, StorageService};
use support::{textbook, Marketplace};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_adds_are_all_kept() {
    let market = Marketplace::new(StorageService::in_memory());

    let handles: Vec<_> = (0..20)
        .map(|i| {
            let listings = market.listings.clone();
            tokio::spawn(async move { listings.add(textbook(&format!("Book {i}"), 1.0)).await })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        ids.insert(handle.await.unwrap().unwrap().id);
    }

    let stored = market.listings.list().await;
    assert_eq!(stored.len(), seed_catalog().len() + 20);
    let stored_ids: HashSet<_> = stored.into_iter().map(|l| l.id).collect();
    assert!(ids.is_subset(&stored_ids));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn update_racing_remove_keeps_both_effects() {
    let market = Marketplace::new(StorageService::in_memory());
    market.listings.list().await;

    let updater = {
        let listings = market.listings.clone();
        tokio::spawn(async move {
            listings
                .update("seed-1", ListingPatch::new().title("Renamed"))
                .await
        })
    };
    let remover = {
        let listings = market.listings.clone();
        tokio::spawn(async move { listings.remove("seed-2").await })
    };

    assert!(updater.await.unwrap().unwrap().is_some());
    assert!(remover.await.unwrap().unwrap());

    let listings = market.listings.list().await;
    assert!(listings.iter().all(|l| l.id != "seed-2"));
    assert_eq!(market.listings.get("seed-1").await.unwrap().title, "Renamed");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_wishlist_adds_are_all_kept() {
    let market = Marketplace::new(StorageService::in_memory());

    let handles: Vec<_> = (1..=8)
        .map(|i| {
            let wishlist = market.wishlist.clone();
            tokio::spawn(async move { wishlist.add(&format!("seed-{i}")).await })
        })
        .collect();
    for handle in handles {
        assert!(handle.await.unwrap().unwrap());
    }

    let ids: HashSet<_> = market.wishlist.list().await.into_iter().collect();
    assert_eq!(ids.len(), 8);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_first_reads_seed_once() {
    let market = Marketplace::new(StorageService::in_memory());

    let readers: Vec<_> = (0..10)
        .map(|_| {
            let listings = market.listings.clone();
            tokio::spawn(async move { listings.list().await })
        })
        .collect();
    let adder = {
        let listings = market.listings.clone();
        tokio::spawn(async move { listings.add(textbook("Early bird", 9.0)).await })
    };

    for reader in readers {
        let seen = reader.await.unwrap();
        assert!(seen.len() == seed_catalog().len() || seen.len() == seed_catalog().len() + 1);
    }
    let created = adder.await.unwrap().unwrap();

    let listings = market.listings.list().await;
    assert_eq!(listings.len(), seed_catalog().len() + 1);
    assert_eq!(listings[0].id, created.id);
}
