//! Stats - marketplace insights computed from a listing snapshot.
//!
//! `StatsEngine::compute` is pure: same snapshot in, identical report out.
//! Nothing is stored; callers recompute whenever they need fresh numbers.
//!
//! In JSON each breakdown row names its key after the field it counts:
//! `{"category", ...}`, `{"type", ...}` and `{"condition", ...}`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::listing::{Listing, ListingRepository};

/// Number of categories kept in `StatsReport::category_breakdown`.
pub const TOP_CATEGORIES: usize = 5;

/// One row of a categorical breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownEntry {
    #[serde(alias = "category", alias = "type", alias = "condition")]
    pub key: String,
    pub count: usize,
    /// `round(count / total * 100)`, rounded independently per row.
    pub percentage: u32,
}

/// Aggregate statistics over a listing snapshot.
///
/// Price fields only consider listings with a price above zero and are 0
/// when there are none.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    pub total_listings: usize,
    pub available_books: usize,
    pub sold_books: usize,
    pub avg_price: f64,
    pub lowest_price: f64,
    pub highest_price: f64,
    /// Top categories by count, ties in first-seen order.
    #[serde(serialize_with = "rows::category")]
    pub category_breakdown: Vec<BreakdownEntry>,
    /// Listing types in first-seen order.
    #[serde(serialize_with = "rows::listing_type")]
    pub listing_type_breakdown: Vec<BreakdownEntry>,
    /// Conditions by count, ties in first-seen order.
    #[serde(serialize_with = "rows::condition")]
    pub condition_breakdown: Vec<BreakdownEntry>,
}

/// Stateless statistics engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatsEngine;

impl StatsEngine {
    pub fn compute(listings: &[Listing]) -> StatsReport {
        if listings.is_empty() {
            return StatsReport::default();
        }

        let total = listings.len();
        let available_books = listings.iter().filter(|l| l.is_available()).count();
        let sold_books = total - available_books;

        let prices: Vec<f64> = listings
            .iter()
            .filter(|l| l.is_priced())
            .map(|l| l.price)
            .collect();
        let (avg_price, lowest_price, highest_price) = if prices.is_empty() {
            (0.0, 0.0, 0.0)
        } else {
            let sum: f64 = prices.iter().sum();
            (
                (sum / prices.len() as f64).round(),
                prices.iter().copied().fold(f64::INFINITY, f64::min),
                prices.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            )
        };

        let mut category_breakdown = breakdown(listings.iter().map(|l| l.category.as_str()), total);
        sort_by_count(&mut category_breakdown);
        category_breakdown.truncate(TOP_CATEGORIES);

        let listing_type_breakdown =
            breakdown(listings.iter().map(|l| l.listing_type.as_str()), total);

        let mut condition_breakdown =
            breakdown(listings.iter().map(|l| l.condition.as_str()), total);
        sort_by_count(&mut condition_breakdown);

        StatsReport {
            total_listings: total,
            available_books,
            sold_books,
            avg_price,
            lowest_price,
            highest_price,
            category_breakdown,
            listing_type_breakdown,
            condition_breakdown,
        }
    }

    /// Compute over the repository's current listings.
    pub async fn compute_from(listings: &ListingRepository) -> StatsReport {
        Self::compute(&listings.list().await)
    }
}

/// Count keys in first-seen order.
fn breakdown<'a>(keys: impl Iterator<Item = &'a str>, total: usize) -> Vec<BreakdownEntry> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(key, count)| BreakdownEntry {
            key: key.to_string(),
            count,
            percentage: percentage(count, total),
        })
        .collect()
}

fn percentage(count: usize, total: usize) -> u32 {
    (count as f64 / total as f64 * 100.0).round() as u32
}

// Stable: equal counts keep first-seen order.
fn sort_by_count(entries: &mut [BreakdownEntry]) {
    entries.sort_by(|a, b| b.count.cmp(&a.count));
}

mod rows {
    use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

    use super::BreakdownEntry;

    pub(super) fn category<S: Serializer>(rows: &[BreakdownEntry], s: S) -> Result<S::Ok, S::Error> {
        named(rows, "category", s)
    }

    pub(super) fn listing_type<S: Serializer>(
        rows: &[BreakdownEntry],
        s: S,
    ) -> Result<S::Ok, S::Error> {
        named(rows, "type", s)
    }

    pub(super) fn condition<S: Serializer>(rows: &[BreakdownEntry], s: S) -> Result<S::Ok, S::Error> {
        named(rows, "condition", s)
    }

    fn named<S: Serializer>(
        rows: &[BreakdownEntry],
        field: &'static str,
        s: S,
    ) -> Result<S::Ok, S::Error> {
        let mut seq = s.serialize_seq(Some(rows.len()))?;
        for row in rows {
            seq.serialize_element(&Named { field, row })?;
        }
        seq.end()
    }

    struct Named<'a> {
        field: &'static str,
        row: &'a BreakdownEntry,
    }

    impl Serialize for Named<'_> {
        fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
            let mut map = s.serialize_map(Some(3))?;
            map.serialize_entry(self.field, &self.row.key)?;
            map.serialize_entry("count", &self.row.count)?;
            map.serialize_entry("percentage", &self.row.percentage)?;
            map.end()
        }
    }
}
