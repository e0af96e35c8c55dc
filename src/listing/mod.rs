//! Listings - book offers and the repository that owns them.
//!
//! A `Listing` is created by `ListingRepository::add` (or by first-run
//! seeding), patched by `update`, flipped between Available and Sold by
//! `toggle_status`, and destroyed by `remove`.

mod catalog;
mod filter;
mod repository;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use catalog::{seed_catalog, CATEGORIES, CONDITIONS};
pub use filter::ListingFilter;
pub use repository::{ListingRepository, LISTINGS_KEY};

/// How a book is offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListingType {
    Sale,
    Exchange,
    Donation,
}

impl ListingType {
    pub const ALL: [ListingType; 3] = [ListingType::Sale, ListingType::Exchange, ListingType::Donation];

    pub fn as_str(&self) -> &'static str {
        match self {
            ListingType::Sale => "Sale",
            ListingType::Exchange => "Exchange",
            ListingType::Donation => "Donation",
        }
    }
}

impl fmt::Display for ListingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Availability of a listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListingStatus {
    #[default]
    Available,
    Sold,
}

impl ListingStatus {
    /// The other status.
    pub fn toggled(self) -> Self {
        match self {
            ListingStatus::Available => ListingStatus::Sold,
            ListingStatus::Sold => ListingStatus::Available,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ListingStatus::Available => "Available",
            ListingStatus::Sold => "Sold",
        }
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A book offer.
///
/// `price` is 0 for exchanges and donations. `category` and `condition`
/// are free-form: callers normally pick from `CATEGORIES` / `CONDITIONS`,
/// but nothing here enforces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    pub title: String,
    pub author: String,
    pub category: String,
    pub condition: String,
    pub listing_type: ListingType,
    pub price: f64,
    pub contact: String,
    // Records written without a status predate status tracking.
    #[serde(default)]
    pub status: ListingStatus,
    /// Opaque image reference, stored and returned unchanged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Listing {
    pub fn is_available(&self) -> bool {
        self.status == ListingStatus::Available
    }

    /// Whether the listing takes part in price statistics.
    pub fn is_priced(&self) -> bool {
        self.price > 0.0
    }
}

/// Fields supplied when creating a listing. The repository assigns `id`
/// and `status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewListing {
    pub title: String,
    pub author: String,
    pub category: String,
    pub condition: String,
    pub listing_type: ListingType,
    pub price: f64,
    pub contact: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NewListing {
    /// Raw constructor: values are stored as given. Category defaults to
    /// "Other" and condition to "Good" until overridden.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        contact: impl Into<String>,
        listing_type: ListingType,
        price: f64,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            category: "Other".to_string(),
            condition: "Good".to_string(),
            listing_type,
            price,
            contact: contact.into(),
            image_uri: None,
            description: None,
        }
    }

    pub fn sale(
        title: impl Into<String>,
        author: impl Into<String>,
        contact: impl Into<String>,
        price: f64,
    ) -> Self {
        Self::new(title, author, contact, ListingType::Sale, price.max(0.0))
    }

    pub fn exchange(
        title: impl Into<String>,
        author: impl Into<String>,
        contact: impl Into<String>,
    ) -> Self {
        Self::new(title, author, contact, ListingType::Exchange, 0.0)
    }

    pub fn donation(
        title: impl Into<String>,
        author: impl Into<String>,
        contact: impl Into<String>,
    ) -> Self {
        Self::new(title, author, contact, ListingType::Donation, 0.0)
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = condition.into();
        self
    }

    pub fn image_uri(mut self, uri: impl Into<String>) -> Self {
        self.image_uri = Some(uri.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Build the stored listing under `id`, always Available.
    pub fn into_listing(self, id: String) -> Listing {
        Listing {
            id,
            title: self.title,
            author: self.author,
            category: self.category,
            condition: self.condition,
            listing_type: self.listing_type,
            price: self.price,
            contact: self.contact,
            status: ListingStatus::Available,
            image_uri: self.image_uri,
            description: self.description,
        }
    }
}

/// Partial update for a listing. `None` fields are left untouched.
///
/// `id` and `status` are not patchable; use `toggle_status` for the latter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listing_type: Option<ListingType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ListingPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    pub fn listing_type(mut self, listing_type: ListingType) -> Self {
        self.listing_type = Some(listing_type);
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn contact(mut self, contact: impl Into<String>) -> Self {
        self.contact = Some(contact.into());
        self
    }

    pub fn image_uri(mut self, uri: impl Into<String>) -> Self {
        self.image_uri = Some(uri.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Shallow overwrite of every `Some` field.
    pub fn apply_to(self, listing: &mut Listing) {
        if let Some(title) = self.title {
            listing.title = title;
        }
        if let Some(author) = self.author {
            listing.author = author;
        }
        if let Some(category) = self.category {
            listing.category = category;
        }
        if let Some(condition) = self.condition {
            listing.condition = condition;
        }
        if let Some(listing_type) = self.listing_type {
            listing.listing_type = listing_type;
        }
        if let Some(price) = self.price {
            listing.price = price;
        }
        if let Some(contact) = self.contact {
            listing.contact = contact;
        }
        if let Some(uri) = self.image_uri {
            listing.image_uri = Some(uri);
        }
        if let Some(description) = self.description {
            listing.description = Some(description);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Listing {
        NewListing::sale("Calculus", "Stewart", "a@campus.edu", 450.0)
            .category("Mathematics")
            .into_listing("l-1".into())
    }

    #[test]
    fn new_listing_is_available() {
        let listing = sample();
        assert_eq!(listing.status, ListingStatus::Available);
        assert!(listing.is_priced());
    }

    #[test]
    fn non_sale_constructors_zero_price() {
        assert_eq!(NewListing::exchange("T", "A", "c").price, 0.0);
        assert_eq!(NewListing::donation("T", "A", "c").price, 0.0);
        assert_eq!(NewListing::sale("T", "A", "c", -5.0).price, 0.0);
    }

    #[test]
    fn toggled_flips_both_ways() {
        assert_eq!(ListingStatus::Available.toggled(), ListingStatus::Sold);
        assert_eq!(ListingStatus::Sold.toggled(), ListingStatus::Available);
    }

    #[test]
    fn serializes_camel_case() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["listingType"], "Sale");
        assert_eq!(value["status"], "Available");
        assert!(value.get("imageUri").is_none());
    }

    #[test]
    fn missing_status_defaults_to_available() {
        let listing: Listing = serde_json::from_value(json!({
            "id": "1",
            "title": "Organic Chemistry",
            "author": "Clayden",
            "category": "Chemistry",
            "condition": "Fair",
            "listingType": "Exchange",
            "price": 0,
            "contact": "b@campus.edu"
        }))
        .unwrap();
        assert_eq!(listing.status, ListingStatus::Available);
    }

    #[test]
    fn patch_overwrites_only_given_fields() {
        let mut listing = sample();
        ListingPatch::new()
            .title("Calculus, 8th ed.")
            .price(400.0)
            .apply_to(&mut listing);

        assert_eq!(listing.title, "Calculus, 8th ed.");
        assert_eq!(listing.price, 400.0);
        assert_eq!(listing.author, "Stewart");
        assert_eq!(listing.id, "l-1");
    }

    #[test]
    fn empty_patch() {
        assert!(ListingPatch::new().is_empty());
        assert!(!ListingPatch::new().contact("x").is_empty());
    }
}
