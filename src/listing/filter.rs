use super::{Listing, ListingStatus, ListingType};

/// Browse filter over listings.
///
/// `query` matches title or author, case-insensitively. Every other field is
/// an exact match; `None` means "All".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingFilter {
    pub query: Option<String>,
    pub category: Option<String>,
    pub listing_type: Option<ListingType>,
    pub condition: Option<String>,
    pub status: Option<ListingStatus>,
}

impl ListingFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn listing_type(mut self, listing_type: ListingType) -> Self {
        self.listing_type = Some(listing_type);
        self
    }

    pub fn condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    pub fn status(mut self, status: ListingStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        if let Some(query) = &self.query {
            let query = query.to_lowercase();
            if !listing.title.to_lowercase().contains(&query)
                && !listing.author.to_lowercase().contains(&query)
            {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if &listing.category != category {
                return false;
            }
        }
        if let Some(listing_type) = self.listing_type {
            if listing.listing_type != listing_type {
                return false;
            }
        }
        if let Some(condition) = &self.condition {
            if &listing.condition != condition {
                return false;
            }
        }
        if let Some(status) = self.status {
            if listing.status != status {
                return false;
            }
        }
        true
    }
}
