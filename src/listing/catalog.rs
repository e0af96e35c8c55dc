//! Built-in sample catalog written on first use.

use super::{Listing, ListingStatus, ListingType};

/// Categories offered by the listing form.
pub const CATEGORIES: [&str; 10] = [
    "Computer Science",
    "Mathematics",
    "Physics",
    "Chemistry",
    "Biology",
    "Engineering",
    "Literature",
    "History",
    "Business",
    "Other",
];

/// Book conditions offered by the listing form.
pub const CONDITIONS: [&str; 4] = ["Like New", "Good", "Fair", "Poor"];

struct Seed {
    title: &'static str,
    author: &'static str,
    category: &'static str,
    condition: &'static str,
    listing_type: ListingType,
    price: f64,
    contact: &'static str,
    status: ListingStatus,
}

const SEEDS: [Seed; 8] = [
    Seed {
        title: "Introduction to Algorithms",
        author: "Thomas H. Cormen",
        category: "Computer Science",
        condition: "Good",
        listing_type: ListingType::Sale,
        price: 650.0,
        contact: "arjun@campus.edu",
        status: ListingStatus::Available,
    },
    Seed {
        title: "Calculus: Early Transcendentals",
        author: "James Stewart",
        category: "Mathematics",
        condition: "Like New",
        listing_type: ListingType::Sale,
        price: 500.0,
        contact: "meera@campus.edu",
        status: ListingStatus::Available,
    },
    Seed {
        title: "Concepts of Physics Vol. 1",
        author: "H.C. Verma",
        category: "Physics",
        condition: "Fair",
        listing_type: ListingType::Exchange,
        price: 0.0,
        contact: "rohan@campus.edu",
        status: ListingStatus::Available,
    },
    Seed {
        title: "Operating System Concepts",
        author: "Abraham Silberschatz",
        category: "Computer Science",
        condition: "Good",
        listing_type: ListingType::Sale,
        price: 400.0,
        contact: "arjun@campus.edu",
        status: ListingStatus::Sold,
    },
    Seed {
        title: "Organic Chemistry",
        author: "Jonathan Clayden",
        category: "Chemistry",
        condition: "Poor",
        listing_type: ListingType::Donation,
        price: 0.0,
        contact: "priya@campus.edu",
        status: ListingStatus::Available,
    },
    Seed {
        title: "Engineering Mechanics",
        author: "R.C. Hibbeler",
        category: "Engineering",
        condition: "Good",
        listing_type: ListingType::Sale,
        price: 350.0,
        contact: "kabir@campus.edu",
        status: ListingStatus::Available,
    },
    Seed {
        title: "Pride and Prejudice",
        author: "Jane Austen",
        category: "Literature",
        condition: "Like New",
        listing_type: ListingType::Exchange,
        price: 0.0,
        contact: "meera@campus.edu",
        status: ListingStatus::Available,
    },
    Seed {
        title: "Linear Algebra Done Right",
        author: "Sheldon Axler",
        category: "Mathematics",
        condition: "Good",
        listing_type: ListingType::Sale,
        price: 300.0,
        contact: "rohan@campus.edu",
        status: ListingStatus::Sold,
    },
];

/// The deterministic sample catalog, ids `seed-1` .. `seed-8`.
pub fn seed_catalog() -> Vec<Listing> {
    SEEDS
        .iter()
        .enumerate()
        .map(|(i, seed)| Listing {
            id: format!("seed-{}", i + 1),
            title: seed.title.to_string(),
            author: seed.author.to_string(),
            category: seed.category.to_string(),
            condition: seed.condition.to_string(),
            listing_type: seed.listing_type,
            price: seed.price,
            contact: seed.contact.to_string(),
            status: seed.status,
            image_uri: None,
            description: None,
        })
        .collect()
}
