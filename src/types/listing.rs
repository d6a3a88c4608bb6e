//! Listing and category types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::User;

/// Lifecycle state of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    Active,
    Pending,
    Sold,
    Expired,
    Hidden,
}

impl ListingStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ListingStatus::Active => "Active",
            ListingStatus::Pending => "Pending",
            ListingStatus::Sold => "Sold",
            ListingStatus::Expired => "Expired",
            ListingStatus::Hidden => "Hidden",
        }
    }
}

/// Listing category (real-estate and vehicle subtrees).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub cat_id: i64,
    pub cat_name: String,
    pub slug: String,
    #[serde(default)]
    pub cat_description: String,
}

/// One image attached to a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingImage {
    pub listimage_id: i64,
    pub image_url: String,
    #[serde(default)]
    pub is_primary: bool,
    #[serde(default)]
    pub display_order: u32,
}

/// A classified listing as returned by the backend.
///
/// Prices arrive as decimal strings to avoid float rounding on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub listing_id: i64,
    pub listing_title: String,
    pub list_description: String,
    pub listing_price: String,
    pub list_location: String,
    pub listing_status: ListingStatus,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(rename = "createdat")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedat")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub images: Vec<ListingImage>,
    pub category: Category,
    pub seller: User,
    /// Present only on authenticated requests.
    #[serde(default)]
    pub is_favorited: Option<bool>,
}

impl Listing {
    /// Primary image, falling back to the first by display order.
    pub fn primary_image(&self) -> Option<&ListingImage> {
        self.images
            .iter()
            .find(|img| img.is_primary)
            .or_else(|| self.images.iter().min_by_key(|img| img.display_order))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(id: i64, primary: bool, order: u32) -> ListingImage {
        ListingImage {
            listimage_id: id,
            image_url: format!("https://img.example/{id}.jpg"),
            is_primary: primary,
            display_order: order,
        }
    }

    #[test]
    fn primary_image_prefers_flagged() {
        let images = vec![image(1, false, 0), image(2, true, 5)];
        let listing_json = serde_json::json!({
            "listing_id": 1,
            "listing_title": "Flat",
            "list_description": "Two rooms",
            "listing_price": "125000.00",
            "list_location": "Nicosia",
            "listing_status": "active",
            "createdat": "2025-05-01T10:00:00Z",
            "updatedat": "2025-05-01T10:00:00Z",
            "images": images,
            "category": { "cat_id": 1, "cat_name": "Apartments", "slug": "apartments" },
            "seller": {
                "userid": 7, "user_firstname": "S", "user_lastname": "T",
                "full_name": "S T", "email": "s@example.com",
                "user_role": "seller", "date_joined": "2025-01-01T00:00:00Z"
            }
        });
        let listing: Listing = serde_json::from_value(listing_json).unwrap();
        assert_eq!(listing.primary_image().unwrap().listimage_id, 2);
    }

    #[test]
    fn primary_image_falls_back_to_lowest_order() {
        let mut images = vec![image(3, false, 2), image(4, false, 1)];
        images.rotate_left(1);
        let listing = Listing {
            listing_id: 1,
            listing_title: String::new(),
            list_description: String::new(),
            listing_price: "0".into(),
            list_location: String::new(),
            listing_status: ListingStatus::Active,
            views: 0,
            is_featured: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            images,
            category: Category {
                cat_id: 1,
                cat_name: String::new(),
                slug: String::new(),
                cat_description: String::new(),
            },
            seller: serde_json::from_value(serde_json::json!({
                "userid": 7, "user_firstname": "S", "user_lastname": "T",
                "full_name": "S T", "email": "s@example.com",
                "user_role": "seller", "date_joined": "2025-01-01T00:00:00Z"
            }))
            .unwrap(),
            is_favorited: None,
        };
        assert_eq!(listing.primary_image().unwrap().listimage_id, 4);
    }
}
