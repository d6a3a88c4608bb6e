//! Listing, category and favorites endpoints.

use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError};
use crate::types::{Category, Listing, ListingStatus};

/// Query filters for `GET /listings/`. Unset fields are omitted.
#[derive(Debug, Clone, Default)]
pub struct ListingFilter {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub category: Option<i64>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub location: Option<String>,
    pub search: Option<String>,
    pub ordering: Option<String>,
    pub is_featured: Option<bool>,
}

impl ListingFilter {
    fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(v) = self.page {
            query.push(("page", v.to_string()));
        }
        if let Some(v) = self.page_size {
            query.push(("page_size", v.to_string()));
        }
        if let Some(v) = self.category {
            query.push(("category", v.to_string()));
        }
        if let Some(v) = self.min_price {
            query.push(("min_price", v.to_string()));
        }
        if let Some(v) = self.max_price {
            query.push(("max_price", v.to_string()));
        }
        if let Some(v) = &self.location {
            query.push(("location", v.clone()));
        }
        if let Some(v) = &self.search {
            query.push(("search", v.clone()));
        }
        if let Some(v) = &self.ordering {
            query.push(("ordering", v.clone()));
        }
        if let Some(v) = self.is_featured {
            query.push(("is_featured", v.to_string()));
        }
        query
    }
}

/// One page of listing results.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingPage {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<Listing>,
}

/// Payload for `POST /listings/create/`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateListingRequest {
    pub listing_title: String,
    pub list_description: String,
    pub listing_price: String,
    pub list_location: String,
    pub category_id: i64,
    pub image_urls: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct ListingEnvelope {
    listing: Listing,
}

#[derive(Debug, Clone, Deserialize)]
struct FavoriteToggleResponse {
    is_favorited: bool,
}

impl ApiClient {
    pub async fn listings(&self, filter: &ListingFilter) -> Result<ListingPage, ApiError> {
        self.get_json("/listings/", &filter.to_query()).await
    }

    pub async fn listing(&self, id: i64) -> Result<Listing, ApiError> {
        self.get_json(&format!("/listings/{id}/"), &[]).await
    }

    pub async fn featured_listings(&self) -> Result<Vec<Listing>, ApiError> {
        self.get_json("/listings/featured/", &[]).await
    }

    pub async fn my_listings(&self) -> Result<Vec<Listing>, ApiError> {
        self.require_auth()?;
        self.get_json("/listings/my-listings/", &[]).await
    }

    pub async fn create_listing(&self, req: &CreateListingRequest) -> Result<Listing, ApiError> {
        self.require_auth()?;
        let envelope: ListingEnvelope = self.post_json("/listings/create/", req).await?;
        Ok(envelope.listing)
    }

    pub async fn update_listing_status(
        &self,
        id: i64,
        status: ListingStatus,
    ) -> Result<Listing, ApiError> {
        self.require_auth()?;
        let envelope: ListingEnvelope = self
            .patch_json(
                &format!("/listings/{id}/update-status/"),
                &serde_json::json!({ "status": status }),
            )
            .await?;
        Ok(envelope.listing)
    }

    pub async fn delete_listing(&self, id: i64) -> Result<(), ApiError> {
        self.require_auth()?;
        self.delete_unit(&format!("/listings/{id}/delete/")).await
    }

    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        self.get_json("/categories/", &[]).await
    }

    /// Returns the new favorite state for the listing.
    pub async fn toggle_favorite(&self, listing_id: i64) -> Result<bool, ApiError> {
        self.require_auth()?;
        let response: FavoriteToggleResponse = self
            .post_empty(&format!("/favorites/{listing_id}/toggle/"))
            .await?;
        Ok(response.is_favorited)
    }

    pub async fn favorites(&self) -> Result<Vec<Listing>, ApiError> {
        self.require_auth()?;
        self.get_json("/favorites/", &[]).await
    }
}
