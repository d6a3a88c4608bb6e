//! Dealer application types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What kind of inventory the dealer trades in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessType {
    RealEstate,
    Vehicle,
    Both,
}

impl BusinessType {
    pub fn all() -> &'static [BusinessType] {
        &[BusinessType::RealEstate, BusinessType::Vehicle, BusinessType::Both]
    }

    pub fn label(&self) -> &'static str {
        match self {
            BusinessType::RealEstate => "Real Estate",
            BusinessType::Vehicle => "Vehicles",
            BusinessType::Both => "Real Estate & Vehicles",
        }
    }

    pub fn wire_value(&self) -> &'static str {
        match self {
            BusinessType::RealEstate => "real_estate",
            BusinessType::Vehicle => "vehicle",
            BusinessType::Both => "both",
        }
    }
}

/// Review state of a submitted dealer application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "Pending review",
            ApplicationStatus::Approved => "Approved",
            ApplicationStatus::Rejected => "Rejected",
        }
    }
}

/// A dealer application on record for the current account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealerApplication {
    #[serde(rename = "dealerapp_id")]
    pub application_id: i64,
    pub business_name: String,
    pub business_type: BusinessType,
    pub business_address: String,
    #[serde(default)]
    pub business_phone: Option<String>,
    #[serde(default)]
    pub business_email: Option<String>,
    #[serde(default)]
    pub tax_id: Option<String>,
    #[serde(default)]
    pub business_license: Option<String>,
    #[serde(rename = "appli_status")]
    pub status: ApplicationStatus,
    #[serde(rename = "createdat")]
    pub created_at: DateTime<Utc>,
    /// Reviewer note, present on rejected applications.
    #[serde(default)]
    pub review_note: Option<String>,
}
