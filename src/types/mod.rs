//! Domain types shared across the API client and UI views.

pub mod dealer;
pub mod listing;
pub mod messaging;
pub mod notification;
pub mod review;
pub mod user;

pub use dealer::{ApplicationStatus, BusinessType, DealerApplication};
pub use listing::{Category, Listing, ListingImage, ListingStatus};
pub use messaging::{Chat, Message};
pub use notification::{Notification, NotificationKind};
pub use review::Review;
pub use user::{TokenPair, User, UserRole};
