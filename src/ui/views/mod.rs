//! Read-mostly screens: browsing listings, chatting, notifications, and
//! the dealer application status.

mod dealer_status;
mod listings;
mod messages;
mod notifications;

pub use dealer_status::{DealerStatusAction, DealerStatusView};
pub use listings::{ListingsAction, ListingsView};
pub use messages::{MessagesAction, MessagesView};
pub use notifications::{NotificationsAction, NotificationsView};
