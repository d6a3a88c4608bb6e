//! Background services feeding the UI over channels.

mod unread_poller;

pub use unread_poller::{PollerHandle, UnreadEvent, UnreadPoller};
