//! Terminal UI: the wizard machinery, the two wizard forms, and the
//! read-mostly browsing screens.

pub mod form_field;
pub mod forms;
pub mod terminal_guard;
pub mod views;
pub mod wizard;

pub use terminal_guard::{install_panic_hook, TerminalGuard};
