//! Multi-step form screens built on the wizard engine.
//!
//! Each form owns a [`crate::ui::wizard::StepNavigator`], its fields, and a
//! per-step validation gate; the navigator is only advanced after the gate
//! passes. Direct step jumps (Alt+digit) are restricted to visited steps.

mod dealer_application;
mod listing;


pub use dealer_application::DealerApplicationForm;
pub use listing::ListingForm;

/// What a key event did to the form, from the host's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormResult {
    /// Key consumed, stay on the form.
    Continue,
    /// User backed out of the first step.
    Exit,
    /// Terminal step confirmed with all gates passed; host submits.
    Submit,
}
