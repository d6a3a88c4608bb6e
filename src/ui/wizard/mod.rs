//! Multi-step form wizard: navigation state plus presentation widgets.
//!
//! [`StepNavigator`] owns progression state; [`StepIndicator`] and
//! [`StepFrame`] are presentation-only and read from it.

mod chrome;
mod indicator;
mod navigator;

pub use chrome::StepFrame;
pub use indicator::{StepIndicator, StepLabel};
pub use navigator::StepNavigator;
