//! Swap input layer
//!
//! Amount validation, the swap form (token selection, quote requests,
//! flip, submission) and the confirmed-swap log.

mod form;
mod record;
mod validation;

pub use form::{FormError, SwapForm, SwapOrder};
pub use record::SwapRecord;

/// Per-action outcome mirrored in the UI. An action in flight holds
/// `&mut` on its owner; the terminal spinner is its loading state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActionStatus {
    #[default]
    Idle,
    Error(String),
}

impl ActionStatus {
    pub fn error(&self) -> Option<&str> {
        match self {
            ActionStatus::Error(message) => Some(message),
            _ => None,
        }
    }
}
