//! Automatic posting rules.
//!
//! Converts order/payment lifecycle events from the commerce subsystem
//! into balanced journal entries. Each event produces exactly one entry
//! or nothing; a failed posting never leaves partial journal state.

pub mod rules;
pub mod types;

pub use rules::PostingService;
pub use types::{OrderCompleted, PaymentMethod, PaymentSettled};
