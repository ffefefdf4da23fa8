//! Shared type definitions.

pub mod id;
pub mod money;

pub use id::{AccountId, ChartId, EntryId, LineId, OrderId, StoreId, UserId, VatReportId};
pub use money::{round_amount, within_tolerance};
