// Application layer: the session-owned ledger and what it reports.

pub mod error;
pub mod reporting;
pub mod store;

pub use error::*;
pub use reporting::*;
pub use store::*;
