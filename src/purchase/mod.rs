//! Coretime purchase subsystem.
//!
//! # Data Flow
//! ```text
//! CLI [network] [amount]
//!     → driver.rs (select networks, sequential loop, per-network isolation)
//!     → amount.rs (whole tokens → smallest unit)
//!     → blockchain (sign, submit, status updates)
//!     → resolver (outcome)
//! ```

pub mod amount;
pub mod driver;

pub use amount::{to_smallest_unit, AmountError};
pub use driver::{select_networks, NetworkReport, PurchaseDriver, PurchaseError, PurchaseReport};
