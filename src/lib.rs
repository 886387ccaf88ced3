//! On-demand coretime buyer library.

pub mod blockchain;
pub mod config;
pub mod observability;
pub mod purchase;
pub mod resolver;

pub use config::schema::CoretimeConfig;
pub use purchase::{PurchaseDriver, PurchaseReport};
pub use resolver::{Outcome, TransactionStatusResolver};
