//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! built-in network table, or config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → CoretimeConfig (validated, immutable)
//!     → borrowed by the purchase driver for the whole run
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no runtime registration
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_default, ConfigError};
pub use schema::{
    CoretimeConfig, DefaultsConfig, NetworkConfig, ObservabilityConfig, SubmissionConfig,
    ALL_NETWORKS,
};
pub use validation::ValidationError;
