//! Kernel utilities shared across the factory crates.
//! Keep this crate lightweight; today it only hosts layered configuration loading.
//!
//! ## Config loading
//! ```rust,ignore
//! use fixtura_kernel::config::load_factory_config;
//!
//! // `fixtura.toml` (optional) overlaid with `FIXTURA__*` environment variables.
//! let cfg = load_factory_config(None::<&str>).unwrap_or_default();
//! ```
pub mod config;

pub use fixtura_domain as domain;
