#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros for the fixture workspace.
//!
//! * [`macro@fixtura_error`] turns an enum into a `thiserror` error with context helpers.
//! * [`macro@Model`] registers a struct's field defaults and derivations with the factory.
//!
//! The `Model` expansion refers to items through the `fixtura` facade, so consumers
//! depend on `fixtura` rather than on this crate directly.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for defining the workspace's error enums.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]` unless already present.
/// * **Context Support**: Generates a companion `...Ext` trait that adds `.context()`
///   to any `Result` whose error converts into this enum, and an `error_context()` getter.
/// * **Standard Conversions**: Implements `From<T>` for variants containing a `source` field
///   (or a field marked `#[source]`/`#[from]`), enabling the `?` operator.
/// * **Internal Fallback**: `From<&'static str>` and `From<String>` when an `Internal`
///   variant is present.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum** with named-field variants only.
/// 2. A `context` field must have type `Option<Cow<'static, str>>`.
/// 3. A variant with a source must also carry a `context` field.
/// 4. A variant with a source should carry nothing else: the generated `From`
///    impl only fills `source` and `context`.
///
/// The expansion also emits a module-private `format_context` helper for use in
/// `#[error(...)]` strings, so declare at most one such enum per module.
///
/// # Example
///
/// ```rust,ignore
/// use fixtura_derive::fixtura_error;
/// use std::borrow::Cow;
///
/// #[fixtura_error]
/// pub enum ConfigError {
///     #[error("Config error{}: {source}", format_context(.context))]
///     Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn load() -> Result<Settings, ConfigError> {
///     builder.build().context("Failed to build config")?.try_deserialize().map_err(Into::into)
/// }
/// ```
#[proc_macro_attribute]
pub fn fixtura_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand(input).into()
}

/// Derives `fixtura::Model` from field attributes.
///
/// # Attributes
///
/// * `#[fixture(name = "...")]` on the struct overrides the model identifier
///   (defaults to the struct name).
/// * `#[fixture(default = <expr>)]` registers a field with a serializable default.
///   A bare `#[fixture]` or `#[fixture(default)]` uses `Default::default()`.
/// * `#[fixture(depends_on(a, b), with = path::to::fn)]` declares a derivation.
///   The function takes `&fixtura::Inputs<'_>` and returns anything implementing
///   `fixtura::IntoDerived`.
/// * `#[fixture(key = "...")]` registers the field under a different name, which
///   must match the serde name used during construction.
///
/// Fields without `#[fixture]` are not registered and are left to serde.
/// Construction goes through `fixtura::construct_with_serde`, so the struct must
/// implement `serde::Deserialize`. Generic structs are rejected: every
/// instantiation would share one model identifier.
///
/// # Example
///
/// ```rust,ignore
/// use fixtura::{Inputs, Model};
/// use serde::Deserialize;
///
/// #[derive(Debug, Deserialize, Model)]
/// struct User {
///     #[fixture(default = "abc-123")]
///     id: String,
///     #[fixture(default = "guest", depends_on(id), with = name_from_id)]
///     name: String,
/// }
///
/// fn name_from_id(inputs: &Inputs<'_>) -> String {
///     format!("user {}", inputs.text("id"))
/// }
/// ```
#[proc_macro_derive(Model, attributes(fixture))]
pub fn derive_model(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::model::expand(input).into()
}
