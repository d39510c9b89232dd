use config::{Config, Environment, File};
use fixtura_domain::FactoryConfig;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Base name of the configuration file looked up when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "fixtura";

/// Prefix of environment overrides (`FIXTURA__STRICT_OVERRIDES=true`).
pub const ENV_PREFIX: &str = "FIXTURA";

/// Custom error type for config loading.
#[fixtura_derive::fixtura_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// A reusable configuration loader that combines file-based settings with environment overrides.
///
/// This function implements a layered configuration strategy:
/// 1. **Base File**: Loads settings from `path` (any format the `config` crate recognises
///    by extension). An explicit path must exist; without one, an optional `fixtura.*`
///    file in the working directory is used when present.
/// 2. **Environment Overrides**: Overlays variables prefixed with `FIXTURA__`.
///    Nested structures use double underscores (e.g. `FIXTURA__ORDERING=topological`).
///
/// # Errors
/// This function will return an error if:
/// * The explicitly specified file cannot be found or parsed.
/// * The merged settings do not match the structure of type `T`.
///
/// # Example
/// ```rust
/// use fixtura_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct SuiteConfig {
///     seed: u64,
/// }
///
/// let cfg: SuiteConfig = load_config(Some("config/suite")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let (effective_path, required) = path.map_or_else(
        || (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        |p| (p.as_ref().to_path_buf(), true),
    );

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(required))
        .add_source(
            Environment::with_prefix(ENV_PREFIX).separator("__").convert_case(config::Case::Snake),
        );

    info!(path = %effective_path.display(), required, "Loading factory config");

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}

/// [`load_config`] specialised for the engine's [`FactoryConfig`].
///
/// # Errors
/// Same as [`load_config`].
pub fn load_factory_config(path: Option<impl AsRef<Path>>) -> Result<FactoryConfig, ConfigError> {
    load_config(path)
}
