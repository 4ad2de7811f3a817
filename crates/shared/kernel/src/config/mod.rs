use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Prefix of environment variables overriding file values (`MODULITH__NAMING=fully_qualified`).
pub const ENV_PREFIX: &str = "MODULITH";
const DEFAULT_CONFIG_PATH: &str = "modulith";

/// Custom error type for config loading.
#[modulith_derive::modulith_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads a configuration structure from a file layered with environment overrides.
///
/// 1. **Base File**: The file at `path` (format picked from its extension: TOML, JSON, YAML...).
///    Defaults to `modulith` in the working directory.
/// 2. **Environment Overrides**: Variables prefixed with `MODULITH__`; nested keys are separated by
///    double underscores (`MODULITH__BASE_NAMESPACE` maps to `base_namespace`).
///
/// # Errors
/// Returns [`ConfigError::Config`] if the file is missing or does not match `T`.
///
/// # Example
/// ```rust
/// use modulith_kernel::config::load_config;
/// use modulith_kernel::domain::config::ModulithConfig;
///
/// let cfg: ModulithConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path =
        path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), |p| p.as_ref().to_path_buf());

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(true))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

    info!(path = %effective_path.display(), "Loading modulith configuration");

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
