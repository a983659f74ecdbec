use crate::error::{KernelError, KernelErrorExt};
use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::info;

/// Prefix of environment overrides, e.g. `CBOX__COOKIE__URI`.
pub const ENV_PREFIX: &str = "CBOX";

/// Configuration file stem used when no path is given.
pub const DEFAULT_CONFIG: &str = "cookiebox";

/// A reusable configuration loader that combines file-based settings with environment overrides.
///
/// This function implements a layered configuration strategy:
/// 1. **Base File**: Loads settings from a file (`.toml`, `.json`, `.yaml`, ...). If no path is
///    provided, it defaults to `cookiebox` in the working directory, with any supported extension.
/// 2. **Environment Overrides**: Overlays values from environment variables prefixed with `CBOX__`.
///    Nested structures are accessed using double underscores (e.g., `CBOX__COOKIE__URI` maps to
///    `cookie.uri`).
///
/// # Type Parameters
/// * `T`: The target configuration structure. Must implement [`serde::Deserialize`].
///
/// # Errors
/// This function will return an error if:
/// * The specified (or default) configuration file cannot be found.
/// * The content of the file does not match the structure of type `T`.
///
/// # Example
/// ```rust,no_run
/// use cbox_kernel::config::load_config;
/// use cbox_kernel::domain::config::AppConfig;
///
/// let cfg: AppConfig = load_config(Some("config/local.toml")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, KernelError>
where
    T: DeserializeOwned,
{
    load(path, environment())
}

/// Same as [`load_config`], reading overrides from `vars` instead of the process environment.
///
/// `vars` uses environment naming (`CBOX__COOKIE__URI`); unrelated names are ignored.
///
/// # Errors
/// As [`load_config`].
pub fn load_config_with_overrides<T, I, K, V>(
    path: Option<impl AsRef<Path>>,
    vars: I,
) -> Result<T, KernelError>
where
    T: DeserializeOwned,
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let vars = vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
    load(path, environment().source(Some(vars)))
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX).separator("__").convert_case(config::Case::Snake)
}

fn load<T>(path: Option<impl AsRef<Path>>, environment: Environment) -> Result<T, KernelError>
where
    T: DeserializeOwned,
{
    let effective_path =
        path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG), |p| p.as_ref().to_path_buf());

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(true))
        .add_source(environment);

    info!("Loading config from {}", effective_path.display());

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
