//! Relay configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! optional TOML files plus `RELAY__`-prefixed environment variables. Each
//! sub-module represents a logical configuration section.

pub mod intercept;
pub mod logging;

use serde::{Deserialize, Serialize};

pub use self::intercept::InterceptConfig;
pub use self::logging::LoggingConfig;

use crate::error::AppError;

/// Root relay configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Which host entry points are intercepted on registration.
    #[serde(default)]
    pub intercept: InterceptConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration.
    ///
    /// Merges `config/default` with an environment-specific overlay
    /// `config/{env}` (both optional) and environment variables prefixed
    /// with `RELAY__`, e.g. `RELAY__INTERCEPT__CAPTURE_BRAILLE_INPUT=true`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        Self::load_from(&["config/default".to_string(), format!("config/{env}")])
    }

    /// Load configuration from an explicit list of file stems, in order of
    /// increasing precedence, followed by the environment.
    pub fn load_from(files: &[String]) -> Result<Self, AppError> {
        let mut builder = config::Config::builder();
        for file in files {
            builder = builder.add_source(config::File::with_name(file).required(false));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix("RELAY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let loaded: Self = config.try_deserialize()?;

        tracing::debug!(
            patch_speech = loaded.intercept.patch_speech,
            track_display = loaded.intercept.track_display,
            capture_braille_input = loaded.intercept.capture_braille_input,
            "Configuration loaded"
        );

        Ok(loaded)
    }
}
