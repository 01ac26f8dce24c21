//! Application state shared across all request handlers.
//!
//! Everything here is built once at startup and read-only afterwards.

use std::sync::Arc;

use godmode_core::Localizer;

use crate::classify::SignatureRegistry;
use crate::config::Config;
use crate::directory::DirectorySource;

/// Locale tables loaded at startup.
#[derive(Debug, Clone)]
pub struct LocaleTables {
    en: Localizer,
    es: Localizer,
}

impl LocaleTables {
    /// Load the supported locales, honoring an optional override directory.
    pub fn load(config: &Config) -> Self {
        let dir = config.locales_dir.as_deref();
        Self {
            en: Localizer::load(dir, "en"),
            es: Localizer::load(dir, "es"),
        }
    }

    /// Table for a locale code from [`godmode_core::detect_locale`].
    pub fn get(&self, locale: &str) -> &Localizer {
        match locale {
            "es" => &self.es,
            _ => &self.en,
        }
    }
}

/// Shared application state available to all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<Config>,

    /// Crawler signatures used to classify requests.
    pub signatures: Arc<SignatureRegistry>,

    /// Creator directory.
    pub directory: DirectorySource,

    /// Translation tables for the invite API.
    pub locales: Arc<LocaleTables>,
}

impl AppState {
    /// Create a new application state from configuration.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let signatures = SignatureRegistry::with_extra(&config.extra_bot_signatures)?;
        let directory = DirectorySource::from_config(&config)?;
        let locales = LocaleTables::load(&config);

        tracing::info!(
            signatures = signatures.len(),
            en = locales.en.locale(),
            es = locales.es.locale(),
            "application state initialized"
        );

        Ok(Self::from_parts(config, signatures, directory, locales))
    }

    /// Assemble state from already-built parts.
    pub fn from_parts(
        config: Config,
        signatures: SignatureRegistry,
        directory: DirectorySource,
        locales: LocaleTables,
    ) -> Self {
        Self {
            config: Arc::new(config),
            signatures: Arc::new(signatures),
            directory,
            locales: Arc::new(locales),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn locale_tables_fall_back_to_english() {
        let tables = LocaleTables::load(&Config::default());
        assert_eq!(tables.get("es").locale(), "es");
        assert_eq!(tables.get("en").locale(), "en");
        assert_eq!(tables.get("de").locale(), "en");
    }

    #[test]
    fn new_rejects_invalid_extra_signature() {
        let config = Config {
            directory_path: PathBuf::from("/definitely/not/here.json"),
            extra_bot_signatures: vec![("Broken".to_string(), "(".to_string())],
            ..Config::default()
        };
        assert!(AppState::new(config).is_err());
    }

    #[test]
    fn new_with_missing_directory_succeeds() {
        let config = Config {
            directory_path: PathBuf::from("/definitely/not/here.json"),
            ..Config::default()
        };
        let state = AppState::new(config).unwrap();
        assert!(!state.signatures.is_empty());
    }
}
