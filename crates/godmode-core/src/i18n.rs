//! Localization context.
//!
//! A [`Localizer`] is built once per locale and is read-only afterwards.
//! Keys are dotted paths into a nested JSON table (`"vip.header_title"`), and
//! templates interpolate `{variable}` placeholders. A missing key is never an
//! error: [`Localizer::t`] hands the key back unchanged.

use std::path::Path;

use serde_json::Value;

use crate::error::{Error, Result};

/// Locale used when nothing else matches or a table fails to load.
pub const DEFAULT_LOCALE: &str = "en";

const EN_TABLE: &str = include_str!("../locales/en.json");
const ES_TABLE: &str = include_str!("../locales/es.json");

/// Pick a supported locale.
///
/// Priority: explicit `lang` query value, then the first `Accept-Language`
/// tag. Anything starting with `es` maps to Spanish; everything else is English.
pub fn detect_locale(query_lang: Option<&str>, accept_language: Option<&str>) -> &'static str {
    let candidate = query_lang
        .filter(|l| !l.trim().is_empty())
        .or_else(|| accept_language.and_then(|h| h.split(',').next()))
        .map(|l| l.trim().to_ascii_lowercase());

    match candidate {
        Some(lang) if lang.starts_with("es") => "es",
        _ => DEFAULT_LOCALE,
    }
}

/// Read-only translation table for a single locale.
#[derive(Debug, Clone)]
pub struct Localizer {
    locale: String,
    table: Value,
}

impl Localizer {
    /// Build from a JSON table. The root must be an object.
    pub fn from_json(locale: &str, json: &str) -> Result<Self> {
        let table: Value = serde_json::from_str(json)?;
        if !table.is_object() {
            return Err(Error::MalformedLocale(locale.to_string()));
        }
        Ok(Self {
            locale: locale.to_string(),
            table,
        })
    }

    /// Tables compiled into the binary (`en`, `es`).
    pub fn embedded(locale: &str) -> Result<Self> {
        match locale {
            "en" => Self::from_json(locale, EN_TABLE),
            "es" => Self::from_json(locale, ES_TABLE),
            other => Err(Error::UnknownLocale(other.to_string())),
        }
    }

    /// Load `{dir}/{locale}.json`.
    pub fn from_dir(dir: &Path, locale: &str) -> Result<Self> {
        let path = dir.join(format!("{locale}.json"));
        let contents = std::fs::read_to_string(&path)?;
        Self::from_json(locale, &contents)
    }

    /// Load a locale, falling back step by step and never failing.
    ///
    /// Order: override directory (if any), embedded table, embedded English,
    /// and finally an empty table in which every lookup returns its key.
    pub fn load(override_dir: Option<&Path>, locale: &str) -> Self {
        if let Some(dir) = override_dir {
            match Self::from_dir(dir, locale) {
                Ok(localizer) => return localizer,
                Err(e) => {
                    tracing::warn!(locale, dir = %dir.display(), error = %e, "locale override failed to load");
                }
            }
        }

        match Self::embedded(locale) {
            Ok(localizer) => localizer,
            Err(e) if locale != DEFAULT_LOCALE => {
                tracing::warn!(locale, error = %e, "falling back to default locale");
                Self::load(override_dir, DEFAULT_LOCALE)
            }
            Err(e) => {
                tracing::error!(error = %e, "default locale unavailable");
                Self {
                    locale: DEFAULT_LOCALE.to_string(),
                    table: Value::Object(Default::default()),
                }
            }
        }
    }

    /// Locale code of this table.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Translate `key`, substituting every `{name}` with its value from `vars`.
    ///
    /// Returns `key` itself when the path does not lead to a string.
    pub fn t(&self, key: &str, vars: &[(&str, &str)]) -> String {
        let template = key
            .split('.')
            .try_fold(&self.table, |node, segment| node.get(segment))
            .and_then(Value::as_str);

        let Some(template) = template else {
            tracing::warn!(key, locale = %self.locale, "translation key not found");
            return key.to_string();
        };

        vars.iter()
            .fold(template.to_string(), |acc, (name, value)| {
                acc.replace(&format!("{{{name}}}"), value)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_locale_query_wins() {
        assert_eq!(detect_locale(Some("es-MX"), Some("en-US")), "es");
        assert_eq!(detect_locale(Some("en"), Some("es-ES")), "en");
    }

    #[test]
    fn test_detect_locale_accept_language() {
        assert_eq!(detect_locale(None, Some("es-ES,es;q=0.9,en;q=0.8")), "es");
        assert_eq!(detect_locale(None, Some("fr-FR,fr;q=0.9")), "en");
        assert_eq!(detect_locale(Some(""), Some("ES")), "es");
    }

    #[test]
    fn test_detect_locale_default() {
        assert_eq!(detect_locale(None, None), "en");
    }

    #[test]
    fn test_embedded_tables_parse() {
        assert_eq!(Localizer::embedded("en").unwrap().locale(), "en");
        assert_eq!(Localizer::embedded("es").unwrap().locale(), "es");
        assert!(matches!(
            Localizer::embedded("fr"),
            Err(Error::UnknownLocale(_))
        ));
    }

    #[test]
    fn test_t_nested_with_interpolation() {
        let l = Localizer::from_json(
            "en",
            r#"{"vip": {"passes": "{count} passes for {name}, {name}!"}}"#,
        )
        .unwrap();
        assert_eq!(
            l.t("vip.passes", &[("count", "10"), ("name", "Ana")]),
            "10 passes for Ana, Ana!"
        );
    }

    #[test]
    fn test_t_miss_returns_key() {
        let l = Localizer::embedded("en").unwrap();
        assert_eq!(l.t("vip.does_not_exist", &[]), "vip.does_not_exist");
        // Intermediate node that is an object, not a string.
        assert_eq!(l.t("vip", &[]), "vip");
    }

    #[test]
    fn test_embedded_header_title() {
        let en = Localizer::embedded("en").unwrap();
        let es = Localizer::embedded("es").unwrap();
        assert_eq!(
            en.t("vip.header_title", &[("name", "Antonio")]),
            "Antonio’s Creator Access"
        );
        assert!(es.t("vip.header_title", &[("name", "Antonio")]).contains("Antonio"));
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        assert!(matches!(
            Localizer::from_json("en", "[]"),
            Err(Error::MalformedLocale(_))
        ));
    }

    #[test]
    fn test_load_falls_back_to_default() {
        let l = Localizer::load(None, "de");
        assert_eq!(l.locale(), "en");
    }

    #[test]
    fn test_load_prefers_override_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("es.json"),
            r#"{"vip": {"header_title": "Acceso de {name}"}}"#,
        )
        .unwrap();
        let l = Localizer::load(Some(dir.path()), "es");
        assert_eq!(l.t("vip.header_title", &[("name", "Ana")]), "Acceso de Ana");
    }

    #[test]
    fn test_load_override_missing_uses_embedded() {
        let dir = tempfile::tempdir().unwrap();
        let l = Localizer::load(Some(dir.path()), "es");
        assert_eq!(l.locale(), "es");
        assert_ne!(l.t("vip.header_title", &[]), "vip.header_title");
    }
}
