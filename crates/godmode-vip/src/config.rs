//! Application configuration loaded from environment variables.

use std::path::PathBuf;
use std::time::Duration;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:8082").
    pub bind_addr: String,

    /// Fixed public origin (e.g., "https://godmode.app").
    /// When unset, the origin is rebuilt per request from `X-Forwarded-Proto` and `Host`.
    pub public_origin: Option<String>,

    /// Site name used in generic titles and descriptions.
    pub site_name: String,

    /// Local creator directory JSON file.
    pub directory_path: PathBuf,

    /// Remote creator directory JSON URL. Takes precedence over `directory_path`.
    pub directory_url: Option<String>,

    /// Upper bound on a single directory lookup.
    pub directory_timeout: Duration,

    /// Extra `(platform, pattern)` crawler signatures appended to the built-in registry.
    pub extra_bot_signatures: Vec<(String, String)>,

    /// Interactive page served for `/vip` requests that already carry the loop breaker.
    pub page_path: PathBuf,

    /// Optional directory of `{locale}.json` tables overriding the embedded ones.
    pub locales_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8082".to_string(),
            public_origin: None,
            site_name: "Godmode".to_string(),
            directory_path: PathBuf::from("ambassadors.json"),
            directory_url: None,
            directory_timeout: Duration::from_millis(500),
            extra_bot_signatures: Vec::new(),
            page_path: PathBuf::from("public/vip.html"),
            locales_dir: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `VIP_BIND_ADDR`: Server bind address (default: "0.0.0.0:8082")
    /// - `VIP_PUBLIC_ORIGIN`: Fixed origin for links and OG tags (default: derived per request)
    /// - `VIP_SITE_NAME`: Site name (default: "Godmode")
    /// - `VIP_DIRECTORY_PATH`: Creator directory file (default: "ambassadors.json")
    /// - `VIP_DIRECTORY_URL`: Remote creator directory URL (default: unset)
    /// - `VIP_DIRECTORY_TIMEOUT_MS`: Lookup bound in milliseconds (default: 500)
    /// - `VIP_EXTRA_BOT_SIGNATURES`: Comma-separated `name=pattern` crawler signatures
    /// - `VIP_PAGE_PATH`: Interactive page file (default: "public/vip.html")
    /// - `VIP_LOCALES_DIR`: Locale table override directory (default: unset)
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let bind_addr = std::env::var("VIP_BIND_ADDR").unwrap_or(defaults.bind_addr);

        let public_origin = non_empty_var("VIP_PUBLIC_ORIGIN")
            .map(|origin| origin.trim_end_matches('/').to_string());

        let site_name = std::env::var("VIP_SITE_NAME").unwrap_or(defaults.site_name);

        let directory_path = non_empty_var("VIP_DIRECTORY_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.directory_path);

        let directory_url = non_empty_var("VIP_DIRECTORY_URL");

        let directory_timeout = match non_empty_var("VIP_DIRECTORY_TIMEOUT_MS") {
            Some(ms) => Duration::from_millis(ms.trim().parse().map_err(|e| {
                anyhow::anyhow!("VIP_DIRECTORY_TIMEOUT_MS must be an integer: {e}")
            })?),
            None => defaults.directory_timeout,
        };

        let extra_bot_signatures = parse_signatures(
            &std::env::var("VIP_EXTRA_BOT_SIGNATURES").unwrap_or_default(),
        );

        let page_path = non_empty_var("VIP_PAGE_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.page_path);

        let locales_dir = non_empty_var("VIP_LOCALES_DIR").map(PathBuf::from);

        tracing::info!(
            bind_addr = %bind_addr,
            public_origin = ?public_origin,
            site_name = %site_name,
            directory_path = %directory_path.display(),
            directory_url = ?directory_url,
            directory_timeout_ms = directory_timeout.as_millis() as u64,
            extra_signatures = extra_bot_signatures.len(),
            "vip configuration loaded"
        );

        Ok(Self {
            bind_addr,
            public_origin,
            site_name,
            directory_path,
            directory_url,
            directory_timeout,
            extra_bot_signatures,
            page_path,
            locales_dir,
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Parse `name=pattern` pairs. A bare `pattern` is its own platform name.
fn parse_signatures(raw: &str) -> Vec<(String, String)> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|entry| match entry.split_once('=') {
            Some((name, pattern)) if !pattern.trim().is_empty() => {
                Some((name.trim().to_string(), pattern.trim().to_string()))
            }
            Some(_) => None,
            None => Some((entry.to_string(), entry.to_string())),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Mutex to serialize config tests that manipulate env vars.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const ENV_KEYS: &[&str] = &[
        "VIP_BIND_ADDR",
        "VIP_PUBLIC_ORIGIN",
        "VIP_SITE_NAME",
        "VIP_DIRECTORY_PATH",
        "VIP_DIRECTORY_URL",
        "VIP_DIRECTORY_TIMEOUT_MS",
        "VIP_EXTRA_BOT_SIGNATURES",
        "VIP_PAGE_PATH",
        "VIP_LOCALES_DIR",
    ];

    /// Helper to run config tests with isolated env vars.
    fn with_env_vars<F: FnOnce()>(vars: &[(&str, &str)], f: F) {
        let _guard = ENV_MUTEX.lock().unwrap();

        let saved: Vec<_> = ENV_KEYS
            .iter()
            .map(|k| (*k, std::env::var(k).ok()))
            .collect();

        // SAFETY: Serialized by mutex; only test code touches these vars.
        unsafe {
            for k in ENV_KEYS {
                std::env::remove_var(k);
            }
            for (k, v) in vars {
                std::env::set_var(k, v);
            }
        }

        f();

        // SAFETY: Restoring original env state.
        unsafe {
            for (k, v) in &saved {
                match v {
                    Some(val) => std::env::set_var(k, val),
                    None => std::env::remove_var(k),
                }
            }
        }
    }

    #[test]
    fn config_defaults() {
        with_env_vars(&[], || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.bind_addr, "0.0.0.0:8082");
            assert_eq!(config.public_origin, None);
            assert_eq!(config.site_name, "Godmode");
            assert_eq!(config.directory_path, PathBuf::from("ambassadors.json"));
            assert_eq!(config.directory_url, None);
            assert_eq!(config.directory_timeout, Duration::from_millis(500));
            assert!(config.extra_bot_signatures.is_empty());
            assert_eq!(config.page_path, PathBuf::from("public/vip.html"));
            assert!(config.locales_dir.is_none());
        });
    }

    #[test]
    fn config_custom_values() {
        with_env_vars(
            &[
                ("VIP_BIND_ADDR", "127.0.0.1:9090"),
                ("VIP_PUBLIC_ORIGIN", "https://godmode.app/"),
                ("VIP_SITE_NAME", "Godmode Beta"),
                ("VIP_DIRECTORY_URL", "https://cdn.godmode.app/ambassadors.json"),
                ("VIP_DIRECTORY_TIMEOUT_MS", "250"),
                ("VIP_LOCALES_DIR", "/srv/locales"),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.bind_addr, "127.0.0.1:9090");
                assert_eq!(config.public_origin.as_deref(), Some("https://godmode.app"));
                assert_eq!(config.site_name, "Godmode Beta");
                assert_eq!(
                    config.directory_url.as_deref(),
                    Some("https://cdn.godmode.app/ambassadors.json")
                );
                assert_eq!(config.directory_timeout, Duration::from_millis(250));
                assert_eq!(config.locales_dir, Some(PathBuf::from("/srv/locales")));
            },
        );
    }

    #[test]
    fn config_blank_origin_is_unset() {
        with_env_vars(&[("VIP_PUBLIC_ORIGIN", "  ")], || {
            let config = Config::from_env().unwrap();
            assert!(config.public_origin.is_none());
        });
    }

    #[test]
    fn config_invalid_timeout_rejected() {
        with_env_vars(&[("VIP_DIRECTORY_TIMEOUT_MS", "soon")], || {
            assert!(Config::from_env().is_err());
        });
    }

    #[test]
    fn config_extra_signatures() {
        with_env_vars(
            &[(
                "VIP_EXTRA_BOT_SIGNATURES",
                "Mastodon=mastodon, embedly ,Broken=",
            )],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(
                    config.extra_bot_signatures,
                    vec![
                        ("Mastodon".to_string(), "mastodon".to_string()),
                        ("embedly".to_string(), "embedly".to_string()),
                    ]
                );
            },
        );
    }

    #[test]
    fn parse_signatures_empty() {
        assert!(parse_signatures("").is_empty());
        assert!(parse_signatures(" , ,").is_empty());
    }
}
