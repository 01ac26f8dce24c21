//! Request classification: link-preview crawler or interactive browser.
//!
//! Classification is driven entirely by the `User-Agent` header, matched
//! case-insensitively against a registry of crawler signatures. The registry
//! is plain data, so adding a platform never touches the call sites.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

/// Who is asking for the invite link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// A chat/social platform fetching metadata for a link preview card.
    AutomatedPreviewFetcher,
    /// A person in a browser.
    InteractiveClient,
}

/// Built-in crawler signatures, one per platform.
pub const DEFAULT_SIGNATURES: &[(&str, &str)] = &[
    ("Facebook", "facebookexternalhit"),
    ("Twitter", "twitterbot"),
    ("WhatsApp", "whatsapp"),
    ("Telegram", "telegrambot"),
    ("Pinterest", "pinterest"),
    ("Slack", "slackbot"),
    ("Discord", "discordbot"),
    ("LinkedIn", "linkedinbot"),
    ("Skype", "skypeuripreview"),
    ("Apple", "applebot"),
    ("Bing", "bingbot"),
    ("Google", "googlebot"),
    ("Yandex", "yandex"),
    ("Baidu", "baiduspider"),
    ("Internet Archive", "ia_archiver"),
];

static BUILTIN: LazyLock<SignatureRegistry> = LazyLock::new(SignatureRegistry::builtin);

/// Classify a `User-Agent` value against the built-in registry.
///
/// Total over all inputs; pass `""` for a missing header.
pub fn classify(user_agent: &str) -> Classification {
    BUILTIN.classify(user_agent)
}

/// A single platform's crawler signature.
#[derive(Debug, Clone)]
pub struct BotSignature {
    platform: String,
    pattern: Regex,
}

impl BotSignature {
    /// Compile a case-insensitive signature.
    pub fn new(platform: impl Into<String>, pattern: &str) -> Result<Self, regex::Error> {
        let pattern = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Self {
            platform: platform.into(),
            pattern,
        })
    }

    /// Human-readable platform name.
    pub fn platform(&self) -> &str {
        &self.platform
    }

    /// Whether this signature appears anywhere in `user_agent`.
    pub fn matches(&self, user_agent: &str) -> bool {
        self.pattern.is_match(user_agent)
    }
}

/// Ordered list of crawler signatures. First match wins.
#[derive(Debug, Clone, Default)]
pub struct SignatureRegistry {
    signatures: Vec<BotSignature>,
}

impl SignatureRegistry {
    /// Registry containing [`DEFAULT_SIGNATURES`].
    pub fn builtin() -> Self {
        let signatures = DEFAULT_SIGNATURES
            .iter()
            .map(|(platform, pattern)| {
                BotSignature::new(*platform, pattern).expect("builtin signature should compile")
            })
            .collect();
        Self { signatures }
    }

    /// Built-in registry plus caller-supplied `(platform, pattern)` pairs.
    pub fn with_extra(extra: &[(String, String)]) -> Result<Self, regex::Error> {
        let mut registry = Self::builtin();
        for (platform, pattern) in extra {
            registry.push(BotSignature::new(platform.clone(), pattern)?);
        }
        Ok(registry)
    }

    /// Append a signature.
    pub fn push(&mut self, signature: BotSignature) {
        self.signatures.push(signature);
    }

    /// The first signature matching `user_agent`, if any.
    pub fn matched(&self, user_agent: &str) -> Option<&BotSignature> {
        self.signatures.iter().find(|sig| sig.matches(user_agent))
    }

    /// Classify a `User-Agent` value.
    pub fn classify(&self, user_agent: &str) -> Classification {
        match self.matched(user_agent) {
            Some(sig) => {
                tracing::debug!(platform = %sig.platform(), "preview fetcher detected");
                Classification::AutomatedPreviewFetcher
            }
            None => Classification::InteractiveClient,
        }
    }

    /// Number of signatures.
    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facebook_case_insensitive() {
        assert_eq!(
            classify("Facebookexternalhit/1.1"),
            Classification::AutomatedPreviewFetcher
        );
        assert_eq!(
            classify("facebookexternalhit/1.1 (+http://www.facebook.com/externalhit_uatext.php)"),
            Classification::AutomatedPreviewFetcher
        );
    }

    #[test]
    fn test_every_builtin_signature_matches_uppercased() {
        for (platform, pattern) in DEFAULT_SIGNATURES {
            let ua = format!("Mozilla/5.0 (compatible; {}/1.0)", pattern.to_uppercase());
            assert_eq!(
                classify(&ua),
                Classification::AutomatedPreviewFetcher,
                "{platform} should be detected"
            );
        }
    }

    #[test]
    fn test_messaging_crawlers() {
        for ua in [
            "TelegramBot (like TwitterBot)",
            "WhatsApp/2.23.20.0 A",
            "Mozilla/5.0 (compatible; Discordbot/2.0; +https://discordapp.com)",
            "Slackbot-LinkExpanding 1.0 (+https://api.slack.com/robots)",
            "LinkedInBot/1.0 (compatible; Mozilla/5.0; Apache-HttpClient +http://www.linkedin.com)",
        ] {
            assert_eq!(classify(ua), Classification::AutomatedPreviewFetcher, "{ua}");
        }
    }

    #[test]
    fn test_browsers_are_interactive() {
        for ua in [
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_4) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15",
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36",
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_4 like Mac OS X) AppleWebKit/605.1.15 Mobile/15E148",
        ] {
            assert_eq!(classify(ua), Classification::InteractiveClient, "{ua}");
        }
    }

    #[test]
    fn test_empty_and_garbage_are_interactive() {
        assert_eq!(classify(""), Classification::InteractiveClient);
        assert_eq!(classify("   "), Classification::InteractiveClient);
        assert_eq!(classify("\u{0}\u{fffd}%%%"), Classification::InteractiveClient);
    }

    #[test]
    fn test_matched_reports_platform() {
        let registry = SignatureRegistry::builtin();
        let sig = registry.matched("TelegramBot (like TwitterBot)").unwrap();
        // Registry order decides ties: Twitter comes before Telegram.
        assert_eq!(sig.platform(), "Twitter");
        assert!(registry.matched("curl/8.4.0").is_none());
    }

    #[test]
    fn test_registry_is_extensible() {
        let registry =
            SignatureRegistry::with_extra(&[("Mastodon".to_string(), "mastodon".to_string())])
                .unwrap();
        assert_eq!(registry.len(), DEFAULT_SIGNATURES.len() + 1);
        assert_eq!(
            registry.classify("http.rb/5.1.1 (Mastodon/4.2.0; +https://mastodon.social/)"),
            Classification::AutomatedPreviewFetcher
        );
        // The free function keeps using the built-in set.
        assert_eq!(
            classify("http.rb/5.1.1 (Mastodon/4.2.0; +https://mastodon.social/)"),
            Classification::InteractiveClient
        );
    }

    #[test]
    fn test_invalid_extra_pattern_rejected() {
        assert!(SignatureRegistry::with_extra(&[("Bad".to_string(), "(".to_string())]).is_err());
    }

    #[test]
    fn test_empty_registry_classifies_everything_interactive() {
        let registry = SignatureRegistry::default();
        assert!(registry.is_empty());
        assert_eq!(
            registry.classify("facebookexternalhit/1.1"),
            Classification::InteractiveClient
        );
    }
}
