//! Link-preview metadata document.
//!
//! Crawlers read the `<head>`; anything that actually follows the meta
//! refresh or runs the script lands on the loop-broken page.

use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::respond::MetadataDocument;

/// Twitter Card type for a large preview image.
const TWITTER_CARD: &str = "summary_large_image";

/// Render the full metadata document.
pub fn metadata_page(doc: &MetadataDocument) -> Markup {
    let refresh = format!("0;url={}", doc.redirect_url);
    let script = format!(
        "window.location.href = {};",
        script_string_literal(&doc.redirect_url)
    );

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (doc.title) }
                meta name="description" content=(doc.description);
                link rel="canonical" href=(doc.canonical_url);

                // Open Graph / Facebook / WhatsApp / Telegram
                meta property="og:type" content="website";
                meta property="og:site_name" content=(doc.site_name);
                meta property="og:url" content=(doc.canonical_url);
                meta property="og:title" content=(doc.title);
                meta property="og:description" content=(doc.description);
                meta property="og:image" content=(doc.preview_image_url);

                // Twitter
                meta name="twitter:card" content=(TWITTER_CARD);
                meta name="twitter:url" content=(doc.canonical_url);
                meta name="twitter:title" content=(doc.title);
                meta name="twitter:description" content=(doc.description);
                meta name="twitter:image" content=(doc.preview_image_url);

                meta http-equiv="refresh" content=(refresh);
                style { (PreEscaped(super::FALLBACK_CSS)) }
            }
            body {
                script { (PreEscaped(script)) }
                noscript {
                    a href=(doc.redirect_url) { "Open your invite" }
                }
            }
        }
    }
}

/// Encode `s` as a JavaScript string literal safe inside `<script>`.
pub fn script_string_literal(s: &str) -> String {
    serde_json::to_string(s)
        .unwrap_or_default()
        .replace("</", "<\\/")
}
