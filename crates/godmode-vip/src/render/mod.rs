//! HTML rendering for the VIP responder.
//!
//! All rendering uses [maud](https://maud.lambda.xyz/) for compile-time HTML
//! generation with automatic escaping of every dynamic value.

mod metadata;

pub use metadata::{metadata_page, script_string_literal};

/// Inline CSS for error pages.
pub const ERROR_CSS: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
body{font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;display:flex;justify-content:center;align-items:center;min-height:100vh;background:#070809;color:rgba(244,241,234,.95);padding:1rem}
.error-page{text-align:center;max-width:400px}
.error-page h1{font-size:1.5rem;margin-bottom:.75rem}
.error-page p{color:rgba(244,241,234,.7);line-height:1.5}
"#;

/// Inline CSS for the metadata document's visible fallback.
pub const FALLBACK_CSS: &str = r#"
body{font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;background:#070809;color:rgba(244,241,234,.95);display:flex;justify-content:center;align-items:center;min-height:100vh;margin:0}
a{color:#D7B46A}
"#;
