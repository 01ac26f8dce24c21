//! Godmode VIP - crawler-aware responder for personalized invite links.
//!
//! A shared invite link (`/vip?id=antonio`) has two very different audiences:
//! chat and social platforms fetching a preview card, and the person who taps
//! the link. This crate answers both from a single route.
//!
//! # Architecture
//!
//! - **Classify**: matches `User-Agent` against a registry of link-preview crawler signatures
//! - **Respond**: builds an Open Graph document for crawlers or a 307 redirect for browsers
//! - **Directory**: resolves creator ids to display names, local file or remote JSON
//! - **Render**: maud templates for the metadata document and error pages
//!
//! # Loop safety
//!
//! Every redirect target carries `_r=1`. `/vip` requests that already carry it
//! are served the interactive page instead of re-entering the responder.

pub mod classify;
pub mod config;
pub mod directory;
pub mod error;
pub mod render;
pub mod respond;
pub mod routes;
pub mod state;

pub use classify::{Classification, SignatureRegistry, classify};
pub use config::Config;
pub use routes::router;
pub use state::AppState;
