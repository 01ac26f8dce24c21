//! Core types for Godmode VIP invites.
//!
//! This crate provides:
//! - The creator directory (id → invite record) and its JSON loading
//! - The invite pass data contract consumed by the interactive page
//! - An explicit localization context with `{variable}` interpolation
//! - Shared error types

pub mod directory;
mod error;
pub mod i18n;
pub mod pass;

pub use directory::{CreatorDirectory, CreatorRecord, capitalize_first};
pub use error::{Error, Result};
pub use i18n::{Localizer, detect_locale};
pub use pass::InvitePass;
