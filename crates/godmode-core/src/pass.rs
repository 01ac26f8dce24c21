//! Invite pass: the plain data contract consumed by the interactive page.
//!
//! Everything the pass UI shows is derived here from a [`CreatorRecord`], so
//! the page itself only has to place strings.

use serde::Serialize;

use crate::directory::CreatorRecord;

/// App Store redemption URL prefix; the VIP code is appended verbatim.
pub const APP_STORE_REDEEM_URL: &str = "https://apps.apple.com/redeem?code=";

/// Public redeem landing page referenced in share text.
pub const REDEEM_LANDING_URL: &str = "https://godmode.app/redeem";

/// Maximum length of the short id printed on the pass card.
const CARD_ID_LEN: usize = 6;

/// One community code with its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareCode {
    /// Two-digit, 1-based position ("01", "02", ...).
    pub index: String,
    /// The code itself.
    pub code: String,
}

/// Fully derived view of a creator's invite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvitePass {
    pub name: String,
    pub initials: String,
    pub card_id: String,
    pub vip_code: String,
    pub redeem_url: String,
    pub share_codes: Vec<ShareCode>,
    pub share_text: String,
}

impl InvitePass {
    /// Derive the pass view for a creator record.
    pub fn from_record(record: &CreatorRecord) -> Self {
        Self {
            name: record.name.clone(),
            initials: initials(&record.name),
            card_id: card_id(&record.vip_code),
            vip_code: record.vip_code.clone(),
            redeem_url: redeem_url(&record.vip_code),
            share_codes: record
                .community_codes
                .iter()
                .enumerate()
                .map(|(i, code)| ShareCode {
                    index: index_label(i),
                    code: code.clone(),
                })
                .collect(),
            share_text: share_text(&record.community_codes),
        }
    }
}

/// First two characters of the name, upper-cased.
pub fn initials(name: &str) -> String {
    name.chars().take(2).collect::<String>().to_uppercase()
}

/// Short id shown on the card: the last `-` segment of the code, capped at six characters.
pub fn card_id(vip_code: &str) -> String {
    vip_code
        .rsplit('-')
        .next()
        .unwrap_or_default()
        .chars()
        .take(CARD_ID_LEN)
        .collect()
}

/// External redemption URL for a VIP code.
pub fn redeem_url(vip_code: &str) -> String {
    format!("{APP_STORE_REDEEM_URL}{vip_code}")
}

/// Text shared by the "share all" action.
pub fn share_text(codes: &[String]) -> String {
    let lines = codes
        .iter()
        .enumerate()
        .map(|(i, code)| format!("{} — {code}", index_label(i)))
        .collect::<Vec<_>>()
        .join("\n");
    format!("Godmode — 1-month passes\nRedeem link: {REDEEM_LANDING_URL}\n\n{lines}")
}

fn index_label(i: usize) -> String {
    format!("{:02}", i + 1)
}
