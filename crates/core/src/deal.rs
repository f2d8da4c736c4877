//! Deal types mapped from the Woot affiliate API payloads.

use serde::{Deserialize, Serialize};

/// Maximum length of the description snippet used in notifications.
pub const SNIPPET_MAX_CHARS: usize = 200;

/// A purchasable variant of an offer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct OfferItem {
    pub sale_price: f64,
    pub list_price: f64,
}

/// One product offer as returned by the offers endpoint.
///
/// Immutable once fetched; the remote API is the source of truth. Fields the
/// API omits deserialize to their defaults so a sparse offer still parses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Deal {
    pub id: String,
    pub title: String,
    pub url: String,
    pub write_up_body: String,
    pub write_up_intro: String,
    pub snippet: String,
    pub features: String,
    pub items: Vec<OfferItem>,
    pub categories: Vec<String>,
}

impl Deal {
    /// Sale price of the first item, if any item carries one.
    pub fn sale_price(&self) -> Option<f64> {
        self.items.first().map(|item| item.sale_price)
    }

    /// Savings versus list price, when the list price is actually higher.
    pub fn savings(&self) -> Option<f64> {
        let item = self.items.first()?;
        if item.list_price > item.sale_price {
            Some(item.list_price - item.sale_price)
        } else {
            None
        }
    }

    /// Description for notifications: the write-up intro when present,
    /// falling back to the short snippet, truncated to [`SNIPPET_MAX_CHARS`].
    pub fn short_description(&self) -> String {
        let text = if self.write_up_intro.is_empty() {
            self.snippet.as_str()
        } else {
            self.write_up_intro.as_str()
        };
        truncate_chars(text, SNIPPET_MAX_CHARS)
    }
}

/// Truncate to at most `max` characters, ending with "..." when cut.
/// Counts chars, not bytes, so multi-byte text never splits mid-character.
fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}
