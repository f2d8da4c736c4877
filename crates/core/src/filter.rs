//! Keyword matching over fetched deals.

use crate::{Deal, SeenSet};

/// Default watch list, matching the e-reader terms the service shipped with.
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "kindle", "ereader", "e-reader", "e-ink", "kobo", "nook", "eink",
];

/// True if any keyword is a case-insensitive substring of the deal's title,
/// write-up body, or features text. Pure and deterministic.
pub fn keyword_match(deal: &Deal, keywords: &[String]) -> bool {
    let haystacks = [
        deal.title.to_lowercase(),
        deal.write_up_body.to_lowercase(),
        deal.features.to_lowercase(),
    ];

    keywords
        .iter()
        .filter(|k| !k.is_empty())
        .map(|k| k.to_lowercase())
        .any(|k| haystacks.iter().any(|h| h.contains(&k)))
}

/// Select the deals worth notifying about: drop anything without an id or
/// whose id was already notified, then keep keyword matches. Input order is
/// preserved.
pub fn select_new_deals(deals: &[Deal], seen: &SeenSet, keywords: &[String]) -> Vec<Deal> {
    deals
        .iter()
        .filter(|deal| !deal.id.is_empty() && !seen.contains(&deal.id))
        .filter(|deal| keyword_match(deal, keywords))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn keywords(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn deal(id: &str, title: &str) -> Deal {
        Deal {
            id: id.to_string(),
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_keyword_match_case_insensitive() {
        let d = deal("A1", "KINDLE Paperwhite 11th Gen");
        assert!(keyword_match(&d, &keywords(&["kindle"])));
        assert!(keyword_match(&d, &keywords(&["PAPERWHITE"])));
        assert!(!keyword_match(&d, &keywords(&["kobo"])));
    }

    #[test]
    fn test_keyword_match_checks_writeup_and_features() {
        let mut d = deal("A1", "Mystery Tech Box");
        assert!(!keyword_match(&d, &keywords(&["e-ink"])));

        d.write_up_body = "Includes an E-Ink display".to_string();
        assert!(keyword_match(&d, &keywords(&["e-ink"])));

        d.write_up_body.clear();
        d.features = "6\" e-ink screen".to_string();
        assert!(keyword_match(&d, &keywords(&["e-ink"])));
    }

    #[test]
    fn test_keyword_match_empty_keywords() {
        let d = deal("A1", "Kindle Paperwhite");
        assert!(!keyword_match(&d, &[]));
        // Empty strings never match (they are substrings of everything)
        assert!(!keyword_match(&d, &keywords(&[""])));
    }

    #[test]
    fn test_select_new_deals_dedups_before_matching() {
        let seen: SeenSet = ["A1".to_string()].into_iter().collect();
        let deals = vec![
            deal("A1", "Kindle Oasis"),
            deal("A2", "Kindle Paperwhite"),
        ];

        // A1 matches the keyword but is already seen
        let selected = select_new_deals(&deals, &seen, &keywords(&["kindle"]));
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id, "A2");
    }

    #[test]
    fn test_select_new_deals_skips_missing_id() {
        let deals = vec![deal("", "Kindle Paperwhite"), deal("A2", "Kindle Scribe")];
        let selected = select_new_deals(&deals, &SeenSet::new(), &keywords(&["kindle"]));
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id, "A2");
    }

    #[test]
    fn test_select_new_deals_preserves_order() {
        let deals = vec![
            deal("A3", "Kobo Libra"),
            deal("A1", "Nook GlowLight"),
            deal("A2", "Kindle Scribe"),
        ];
        let selected = select_new_deals(
            &deals,
            &SeenSet::new(),
            &keywords(&["kindle", "kobo", "nook"]),
        );
        let ids: Vec<&str> = selected.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["A3", "A1", "A2"]);
    }

    #[test]
    fn test_no_matches_selects_nothing() {
        let deals = vec![deal("A1", "4K Monitor"), deal("A2", "USB Hub")];
        let selected = select_new_deals(&deals, &SeenSet::new(), &keywords(&["kindle"]));
        assert!(selected.is_empty());
    }

    #[test]
    fn test_default_keywords_cover_ereaders() {
        let defaults: Vec<String> = DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect();
        assert!(keyword_match(&deal("A1", "Kobo Clara BW"), &defaults));
        assert!(keyword_match(&deal("A2", "Refurb Kindle"), &defaults));
        assert!(!keyword_match(&deal("A3", "Gaming Laptop"), &defaults));
    }
}
