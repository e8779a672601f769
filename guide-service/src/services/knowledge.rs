//! Lookups into the caller-supplied knowledge base.

use crate::models::loose::is_truthy;
use crate::models::KnowledgeBase;
use serde_json::Value;

/// Guideline entry used when the requested platform has none.
pub const DEFAULT_PLATFORM: &str = "web";

/// Guideline for `platform`, matched on its lowercased name. A missing or
/// falsy entry (`null`, `false`, `0`, `""`) falls back to the `web` entry,
/// which is returned as-is.
pub fn platform_guideline<'a>(kb: &'a KnowledgeBase, platform: &str) -> Option<&'a Value> {
    kb.guidelines
        .get(platform.to_lowercase().as_str())
        .filter(|v| is_truthy(v))
        .or_else(|| kb.guidelines.get(DEFAULT_PLATFORM))
}

/// First color group, in document order, whose `keywords` list contains
/// `keyword` exactly (case-sensitive, no type coercion).
///
/// Groups are only inspected up to the match: an entry without a keyword
/// list is an error when the scan reaches it, and ignored after a match.
/// With no keyword every group is scanned and nothing matches.
pub fn color_group_for<'a>(
    kb: &'a KnowledgeBase,
    keyword: Option<&Value>,
) -> Result<Option<(&'a str, &'a Value)>, String> {
    for (name, group) in kb.iri_colors.iter() {
        let keywords = group
            .get("keywords")
            .and_then(Value::as_array)
            .ok_or_else(|| format!("color group '{}' has no keywords list", name))?;

        if keyword.is_some_and(|k| keywords.contains(k)) {
            return Ok(Some((name, group)));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn kb() -> KnowledgeBase {
        serde_json::from_value(json!({
            "guidelines": {
                "web": { "bodySize": "16px" },
                "ios": { "bodySize": "17pt" },
                "android": null,
                "watch": "",
                "tv": 0,
                "car": false
            },
            "iri_colors": {
                "soft": { "keywords": ["gentle", "calm"] },
                "cool": { "keywords": ["calm", "clear"] },
                "loud": { "keywords": ["Bold", 7] }
            }
        }))
        .unwrap()
    }

    #[test]
    fn platform_match_is_case_insensitive() {
        let kb = kb();
        assert_eq!(
            platform_guideline(&kb, "iOS"),
            Some(&json!({ "bodySize": "17pt" }))
        );
    }

    #[test]
    fn unknown_platform_uses_web() {
        let kb = kb();
        assert_eq!(
            platform_guideline(&kb, "Windows"),
            Some(&json!({ "bodySize": "16px" }))
        );
    }

    #[test]
    fn falsy_entries_fall_back_to_web() {
        let kb = kb();
        for platform in ["android", "watch", "tv", "car"] {
            assert_eq!(
                platform_guideline(&kb, platform),
                Some(&json!({ "bodySize": "16px" })),
                "platform {}",
                platform
            );
        }
    }

    #[test]
    fn no_web_entry_yields_none() {
        let kb: KnowledgeBase = serde_json::from_value(json!({
            "guidelines": { "ios": {} },
            "iri_colors": {}
        }))
        .unwrap();
        assert!(platform_guideline(&kb, "desktop").is_none());
    }

    #[test]
    fn first_matching_group_wins() {
        let kb = kb();
        let (name, _) = color_group_for(&kb, Some(&json!("calm"))).unwrap().unwrap();
        assert_eq!(name, "soft");
    }

    #[test]
    fn keyword_match_is_case_sensitive() {
        let kb = kb();
        assert!(color_group_for(&kb, Some(&json!("bold"))).unwrap().is_none());
        assert_eq!(
            color_group_for(&kb, Some(&json!("Bold")))
                .unwrap()
                .map(|(n, _)| n),
            Some("loud")
        );
    }

    #[test]
    fn non_string_keyword_matches_same_typed_entry() {
        let kb = kb();
        assert_eq!(
            color_group_for(&kb, Some(&json!(7))).unwrap().map(|(n, _)| n),
            Some("loud")
        );
        assert!(color_group_for(&kb, Some(&json!("7"))).unwrap().is_none());
    }

    #[test]
    fn no_match_yields_none() {
        assert!(color_group_for(&kb(), Some(&json!("angry"))).unwrap().is_none());
        assert!(color_group_for(&kb(), None).unwrap().is_none());
    }

    #[test]
    fn entries_after_match_are_not_inspected() {
        let kb: KnowledgeBase = serde_json::from_value(json!({
            "guidelines": {},
            "iri_colors": {
                "serene": { "keywords": ["calm"] },
                "_meta": { "version": 2 }
            }
        }))
        .unwrap();

        let (name, _) = color_group_for(&kb, Some(&json!("calm"))).unwrap().unwrap();
        assert_eq!(name, "serene");
    }

    #[test]
    fn entry_without_keywords_before_match_is_an_error() {
        let kb: KnowledgeBase = serde_json::from_value(json!({
            "guidelines": {},
            "iri_colors": {
                "_meta": { "version": 2 },
                "serene": { "keywords": ["calm"] }
            }
        }))
        .unwrap();

        let err = color_group_for(&kb, Some(&json!("calm"))).unwrap_err();
        assert!(err.contains("_meta"));
    }
}
