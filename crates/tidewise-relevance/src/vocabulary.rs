//! Static vocabularies: the related-term table used by semantic matching and
//! the fixed candidate pools used by autocomplete.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Built-in related terms, keyed by lowercase query token.
const BUILTIN_RELATED_TERMS: &[(&str, &[&str])] = &[
    ("swim", &["swimming", "water", "lake", "pool"]),
    ("swimming", &["swim", "water", "lake", "pool"]),
    ("fish", &["fishing", "angler", "tackle", "lure", "rod"]),
    ("fishing", &["fish", "angler", "tackle", "rod"]),
    ("kayak", &["kayaking", "paddle", "canoe", "boat"]),
    ("paddle", &["paddling", "kayak", "canoe", "paddleboard", "sup"]),
    ("boat", &["boating", "kayak", "canoe", "pontoon", "sailing"]),
    ("surf", &["surfing", "wave", "board", "wakesurf"]),
    ("wake", &["wakeboard", "wakeboarding", "wakesurf", "tow"]),
    ("ski", &["skiing", "water ski", "tow", "rope"]),
    ("sun", &["sunscreen", "uv", "shade", "hat", "sunglasses"]),
    ("dry", &["waterproof", "dry bag", "quick-dry"]),
    ("cold", &["wetsuit", "thermal", "neoprene", "fleece"]),
    ("safety", &["life jacket", "pfd", "vest", "whistle"]),
    ("camp", &["camping", "tent", "lakeside", "outdoor"]),
    ("beach", &["shore", "sand", "towel", "lake"]),
    ("snorkel", &["snorkeling", "mask", "fins", "underwater"]),
    ("dive", &["diving", "scuba", "snorkel", "underwater"]),
    ("summer", &["sun", "beach", "swim", "lake"]),
    ("shorts", &["board shorts", "trunks", "swimwear"]),
];

/// Product categories offered as autocomplete candidates.
pub const CATEGORIES: &[&str] = &[
    "Apparel",
    "Accessories",
    "Water Sports",
    "Fishing",
    "Safety",
    "Camping",
    "Footwear",
];

/// Activities offered as autocomplete candidates.
pub const ACTIVITIES: &[&str] = &[
    "swimming",
    "fishing",
    "kayaking",
    "paddleboarding",
    "wakeboarding",
    "water skiing",
    "boating",
    "snorkeling",
    "tubing",
    "sailing",
];

/// Water bodies offered as autocomplete candidates.
pub const LOCATIONS: &[&str] = &[
    "Lake Tahoe",
    "Lake Michigan",
    "Lake Powell",
    "Lake Havasu",
    "Lake of the Ozarks",
    "Lake Champlain",
    "Flathead Lake",
    "Crater Lake",
];

/// Lookup from a query token to loosely associated vocabulary.
#[derive(Debug, Clone, Default)]
pub struct RelatedTerms {
    table: HashMap<String, Vec<String>>,
}

impl RelatedTerms {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in table.
    pub fn builtin() -> Self {
        let table = BUILTIN_RELATED_TERMS
            .iter()
            .map(|(term, related)| {
                (
                    term.to_string(),
                    related.iter().map(|r| r.to_string()).collect(),
                )
            })
            .collect();
        Self { table }
    }

    /// Merges extra entries over the current table. Related terms are
    /// lowercased and appended without duplicates.
    pub fn with_extra(mut self, extra: &HashMap<String, Vec<String>>) -> Self {
        for (term, related) in extra {
            let entry = self.table.entry(term.to_lowercase()).or_default();
            for r in related {
                let r = r.to_lowercase();
                if !entry.contains(&r) {
                    entry.push(r);
                }
            }
        }
        self
    }

    /// Related terms for a lowercase token, empty when unknown.
    pub fn related(&self, token: &str) -> &[String] {
        self.table.get(token).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

/// Fixed autocomplete pools (product names come from the catalog itself).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    pub categories: Vec<String>,
    pub activities: Vec<String>,
    pub locations: Vec<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        fn owned(items: &[&str]) -> Vec<String> {
            items.iter().map(|s| s.to_string()).collect()
        }

        Self {
            categories: owned(CATEGORIES),
            activities: owned(ACTIVITIES),
            locations: owned(LOCATIONS),
        }
    }
}
