//! Heading scan and outline construction.
//!
//! Scans rendered fragments for `<h1>`–`<h4>` in document order and
//! assigns each heading a unique anchor id. Deeper levels stay out of
//! the outline. The disambiguation map is local to one scan call.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::model::{Fragment, OutlineEntry};

/// Anchor used when a heading slugifies to nothing.
const FALLBACK_SLUG: &str = "section";

/// Matches `<h1>`–`<h4>` elements; group 1 is the level, group 2 the body.
pub(crate) fn heading_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)<h([1-4])(?:\s[^>]*)?>(.*?)</h[1-4]>").expect("valid pattern")
    })
}

/// Scan fragments for headings and build the outline.
pub fn scan(fragments: &[Fragment]) -> Vec<OutlineEntry> {
    let mut counters: HashMap<String, usize> = HashMap::new();
    let mut used: HashSet<String> = HashSet::new();
    let mut outline = Vec::new();

    for fragment in fragments {
        for captures in heading_regex().captures_iter(&fragment.html) {
            let level: u8 = captures[1].parse().expect("single digit level");
            let text = heading_text(&captures[2]);
            if text.is_empty() {
                continue;
            }

            let base = {
                let slug = slugify(&text);
                if slug.is_empty() {
                    FALLBACK_SLUG.to_string()
                } else {
                    slug
                }
            };

            // First occurrence keeps the bare slug; later ones get -1, -2, …
            // Suffixed anchors can themselves collide with literal headings,
            // so keep counting until the id is free.
            let mut count = *counters.get(&base).unwrap_or(&0);
            let mut anchor = base.clone();
            while used.contains(&anchor) {
                count += 1;
                anchor = format!("{}-{}", base, count);
            }
            counters.insert(base, count);
            used.insert(anchor.clone());

            outline.push(OutlineEntry {
                level,
                text,
                anchor,
                cell_index: fragment.cell_index,
            });
        }
    }

    outline
}

/// Visible heading text: inline tags stripped, anchor glyphs removed.
pub(crate) fn heading_text(inner: &str) -> String {
    static TAGS: OnceLock<Regex> = OnceLock::new();
    let re = TAGS.get_or_init(|| Regex::new("<[^>]*>").expect("valid pattern"));
    re.replace_all(inner, "")
        .replace(['¶', '§'], "")
        .trim()
        .to_string()
}

/// Slugify heading text: normalized, lowercased, alphanumeric runs
/// joined with hyphens.
fn slugify(text: &str) -> String {
    text.nfkd()
        .collect::<String>()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
