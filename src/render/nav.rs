//! Navigation fragments: table of contents, title page, anchor rewriting.
//!
//! Fragment synthesis is deterministic: identical outline and
//! configuration produce byte-identical markup.

use crate::model::{Fragment, OutlineEntry, TitlePage};

use super::html::escape_html;
use super::outline::{heading_regex, heading_text};

/// Synthesize the table-of-contents fragment.
///
/// One entry per outline item, indented per level, each a link to its
/// anchor. The caller omits the fragment entirely when the TOC is
/// disabled; an empty outline still yields the (empty) list shell.
pub fn toc_fragment(outline: &[OutlineEntry]) -> String {
    let mut html = String::from(
        "<div id=\"table-of-contents\">\n<h1 class=\"toc-title\">Table of Contents</h1>\n<div class=\"toc-entries\">\n",
    );
    for entry in outline {
        html.push_str(&format!(
            "<div class=\"toc-entry toc-level-{}\"><a href=\"#{}\">{}</a></div>\n",
            entry.level,
            entry.anchor,
            escape_html(&entry.text)
        ));
    }
    html.push_str("</div>\n</div>");
    html
}

/// Synthesize the title page fragment, shown as the first page.
pub fn title_page_fragment(title_page: &TitlePage) -> String {
    let subtitle = match &title_page.subtitle {
        Some(subtitle) => format!(
            "\n<h2 class=\"subtitle\">{}</h2>",
            escape_html(subtitle)
        ),
        None => String::new(),
    };
    format!(
        "<div id=\"title-page\">\n<h1 class=\"title\">{}</h1>{}\n</div>",
        escape_html(&title_page.title),
        subtitle
    )
}

/// Rewrite body headings so the i-th indexed heading carries the i-th
/// outline anchor.
///
/// Skips the same headings the scan skipped (empty text, levels 5–6),
/// keeping the rewrite aligned with the outline.
pub fn apply_anchors(fragments: &mut [Fragment], outline: &[OutlineEntry]) {
    let mut next = 0usize;
    for fragment in fragments.iter_mut() {
        if next >= outline.len() {
            break;
        }
        let rewritten = heading_regex().replace_all(&fragment.html, |caps: &regex::Captures| {
            if next >= outline.len() || heading_text(&caps[2]).is_empty() {
                return caps[0].to_string();
            }
            let entry = &outline[next];
            next += 1;
            format!(
                "<h{level} id=\"{anchor}\">{inner}</h{level}>",
                level = &caps[1],
                anchor = entry.anchor,
                inner = &caps[2]
            )
        });
        fragment.html = rewritten.into_owned();
    }
}
