//! Document composition.
//!
//! Assembles title page, table of contents, body fragments, typesetting
//! bootstrap, and stylesheet into one self-contained HTML document. The
//! only external reference in the output is the MathJax CDN script.

use crate::error::{Error, Result};
use crate::model::Document;

use super::html::{escape_html, highlight_css};
use super::nav;
use super::RenderOptions;

/// Typesetting runtime loaded from the CDN, as in MathJax v3.
const MATHJAX_SRC: &str = "https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js";

/// Marker the typesetting bootstrap sets once formulas are rendered.
/// The render engine adapter polls this expression.
pub const TYPESET_DONE_EXPR: &str = "window.__nbprintTypesetDone === true";

/// Document composer.
pub struct Composer {
    options: RenderOptions,
}

impl Composer {
    /// Create a new composer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Compose the full document.
    ///
    /// Verifies the anchor invariant before assembly: every outline
    /// anchor must resolve to exactly one element in the body.
    pub fn compose(&self, document: &Document) -> Result<String> {
        self.options.validate()?;
        verify_anchors(document)?;

        let mut body = String::new();
        if let Some(title_page) = &document.title_page {
            body.push_str(&nav::title_page_fragment(title_page));
            body.push('\n');
        }
        if self.options.include_toc {
            body.push_str(&nav::toc_fragment(&document.outline));
            body.push('\n');
        }
        body.push_str("<main class=\"notebook\">\n");
        for fragment in &document.body {
            if !fragment.is_empty() {
                body.push_str(&fragment.html);
                body.push('\n');
            }
        }
        body.push_str("</main>");

        let title = document
            .title_page
            .as_ref()
            .map(|tp| tp.title.as_str())
            .unwrap_or("Notebook");

        Ok(format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\"/>\n<title>{title}</title>\n{bootstrap}\n<style>\n{style}\n</style>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
            title = escape_html(title),
            bootstrap = typeset_bootstrap(),
            style = self.stylesheet(),
        ))
    }

    /// Stylesheet carrying the accent color, navigation layout, output
    /// styling, and the highlight theme.
    fn stylesheet(&self) -> String {
        let accent = &self.options.accent_color;
        format!(
            r#"html {{ scroll-behavior: smooth; }}
body {{
  font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif;
  line-height: 1.5;
  margin: 0;
  color: #1a1a1a;
}}
h1, h2, h3, h4 {{ color: {accent}; }}
.anchor-link {{ display: none; }}

#title-page {{
  page-break-after: always;
  display: flex;
  flex-direction: column;
  justify-content: center;
  align-items: center;
  min-height: 90vh;
  text-align: center;
}}
#title-page .title {{ font-size: 2.5em; font-weight: bold; margin-bottom: 20px; line-height: 1.3; }}
#title-page .subtitle {{ font-size: 1.8em; font-weight: normal; margin-top: 0; }}

#table-of-contents {{ page-break-after: always; padding: 40px 20px; }}
#table-of-contents .toc-title {{
  text-align: center;
  font-size: 2em;
  font-weight: normal;
  border-bottom: 2px solid {accent};
  padding-bottom: 15px;
  margin-bottom: 40px;
}}
.toc-entries {{ line-height: 2.0; }}
.toc-entry {{ margin-bottom: 8px; }}
.toc-entry a {{ text-decoration: none; color: {accent}; }}
.toc-level-1 {{ margin-left: 0; font-size: 1.1em; font-weight: bold; }}
.toc-level-2 {{ margin-left: 25px; font-size: 1.05em; font-weight: 600; }}
.toc-level-3 {{ margin-left: 50px; font-size: 1em; }}
.toc-level-4 {{ margin-left: 75px; font-size: 0.95em; }}

.cell {{ margin: 0.6em 0; }}
.cell-code .prompt {{ color: #303f9f; font-family: monospace; font-size: 0.85em; }}
pre.source {{
  background: #f7f7f7;
  border: 1px solid #e0e0e0;
  border-radius: 2px;
  padding: 8px 10px;
  overflow-x: auto;
  font-size: 0.9em;
}}
pre.output {{ padding: 4px 10px; margin: 0; font-size: 0.9em; white-space: pre-wrap; }}
.output-stderr {{ background: #fdd; }}
.output-error {{ background: #fdd; color: #a00000; }}
.output-image {{ max-width: 100%; }}
.output-html table, .cell-markdown table {{ border-collapse: collapse; margin: 0.5em 0; }}
.output-html th, .output-html td, .cell-markdown th, .cell-markdown td {{
  border: 1px solid #c0c0c0;
  padding: 4px 8px;
  font-size: 0.9em;
}}

@media print {{
  #title-page, #table-of-contents {{ page-break-after: always; }}
  pre.source, .cell-output {{ page-break-inside: avoid; }}
}}

{highlight}"#,
            accent = accent,
            highlight = highlight_css(),
        )
    }
}

/// MathJax configuration plus the completion marker contract.
fn typeset_bootstrap() -> String {
    format!(
        r#"<script>
window.__nbprintTypesetDone = false;
window.MathJax = {{
  tex: {{
    inlineMath: [['$', '$'], ['\\(', '\\)']],
    displayMath: [['$$', '$$'], ['\\[', '\\]']],
    processEscapes: true,
    processEnvironments: true
  }},
  options: {{
    skipHtmlTags: ['script', 'noscript', 'style', 'textarea', 'pre']
  }},
  startup: {{
    pageReady: () => MathJax.startup.defaultPageReady().then(() => {{
      window.__nbprintTypesetDone = true;
    }})
  }}
}};
</script>
<script id="MathJax-script" async src="{src}"></script>"#,
        src = MATHJAX_SRC
    )
}

/// Every outline anchor must match exactly one element in the body.
fn verify_anchors(document: &Document) -> Result<()> {
    for entry in &document.outline {
        let needle = format!("id=\"{}\"", entry.anchor);
        let count: usize = document
            .body
            .iter()
            .map(|fragment| fragment.html.matches(needle.as_str()).count())
            .sum();
        match count {
            1 => {}
            0 => {
                return Err(Error::Composition(format!(
                    "anchor \"{}\" has no matching heading in the body",
                    entry.anchor
                )))
            }
            n => {
                return Err(Error::Composition(format!(
                    "anchor \"{}\" matches {} elements in the body",
                    entry.anchor, n
                )))
            }
        }
    }
    Ok(())
}
