//! Per-cell HTML fragment rendering.
//!
//! Each cell becomes one [`Fragment`], in source order. Math delimiters in
//! markdown cells pass through verbatim; they are resolved later by the
//! typesetting runtime, not here.

use std::sync::OnceLock;

use pulldown_cmark::{html, Event, Options, Parser};
use rayon::prelude::*;
use regex::Regex;
use syntect::html::{css_for_theme_with_class_style, ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::error::Result;
use crate::model::{Cell, CellContent, Fragment, OutputData};
use crate::parser::Notebook;

use super::RenderOptions;

/// Class prefix for highlight spans (avoids CSS conflicts).
const HIGHLIGHT_CLASS_STYLE: ClassStyle = ClassStyle::SpacedPrefixed { prefix: "hl-" };

/// HTML renderer producing one fragment per cell.
pub struct HtmlRenderer {
    options: RenderOptions,
}

impl HtmlRenderer {
    /// Create a new renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render every cell of a notebook to a fragment, order preserved.
    pub fn render(&self, notebook: &Notebook) -> Result<Vec<Fragment>> {
        let language = notebook.language.as_deref().unwrap_or("text");
        if self.options.parallel {
            notebook
                .cells
                .par_iter()
                .map(|cell| self.render_cell(cell, language))
                .collect()
        } else {
            notebook
                .cells
                .iter()
                .map(|cell| self.render_cell(cell, language))
                .collect()
        }
    }

    fn render_cell(&self, cell: &Cell, language: &str) -> Result<Fragment> {
        let html = match &cell.content {
            CellContent::Markdown { source } => {
                format!(
                    "<div class=\"cell cell-markdown\">\n{}</div>",
                    markdown_to_html(source)
                )
            }
            CellContent::Code {
                source,
                execution_count,
            } => render_code(source, *execution_count, language),
            // Raw cells are carried through extraction but not rendered.
            CellContent::Raw { .. } => String::new(),
            CellContent::Output(output) => render_output(output),
            CellContent::Error {
                name,
                message,
                traceback,
            } => render_error(name, message, traceback),
        };
        Ok(Fragment::new(cell.index, html))
    }
}

/// Convert markdown to HTML, re-emitting math spans verbatim for the
/// typesetting runtime.
fn markdown_to_html(source: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_MATH;

    let parser = Parser::new_ext(source, options).map(|event| match event {
        Event::InlineMath(math) => {
            Event::InlineHtml(format!("\\({}\\)", escape_html(&math)).into())
        }
        Event::DisplayMath(math) => {
            Event::InlineHtml(format!("\\[{}\\]", escape_html(&math)).into())
        }
        other => other,
    });

    let mut output = String::new();
    html::push_html(&mut output, parser);
    output
}

fn render_code(source: &str, execution_count: Option<i64>, language: &str) -> String {
    let prompt = match execution_count {
        Some(n) => format!("<div class=\"prompt\">In&nbsp;[{}]:</div>\n", n),
        None => String::new(),
    };
    format!(
        "<div class=\"cell cell-code\">\n{}<pre class=\"source\"><code>{}</code></pre>\n</div>",
        prompt,
        highlight_code(source, language)
    )
}

fn render_output(output: &OutputData) -> String {
    let inner = match output {
        OutputData::Stream { text, stderr } => {
            let class = if *stderr {
                "output output-stderr"
            } else {
                "output"
            };
            format!("<pre class=\"{}\">{}</pre>", class, escape_html(text))
        }
        OutputData::Text { text } => {
            format!("<pre class=\"output\">{}</pre>", escape_html(text))
        }
        OutputData::Image { media_type, data } => format!(
            "<img class=\"output-image\" src=\"data:{};base64,{}\" alt=\"\"/>",
            media_type, data
        ),
        OutputData::Html { html } => {
            format!("<div class=\"output output-html\">{}</div>", html)
        }
    };
    format!("<div class=\"cell cell-output\">\n{}\n</div>", inner)
}

fn render_error(name: &str, message: &str, traceback: &[String]) -> String {
    let mut text = format!("{}: {}", name, message);
    if !traceback.is_empty() {
        text.push('\n');
        text.push_str(&strip_ansi(&traceback.join("\n")));
    }
    format!(
        "<div class=\"cell cell-output\">\n<pre class=\"output output-error\">{}</pre>\n</div>",
        escape_html(&text)
    )
}

/// Syntax-highlight a code block into class-based spans.
///
/// Falls back to escaped plain text when the language is unknown or the
/// highlighter fails mid-block.
fn highlight_code(source: &str, language: &str) -> String {
    let syntax_set = syntax_set();
    let syntax = syntax_set
        .find_syntax_by_token(language)
        .unwrap_or_else(|| syntax_set.find_syntax_plain_text());

    let mut generator =
        ClassedHTMLGenerator::new_with_class_style(syntax, syntax_set, HIGHLIGHT_CLASS_STYLE);
    for line in LinesWithEndings::from(source) {
        if generator
            .parse_html_for_line_which_includes_newline(line)
            .is_err()
        {
            return escape_html(source);
        }
    }
    generator.finalize()
}

fn syntax_set() -> &'static SyntaxSet {
    static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

/// Theme CSS for the highlight spans, embedded in the composed stylesheet.
pub(crate) fn highlight_css() -> &'static str {
    static CSS: OnceLock<String> = OnceLock::new();
    CSS.get_or_init(|| {
        use syntect::highlighting::ThemeSet;

        let themes = ThemeSet::load_defaults();
        let theme = themes
            .themes
            .get("InspiredGitHub")
            .or_else(|| themes.themes.values().next())
            .expect("syntect ships at least one theme");
        css_for_theme_with_class_style(theme, HIGHLIGHT_CLASS_STYLE).unwrap_or_default()
    })
}

/// Escape text for HTML element content and attribute values.
pub(crate) fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Remove ANSI escape sequences from traceback text.
fn strip_ansi(s: &str) -> String {
    static ANSI: OnceLock<Regex> = OnceLock::new();
    let re = ANSI.get_or_init(|| Regex::new("\x1b\\[[0-9;]*[A-Za-z]").expect("valid pattern"));
    re.replace_all(s, "").into_owned()
}
