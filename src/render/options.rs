//! Rendering options and page configuration.

use std::time::Duration;

use crate::error::{Error, Result};

/// Default accent color for headings, navigation, and the title page.
pub const DEFAULT_ACCENT_COLOR: &str = "#41395f";

/// Options for rendering and composing a document.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Title for the title page; no title page is emitted without one
    pub title: Option<String>,

    /// Subtitle shown under the title
    pub subtitle: Option<String>,

    /// Accent color as a hex string
    pub accent_color: String,

    /// Include the table of contents
    pub include_toc: bool,

    /// Include the title page (still requires a title)
    pub include_title_page: bool,

    /// Page size and margins
    pub page: PageSetup,

    /// How long to wait for the typesetting completion signal
    pub typeset_timeout: Duration,

    /// Treat a typesetting timeout as fatal instead of degrading
    pub fail_on_typeset_timeout: bool,

    /// Render cell fragments in parallel
    pub parallel: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title page title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the title page subtitle.
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Set the accent color (hex string, e.g. "#41395f").
    pub fn with_accent_color(mut self, color: impl Into<String>) -> Self {
        self.accent_color = color.into();
        self
    }

    /// Enable or disable the table of contents.
    pub fn with_toc(mut self, include: bool) -> Self {
        self.include_toc = include;
        self
    }

    /// Enable or disable the title page.
    pub fn with_title_page(mut self, include: bool) -> Self {
        self.include_title_page = include;
        self
    }

    /// Set the page size and margins.
    pub fn with_page(mut self, page: PageSetup) -> Self {
        self.page = page;
        self
    }

    /// Set the typesetting wait bound.
    pub fn with_typeset_timeout(mut self, timeout: Duration) -> Self {
        self.typeset_timeout = timeout;
        self
    }

    /// Fail the conversion if typesetting does not complete in time.
    pub fn strict_typesetting(mut self) -> Self {
        self.fail_on_typeset_timeout = true;
        self
    }

    /// Disable parallel fragment rendering.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Validate the accent color.
    pub fn validate(&self) -> Result<()> {
        validate_hex_color(&self.accent_color)
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: None,
            subtitle: None,
            accent_color: DEFAULT_ACCENT_COLOR.to_string(),
            include_toc: true,
            include_title_page: true,
            page: PageSetup::default(),
            typeset_timeout: Duration::from_secs(20),
            fail_on_typeset_timeout: false,
            parallel: true,
        }
    }
}

/// Check that a color is "#rgb" or "#rrggbb".
fn validate_hex_color(color: &str) -> Result<()> {
    let digits = color
        .strip_prefix('#')
        .ok_or_else(|| Error::InvalidColor(color.to_string()))?;
    let valid = matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit());
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidColor(color.to_string()))
    }
}

/// Fixed page size and margins handed to the render engine.
///
/// Immutable once the engine adapter starts paginating.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSetup {
    /// Paper size
    pub size: PageSize,

    /// Page margins
    pub margins: Margins,
}

impl PageSetup {
    /// Create a page setup with default margins.
    pub fn new(size: PageSize) -> Self {
        Self {
            size,
            margins: Margins::default(),
        }
    }

    /// Set the margins.
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }
}

impl Default for PageSetup {
    fn default() -> Self {
        Self::new(PageSize::A4)
    }
}

/// Supported paper sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSize {
    /// ISO A4 (210 × 297 mm)
    A4,
    /// US Letter (8.5 × 11 in)
    Letter,
    /// US Legal (8.5 × 14 in)
    Legal,
}

impl PageSize {
    /// Paper dimensions in inches (width, height).
    pub fn dimensions_inches(self) -> (f64, f64) {
        match self {
            PageSize::A4 => (8.27, 11.69),
            PageSize::Letter => (8.5, 11.0),
            PageSize::Legal => (8.5, 14.0),
        }
    }
}

/// Page margins in centimeters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    /// Top margin
    pub top_cm: f64,
    /// Right margin
    pub right_cm: f64,
    /// Bottom margin
    pub bottom_cm: f64,
    /// Left margin
    pub left_cm: f64,
}

impl Margins {
    /// Uniform margins.
    pub fn uniform(cm: f64) -> Self {
        Self {
            top_cm: cm,
            right_cm: cm,
            bottom_cm: cm,
            left_cm: cm,
        }
    }

    /// Margins as inches (top, right, bottom, left), the unit the
    /// pagination call expects.
    pub fn to_inches(self) -> (f64, f64, f64, f64) {
        const CM_PER_INCH: f64 = 2.54;
        (
            self.top_cm / CM_PER_INCH,
            self.right_cm / CM_PER_INCH,
            self.bottom_cm / CM_PER_INCH,
            self.left_cm / CM_PER_INCH,
        )
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(1.5)
    }
}
