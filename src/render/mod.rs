//! Rendering module: cell markup, outline, navigation, composition.

mod compose;
mod html;
mod nav;
mod options;
mod outline;

pub use compose::{Composer, TYPESET_DONE_EXPR};
pub use html::HtmlRenderer;
pub use nav::{apply_anchors, title_page_fragment, toc_fragment};
pub use options::{Margins, PageSetup, PageSize, RenderOptions, DEFAULT_ACCENT_COLOR};
pub use outline::scan;
