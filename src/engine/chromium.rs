//! Headless Chromium engine over the DevTools protocol.

use std::io::Write;
use std::thread;
use std::time::{Duration, Instant};

use headless_chrome::types::PrintToPdfOptions;
use headless_chrome::{Browser, LaunchOptions, Tab};
use tempfile::NamedTempFile;

use crate::error::{Error, Result};
use crate::render::{PageSetup, TYPESET_DONE_EXPR};

use super::{EngineSession, EngineState, RenderEngine};

/// How often the session polls for the typesetting marker.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Rendering engine backed by a headless Chromium instance.
///
/// Each [`load`](RenderEngine::load) launches a fresh browser; the
/// session owns it and shuts it down on drop.
#[derive(Debug, Default)]
pub struct ChromiumEngine;

impl ChromiumEngine {
    /// Create a new engine.
    pub fn new() -> Self {
        Self
    }
}

impl RenderEngine for ChromiumEngine {
    fn load(&self, html: &str) -> Result<Box<dyn EngineSession>> {
        // Chromium loads the document from disk; data: URLs hit length
        // limits once images are embedded.
        let mut staged = tempfile::Builder::new()
            .prefix("nbprint-")
            .suffix(".html")
            .tempfile()?;
        staged.write_all(html.as_bytes())?;
        staged.flush()?;
        let url = format!("file://{}", staged.path().display());

        let launch = LaunchOptions::default_builder()
            .headless(true)
            .build()
            .map_err(engine_err)?;
        let browser = Browser::new(launch).map_err(engine_err)?;
        let tab = browser.new_tab().map_err(engine_err)?;

        tab.navigate_to(&url).map_err(engine_err)?;
        tab.wait_until_navigated().map_err(engine_err)?;

        Ok(Box::new(ChromiumSession {
            _browser: browser,
            _staged: staged,
            tab,
            state: EngineState::TypesettingWait,
        }))
    }
}

/// One document loaded in a Chromium tab.
struct ChromiumSession {
    // Owns the browser process and the staged document; both are
    // released on drop regardless of how the session ends.
    _browser: Browser,
    _staged: NamedTempFile,
    tab: std::sync::Arc<Tab>,
    state: EngineState,
}

impl EngineSession for ChromiumSession {
    fn wait_for_signal(&mut self, timeout: Duration) -> Result<bool> {
        self.state = EngineState::TypesettingWait;
        let deadline = Instant::now() + timeout;
        loop {
            if self.signal_fired() {
                self.state = EngineState::Ready;
                return Ok(true);
            }
            let now = Instant::now();
            if now >= deadline {
                self.state = EngineState::TimedOut;
                return Ok(false);
            }
            thread::sleep(POLL_INTERVAL.min(deadline - now));
        }
    }

    fn paginate(&mut self, setup: &PageSetup) -> Result<Vec<u8>> {
        self.state = EngineState::Paginating;

        let (paper_width, paper_height) = setup.size.dimensions_inches();
        let (top, right, bottom, left) = setup.margins.to_inches();
        let options = PrintToPdfOptions {
            print_background: Some(true),
            display_header_footer: Some(false),
            paper_width: Some(paper_width),
            paper_height: Some(paper_height),
            margin_top: Some(top),
            margin_right: Some(right),
            margin_bottom: Some(bottom),
            margin_left: Some(left),
            ..Default::default()
        };

        let bytes = self.tab.print_to_pdf(Some(options)).map_err(engine_err)?;
        self.state = EngineState::Done;
        Ok(bytes)
    }

    fn state(&self) -> EngineState {
        self.state
    }
}

impl ChromiumSession {
    /// Evaluate the marker expression; evaluation failures read as
    /// "not yet" until the deadline decides.
    fn signal_fired(&self) -> bool {
        self.tab
            .evaluate(TYPESET_DONE_EXPR, false)
            .ok()
            .and_then(|object| object.value)
            .and_then(|value| value.as_bool())
            .unwrap_or(false)
    }
}

fn engine_err(err: impl std::fmt::Display) -> Error {
    Error::RenderEngine(err.to_string())
}
