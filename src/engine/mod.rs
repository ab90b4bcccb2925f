//! Render engine abstraction.
//!
//! The pipeline talks to the rendering engine through a narrow
//! capability interface so components upstream never depend on a
//! concrete engine: [`RenderEngine::load`] hands over the composed
//! document, [`EngineSession::wait_for_signal`] blocks until the
//! typesetting runtime reports completion (or the bound elapses), and
//! [`EngineSession::paginate`] produces the fixed-layout artifact.
//!
//! Sessions own every acquired resource (browser process, tab, staged
//! document) and release them on drop, including on timeout, error,
//! and cooperative cancellation.

mod chromium;

pub use chromium::ChromiumEngine;

use std::time::Duration;

use crate::error::Result;
use crate::render::PageSetup;

/// A rendering engine capable of laying out a composed document.
pub trait RenderEngine {
    /// Load a composed document and return a live session.
    fn load(&self, html: &str) -> Result<Box<dyn EngineSession>>;
}

/// One loaded document inside a rendering engine.
pub trait EngineSession {
    /// Block until the typesetting completion signal appears.
    ///
    /// Returns `Ok(false)` if the bound elapsed first; the session is
    /// then in [`EngineState::TimedOut`] but may still paginate, since
    /// a document with partially rendered math beats no output.
    fn wait_for_signal(&mut self, timeout: Duration) -> Result<bool>;

    /// Paginate the document into the final artifact bytes.
    fn paginate(&mut self, setup: &PageSetup) -> Result<Vec<u8>>;

    /// Current session state.
    fn state(&self) -> EngineState;
}

/// Session lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Document is being loaded into the engine
    Loading,
    /// Waiting for the typesetting completion signal
    TypesettingWait,
    /// Typesetting complete, ready to paginate
    Ready,
    /// Pagination in progress
    Paginating,
    /// Artifact produced
    Done,
    /// The completion signal did not appear within the bound
    TimedOut,
}
