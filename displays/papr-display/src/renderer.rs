//! Command dispatcher
//!
//! [`SceneRenderer`] is the render context: it owns the surface, the panel
//! controller and the refresh sequence, and handles one command line at a
//! time to completion.
//!
//! # Command flow
//!
//! ```text
//! line ──> Command::parse ──┬─ clear ────> flash ─> white ─> flush
//!                           ├─ document ─> validate ─┬─ error ──> rejected
//!                           │                        └─ ok ─────> flash ─> scene | legacy
//!                           └─ other ────> ignored
//! ```
//!
//! Documents are validated and fully decoded before the panel is touched,
//! so a rejected document leaves the display exactly as it was.

use embedded_hal::delay::DelayNs;
use papr_protocol::{Command, Document, ProtocolError};

use crate::backend::{Color, DisplayController, DisplayError, DisplaySurface};
use crate::config::RenderConfig;
use crate::legacy::render_legacy;
use crate::refresh::GhostFlash;
use crate::shapes::{RenderStats, ShapeRenderer};

/// Startup banner text
pub const READY_BANNER: &str = "READY";

/// Startup banner position
pub const READY_BANNER_POS: (i32, i32) = (50, 50);

/// Result of handling one command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandOutcome {
    /// Panel wiped to white
    Cleared,
    /// A scene document replaced the surface contents
    SceneRendered(RenderStats),
    /// A legacy payload was drawn
    LegacyRendered(RenderStats),
    /// Blank or unrecognized line; nothing happened
    Ignored,
    /// Document failed validation; nothing was drawn
    Rejected(ProtocolError),
    /// The surface or controller failed part-way through
    Failed(DisplayError),
}

/// Outcome counts over a run of commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RunSummary {
    pub cleared: usize,
    pub scenes: usize,
    pub legacy: usize,
    pub ignored: usize,
    pub rejected: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn record(&mut self, outcome: &CommandOutcome) {
        match outcome {
            CommandOutcome::Cleared => self.cleared += 1,
            CommandOutcome::SceneRendered(_) => self.scenes += 1,
            CommandOutcome::LegacyRendered(_) => self.legacy += 1,
            CommandOutcome::Ignored => self.ignored += 1,
            CommandOutcome::Rejected(_) => self.rejected += 1,
            CommandOutcome::Failed(_) => self.failed += 1,
        }
    }

    /// Total commands seen
    pub fn total(&self) -> usize {
        self.cleared + self.scenes + self.legacy + self.ignored + self.rejected + self.failed
    }
}

/// Render context for the serial command loop
pub struct SceneRenderer<S, C, D> {
    surface: S,
    controller: C,
    flash: GhostFlash<D>,
    shapes: ShapeRenderer,
    config: RenderConfig,
}

impl<S, C, D> SceneRenderer<S, C, D>
where
    S: DisplaySurface,
    C: DisplayController,
    D: DelayNs,
{
    pub fn new(surface: S, controller: C, delay: D, config: RenderConfig) -> Self {
        Self {
            surface,
            controller,
            flash: GhostFlash::new(delay, config.flash_cycles, config.flash_hold_ms),
            shapes: ShapeRenderer::new(config.arc_steps),
            config,
        }
    }

    /// Prepare the surface: white, optional banner, flush
    pub fn start(&mut self) -> Result<(), DisplayError> {
        self.surface.fill(Color::White)?;
        if self.config.show_ready_banner {
            let (x, y) = READY_BANNER_POS;
            self.surface.draw_text(x, y, READY_BANNER, 1)?;
        }
        self.surface.flush()?;
        info!("Papr monitor ready");
        Ok(())
    }

    /// Handle one command line to completion
    pub fn handle_line(&mut self, line: &str) -> CommandOutcome {
        let Some(command) = Command::parse(line) else {
            return CommandOutcome::Ignored;
        };

        let result = match command {
            Command::Clear => self.clear(),
            Command::Document(json) => match Document::parse(json) {
                Ok(document) => self.render_document(&document),
                Err(e) => return CommandOutcome::Rejected(e),
            },
            Command::Unknown(_) => {
                info!("Unknown command");
                return CommandOutcome::Ignored;
            }
        };

        result.unwrap_or_else(|e| {
            error!("Display error: {:?}", e);
            CommandOutcome::Failed(e)
        })
    }

    /// Handle every line in order
    pub fn run<I>(&mut self, lines: I) -> RunSummary
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut summary = RunSummary::default();
        for line in lines {
            let outcome = self.handle_line(line.as_ref());
            summary.record(&outcome);
        }
        debug!("Run finished: {} commands", summary.total());
        summary
    }

    fn clear(&mut self) -> Result<CommandOutcome, DisplayError> {
        self.flash.run(&mut self.controller)?;
        self.surface.fill(Color::White)?;
        self.surface.flush()?;
        info!("Screen cleared");
        Ok(CommandOutcome::Cleared)
    }

    fn render_document(&mut self, document: &Document) -> Result<CommandOutcome, DisplayError> {
        self.flash.run(&mut self.controller)?;
        match document {
            Document::Scene(scene) => self
                .shapes
                .render_scene(&mut self.surface, scene)
                .map(CommandOutcome::SceneRendered),
            Document::Legacy(payload) => {
                render_legacy(&mut self.surface, payload).map(CommandOutcome::LegacyRendered)
            }
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn controller(&self) -> &C {
        &self.controller
    }

    /// Take back the surface, controller and delay
    pub fn into_parts(self) -> (S, C, D) {
        (self.surface, self.controller, self.flash.release())
    }
}
