//! Legacy command adapter
//!
//! Draws the flat `{clear, commands}` payload. Coordinates are plain pixels,
//! so commands map one-to-one onto surface primitives.

use papr_protocol::{LegacyCommand, LegacyPayload};

use crate::backend::{Color, DisplayError, DisplaySurface};
use crate::font::{text_scale, BASE_FONT_SIZE};
use crate::shapes::{RenderStats, ShapeOutcome};

/// Draw a single legacy command
pub fn draw_command<S: DisplaySurface + ?Sized>(
    surface: &mut S,
    command: &LegacyCommand,
) -> Result<ShapeOutcome, DisplayError> {
    match command {
        LegacyCommand::Text {
            x,
            y,
            size,
            content,
        } => {
            let scale = text_scale(*size as f64 * BASE_FONT_SIZE);
            surface.draw_text(*x, *y, content, scale)?;
        }
        LegacyCommand::Rect { x, y, w, h, fill } => {
            if *fill {
                surface.fill_rect(*x, *y, *w, *h)?;
            } else {
                surface.draw_rect(*x, *y, *w, *h)?;
            }
        }
        LegacyCommand::Line { x1, y1, x2, y2 } => {
            surface.draw_line(*x1, *y1, *x2, *y2)?;
        }
        LegacyCommand::Circle { x, y, r, fill } => {
            if *fill {
                surface.fill_circle(*x, *y, *r)?;
            } else {
                surface.draw_circle(*x, *y, *r)?;
            }
        }
        LegacyCommand::Unknown { type_name } => {
            warn!("Legacy: unknown command type '{}'", type_name.as_str());
            return Ok(ShapeOutcome::Skipped);
        }
        LegacyCommand::Untyped => return Ok(ShapeOutcome::Skipped),
    }
    Ok(ShapeOutcome::Drawn)
}

/// Run a legacy payload and flush
///
/// Unlike a scene, the surface is only wiped when the payload asks for it.
pub fn render_legacy<S: DisplaySurface + ?Sized>(
    surface: &mut S,
    payload: &LegacyPayload,
) -> Result<RenderStats, DisplayError> {
    if payload.clear {
        surface.fill(Color::White)?;
    }

    let mut stats = RenderStats::default();
    for command in &payload.commands {
        stats.record(draw_command(surface, command)?);
    }

    surface.flush()?;
    info!(
        "Legacy payload rendered: {} drawn, {} skipped",
        stats.drawn, stats.skipped
    );
    Ok(stats)
}
