//! Shape interpreter
//!
//! Turns decoded [`Shape`]s into surface draw calls. Positions are resolved
//! relative to each shape's orientation and its normal, so boxes and
//! dimension lines follow the shape's direction without an explicit angle.
//!
//! A shape that cannot be drawn (unknown kind, undecodable image) never
//! stops the rest of the scene; only surface errors propagate.

use alloc::format;
use alloc::string::String;

use papr_protocol::{ImageMatrix, Placement, Scene, Shape, ShapeKind};

use crate::backend::{Color, DisplayError, DisplaySurface};
use crate::font::{line_advance, text_scale};
use crate::geometry::{self, iround, Vec2, DEFAULT_ARC_STEPS};
use crate::image::{draw_placeholder, DestRect, ImageError, PackedBitmap};

/// Radius of the dot drawn for a `Point`
pub const POINT_RADIUS: i32 = 3;

/// Arrow head size on `Referential` axes
pub const REFERENTIAL_HEAD_SIZE: f64 = 10.0;

/// Arrow head size on `Dimension` lines
pub const DIMENSION_HEAD_SIZE: f64 = 9.0;

/// Font size of dimension labels
pub const LABEL_FONT_SIZE: f64 = 12.0;

/// Inset of `TextBox` text from the box corner
pub const TEXT_BOX_INSET: i32 = 6;

/// What happened to a single shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ShapeOutcome {
    /// Drawn as described
    Drawn,
    /// An image that failed to decode; a placeholder frame was drawn
    Placeholder(ImageError),
    /// Not drawn
    Skipped,
}

/// Per-command tally of shape outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RenderStats {
    pub drawn: usize,
    pub degraded: usize,
    pub skipped: usize,
}

impl RenderStats {
    pub fn record(&mut self, outcome: ShapeOutcome) {
        match outcome {
            ShapeOutcome::Drawn => self.drawn += 1,
            ShapeOutcome::Placeholder(_) => self.degraded += 1,
            ShapeOutcome::Skipped => self.skipped += 1,
        }
    }
}

/// Draws scenes onto a [`DisplaySurface`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeRenderer {
    arc_steps: u32,
}

impl Default for ShapeRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_ARC_STEPS)
    }
}

impl ShapeRenderer {
    /// Create a renderer tessellating full circles into `arc_steps` segments
    pub const fn new(arc_steps: u32) -> Self {
        Self { arc_steps }
    }

    /// Replace the surface contents with `scene`
    ///
    /// Clears to white, draws every shape in order and flushes.
    pub fn render_scene<S: DisplaySurface + ?Sized>(
        &self,
        surface: &mut S,
        scene: &Scene,
    ) -> Result<RenderStats, DisplayError> {
        surface.fill(Color::White)?;

        let mut stats = RenderStats::default();
        for shape in &scene.shapes {
            stats.record(self.draw(surface, shape)?);
        }

        surface.flush()?;
        info!(
            "Scene rendered: {} drawn, {} degraded, {} skipped",
            stats.drawn, stats.degraded, stats.skipped
        );
        Ok(stats)
    }

    /// Draw a single shape
    pub fn draw<S: DisplaySurface + ?Sized>(
        &self,
        surface: &mut S,
        shape: &Shape,
    ) -> Result<ShapeOutcome, DisplayError> {
        let p = &shape.placement;
        let t = p.thickness;

        match &shape.kind {
            ShapeKind::Point => {
                surface.fill_circle(iround(p.position.x), iround(p.position.y), POINT_RADIUS)?;
            }
            ShapeKind::Line { length } => {
                geometry::draw_line(surface, p.position, p.along(*length), t)?;
            }
            ShapeKind::Rectangle { width, height } => {
                let corners = box_corners(p, width * 0.5, height * 0.5);
                geometry::draw_polygon(surface, &corners, t)?;
            }
            ShapeKind::Circle { radius } => {
                surface.draw_circle(
                    iround(p.position.x),
                    iround(p.position.y),
                    iround(*radius).max(1),
                )?;
            }
            ShapeKind::Text { text, font_size } => {
                draw_text(surface, p.position, text, *font_size)?;
            }
            ShapeKind::MultilineText { text, font_size } => {
                let x = iround(p.position.x);
                let mut y = iround(p.position.y);
                let scale = text_scale(*font_size);
                for line in text.split('\n') {
                    surface.draw_text(x, y, line, scale)?;
                    y += line_advance(*font_size);
                }
            }
            ShapeKind::Icon { icon_key, size } => {
                draw_text(surface, p.position, icon_key, *size)?;
            }
            ShapeKind::Image {
                width,
                height,
                matrix,
            } => {
                let dest = centered_box(p.position, *width, *height);
                return draw_image(surface, matrix.as_ref(), dest);
            }
            ShapeKind::TextBox {
                width,
                height,
                text,
                font_size,
            } => {
                let dest = centered_box(p.position, *width, *height);
                surface.draw_rect(dest.x, dest.y, dest.width, dest.height)?;
                surface.draw_text(
                    dest.x + TEXT_BOX_INSET,
                    dest.y + TEXT_BOX_INSET,
                    text,
                    text_scale(*font_size),
                )?;
            }
            ShapeKind::Arrow {
                length,
                head_length,
            } => {
                let end = p.along(*length);
                geometry::draw_line(surface, p.position, end, t)?;
                geometry::draw_arrow_head(surface, end, p.position, *head_length, t)?;
            }
            ShapeKind::CenterlineRectangle { length, width } => {
                let start = p.position;
                let end = p.along(*length);
                let half = p.normal() * (width * 0.5);
                let corners = [start + half, end + half, end - half, start - half];
                geometry::draw_polygon(surface, &corners, t)?;
                geometry::draw_line(surface, start, end, t)?;
            }
            ShapeKind::Referential {
                x_axis_length,
                y_axis_length,
            } => {
                let x_end = p.along(*x_axis_length);
                let y_end = p.position + p.normal() * *y_axis_length;
                geometry::draw_line(surface, p.position, x_end, t)?;
                geometry::draw_line(surface, p.position, y_end, t)?;
                geometry::draw_arrow_head(surface, x_end, p.position, REFERENTIAL_HEAD_SIZE, t)?;
                geometry::draw_arrow_head(surface, y_end, p.position, REFERENTIAL_HEAD_SIZE, t)?;
            }
            ShapeKind::Dimension {
                length,
                offset,
                text,
            } => {
                let end = p.along(*length);
                let shift = p.normal() * *offset;
                let (os, oe) = (p.position + shift, end + shift);

                geometry::draw_line(surface, p.position, os, t)?;
                geometry::draw_line(surface, end, oe, t)?;
                geometry::draw_line(surface, os, oe, t)?;
                geometry::draw_arrow_head(surface, os, oe, DIMENSION_HEAD_SIZE, t)?;
                geometry::draw_arrow_head(surface, oe, os, DIMENSION_HEAD_SIZE, t)?;

                let label = label_or(text, || dimension_label(*length));
                let mid = os.midpoint(oe);
                surface.draw_text(
                    iround(mid.x) + 4,
                    iround(mid.y) - 14,
                    &label,
                    text_scale(LABEL_FONT_SIZE),
                )?;
            }
            ShapeKind::AngleDimension {
                radius,
                start_angle,
                sweep_angle,
                text,
            } => {
                let (start, sweep) = (*start_angle, *sweep_angle);
                geometry::draw_line(surface, p.position, p.position.polar(*radius, start), t)?;
                geometry::draw_line(
                    surface,
                    p.position,
                    p.position.polar(*radius, start + sweep),
                    t,
                )?;
                geometry::draw_arc(surface, p.position, *radius, start, sweep, self.arc_steps, t)?;

                let label = label_or(text, || angle_label(sweep));
                let anchor = p.position.polar(radius + 10.0, start + sweep * 0.5);
                draw_text(surface, anchor, &label, LABEL_FONT_SIZE)?;
            }
            ShapeKind::Arc {
                radius,
                start_angle,
                sweep_angle,
            } => {
                geometry::draw_arc(
                    surface,
                    p.position,
                    *radius,
                    *start_angle,
                    *sweep_angle,
                    self.arc_steps,
                    t,
                )?;
            }
            ShapeKind::Unsupported { kind } => {
                warn!("Scene: unsupported shape kind '{}'", kind.as_str());
                return Ok(ShapeOutcome::Skipped);
            }
        }

        Ok(ShapeOutcome::Drawn)
    }
}

/// Corners of a box centered on the placement, in drawing order
fn box_corners(p: &Placement, half_width: f64, half_height: f64) -> [Vec2; 4] {
    let along = p.orientation * half_width;
    let across = p.normal() * half_height;
    [
        p.position - along - across,
        p.position + along - across,
        p.position + along + across,
        p.position - along + across,
    ]
}

/// Axis-aligned box of at least 1×1 pixels centered on `center`
fn centered_box(center: Vec2, width: f64, height: f64) -> DestRect {
    DestRect::new(
        iround(center.x - width * 0.5),
        iround(center.y - height * 0.5),
        iround(width).max(1),
        iround(height).max(1),
    )
}

fn draw_text<S: DisplaySurface + ?Sized>(
    surface: &mut S,
    at: Vec2,
    text: &str,
    font_size: f64,
) -> Result<(), DisplayError> {
    surface.draw_text(iround(at.x), iround(at.y), text, text_scale(font_size))
}

fn draw_image<S: DisplaySurface + ?Sized>(
    surface: &mut S,
    matrix: Option<&ImageMatrix>,
    dest: DestRect,
) -> Result<ShapeOutcome, DisplayError> {
    let decoded = matrix
        .ok_or(ImageError::MissingMatrix)
        .and_then(PackedBitmap::decode);

    match decoded {
        Ok(bitmap) => {
            bitmap.blit(surface, dest)?;
            Ok(ShapeOutcome::Drawn)
        }
        Err(e) => {
            warn!("Image shape degraded to placeholder: {:?}", e);
            draw_placeholder(surface, dest)?;
            Ok(ShapeOutcome::Placeholder(e))
        }
    }
}

fn label_or(text: &Option<String>, fallback: impl FnOnce() -> String) -> String {
    match text {
        Some(text) => text.clone(),
        None => fallback(),
    }
}

/// Default `Dimension` label: the length with one decimal
pub fn dimension_label(length: f64) -> String {
    format!("{:.1}", length)
}

/// Default `AngleDimension` label: the sweep magnitude in degrees
pub fn angle_label(sweep: f64) -> String {
    format!("{:.1}deg", libm::fabs(sweep.to_degrees()))
}
