//! Scene rendering for the Papr e-paper monitor
//!
//! This crate provides:
//! - `DisplaySurface` / `DisplayController` traits the renderer draws through
//! - The geometry kernel (stroke-width lines, arrow heads, arcs)
//! - The packed 1bpp image decoder with nearest-neighbor resampling
//! - The shape interpreter and the legacy command adapter
//! - `SceneRenderer`, the command dispatcher driven by the serial loop
//!
//! # Architecture
//!
//! The host describes what should appear using the scene protocol from
//! `papr-protocol`. Each validated document replaces the whole picture:
//! the controller first flashes the panel to remove ghosting, then shapes
//! are drawn onto the surface and the surface is flushed.
//!
//! ## Surfaces
//!
//! - **In-memory**: [`FrameBuffer`] wrapped in a [`GraphicsSurface`], for
//!   panels that take a packed 1bpp frame.
//! - **Driver buffers**: any `embedded-graphics` `DrawTarget<Color = BinaryColor>`
//!   wrapped in a [`GraphicsSurface`].

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod fmt;

pub mod backend;
pub mod config;
pub mod font;
pub mod framebuffer;
pub mod geometry;
pub mod graphics;
pub mod image;
pub mod legacy;
pub mod refresh;
pub mod renderer;
pub mod shapes;

#[cfg(test)]
mod testing;

// Re-export key types
pub use backend::{Color, DisplayController, DisplayError, DisplaySurface, RefreshMode};
pub use config::{ConfigError, RenderConfig};
pub use framebuffer::FrameBuffer;
pub use geometry::Vec2;
pub use graphics::GraphicsSurface;
pub use image::{DestRect, ImageError, PackedBitmap};
pub use refresh::GhostFlash;
pub use renderer::{CommandOutcome, RunSummary, SceneRenderer};
pub use shapes::{RenderStats, ShapeOutcome, ShapeRenderer};
