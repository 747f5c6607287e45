//! Papr serial scene protocol
//!
//! This crate defines the line-delimited protocol between a host-side UI
//! framework and the e-paper monitor. The host never touches the panel; it
//! describes what should appear and the monitor renders it.
//!
//! # Protocol Overview
//!
//! One command per line over the serial channel:
//! ```text
//! clear
//! {"Shapes":[{"Kind":"Text","PositionX":20,"PositionY":20,"Text":"Hi"}]}
//! {"clear":true,"commands":[{"type":"rect","x":10,"y":10,"w":5,"h":5}]}
//! ```
//!
//! - [`line`] splits the byte stream into command lines
//! - [`command`] classifies lines and validates JSON documents
//! - [`scene`] decodes the shape list of a scene document
//! - [`legacy`] decodes the older flat command payload

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod fmt;

pub mod command;
pub mod fields;
pub mod legacy;
pub mod line;
pub mod scene;
pub mod vec2;

pub use command::{Command, Document, ProtocolError};
pub use fields::Fields;
pub use legacy::{LegacyCommand, LegacyPayload};
pub use line::{LineAssembler, LineError};
pub use scene::{ImageMatrix, Placement, Scene, Shape, ShapeKind, MAX_THICKNESS};
pub use vec2::Vec2;
