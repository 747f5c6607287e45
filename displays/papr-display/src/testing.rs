//! Recording collaborators for unit tests

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use embedded_hal::delay::DelayNs;

use crate::backend::{Color, DisplayController, DisplayError, DisplaySurface, RefreshMode};

/// A single recorded surface call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Fill(Color),
    Pixel(i32, i32, Color),
    Line(i32, i32, i32, i32),
    Rect(i32, i32, i32, i32),
    FillRect(i32, i32, i32, i32),
    Circle(i32, i32, i32),
    FillCircle(i32, i32, i32),
    Text(i32, i32, String, u8),
    Flush,
}

/// Surface that records every call instead of drawing
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub width: i32,
    pub height: i32,
    pub ops: Vec<Op>,
    /// Fail every call once this many calls have been recorded
    pub fail_after: Option<usize>,
}

impl RecordingSurface {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
            fail_after: None,
        }
    }

    fn record(&mut self, op: Op) -> Result<(), DisplayError> {
        if self.fail_after.is_some_and(|n| self.ops.len() >= n) {
            return Err(DisplayError::Communication);
        }
        self.ops.push(op);
        Ok(())
    }

    /// All text drawn, in order
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text(_, _, text, _) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Number of pixels written with `color`
    pub fn pixel_count(&self, color: Color) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, Op::Pixel(_, _, c) if *c == color))
            .count()
    }
}

impl DisplaySurface for RecordingSurface {
    fn dimensions(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    fn fill(&mut self, color: Color) -> Result<(), DisplayError> {
        self.record(Op::Fill(color))
    }

    fn draw_pixel(&mut self, x: i32, y: i32, color: Color) -> Result<(), DisplayError> {
        self.record(Op::Pixel(x, y, color))
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) -> Result<(), DisplayError> {
        self.record(Op::Line(x0, y0, x1, y1))
    }

    fn draw_rect(&mut self, x: i32, y: i32, width: i32, height: i32) -> Result<(), DisplayError> {
        self.record(Op::Rect(x, y, width, height))
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32) -> Result<(), DisplayError> {
        self.record(Op::FillRect(x, y, width, height))
    }

    fn draw_circle(&mut self, x: i32, y: i32, radius: i32) -> Result<(), DisplayError> {
        self.record(Op::Circle(x, y, radius))
    }

    fn fill_circle(&mut self, x: i32, y: i32, radius: i32) -> Result<(), DisplayError> {
        self.record(Op::FillCircle(x, y, radius))
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, scale: u8) -> Result<(), DisplayError> {
        self.record(Op::Text(x, y, text.to_string(), scale))
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        self.record(Op::Flush)
    }
}

/// A single recorded controller call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelOp {
    Mode(RefreshMode),
    Fill(Color),
}

/// Controller that records every call
#[derive(Debug, Default)]
pub struct RecordingController {
    pub ops: Vec<PanelOp>,
}

impl DisplayController for RecordingController {
    fn set_refresh_mode(&mut self, mode: RefreshMode) -> Result<(), DisplayError> {
        self.ops.push(PanelOp::Mode(mode));
        Ok(())
    }

    fn fill_panel(&mut self, color: Color) -> Result<(), DisplayError> {
        self.ops.push(PanelOp::Fill(color));
        Ok(())
    }
}

/// Delay that returns immediately and remembers each wait in milliseconds
#[derive(Debug, Default)]
pub struct MockDelay {
    pub waits_ms: Vec<u32>,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.waits_ms.push(ns / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.waits_ms.push(ms);
    }
}
