//! Ghost-reduction refresh sequence
//!
//! E-paper panels in fast mode retain faint traces of previous frames.
//! Before a full-scene replace the panel is switched to the quality
//! waveform and flashed black and white a few times, then returned to fast
//! mode for drawing.

use embedded_hal::delay::DelayNs;

use crate::backend::{Color, DisplayController, DisplayError, RefreshMode};

/// Default number of black/white flash pairs
pub const DEFAULT_FLASH_CYCLES: u8 = 2;

/// Default wait after each flash, in milliseconds
pub const DEFAULT_FLASH_HOLD_MS: u32 = 180;

/// Blocking black/white flash sequence
#[derive(Debug)]
pub struct GhostFlash<D> {
    delay: D,
    cycles: u8,
    hold_ms: u32,
}

impl<D: DelayNs> GhostFlash<D> {
    pub fn new(delay: D, cycles: u8, hold_ms: u32) -> Self {
        Self {
            delay,
            cycles,
            hold_ms,
        }
    }

    /// Sequence with the default cycle count and hold time
    pub fn with_defaults(delay: D) -> Self {
        Self::new(delay, DEFAULT_FLASH_CYCLES, DEFAULT_FLASH_HOLD_MS)
    }

    /// Run the sequence on `controller`
    ///
    /// The panel is left white in fast mode. There is no wait after the
    /// final flash.
    pub fn run<C: DisplayController + ?Sized>(
        &mut self,
        controller: &mut C,
    ) -> Result<(), DisplayError> {
        controller.set_refresh_mode(RefreshMode::Quality)?;

        let flashes = self.cycles as usize * 2;
        for i in 0..flashes {
            let color = if i % 2 == 0 { Color::Black } else { Color::White };
            controller.fill_panel(color)?;
            if i + 1 < flashes {
                self.delay.delay_ms(self.hold_ms);
            }
        }

        controller.set_refresh_mode(RefreshMode::Fast)?;
        trace!("Ghost flash done: {} cycles", self.cycles);
        Ok(())
    }

    pub fn release(self) -> D {
        self.delay
    }
}
