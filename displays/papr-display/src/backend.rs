//! Display collaborator traits
//!
//! Defines the two capabilities the renderer draws through:
//! - [`DisplaySurface`]: the raster buffer shapes are drawn onto
//! - [`DisplayController`]: the panel itself, used for refresh-mode
//!   switching and full-panel flashes

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with the panel
    Communication,
    /// Display not initialized
    NotInitialized,
    /// Buffer overflow
    BufferOverflow,
}

/// Pixel color on a monochrome panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    Black,
    White,
}

/// E-paper waveform selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RefreshMode {
    /// Fast partial-quality updates, used while drawing scenes
    Fast,
    /// Slow full-quality updates, used while flashing out ghosting
    Quality,
}

/// Raster surface trait
///
/// Coordinates are integer pixels with the origin at the top-left corner.
/// Geometry drawn partly or wholly outside the surface is clipped by the
/// implementation; it is never an error. Lines, outlines and text are drawn
/// in black.
pub trait DisplaySurface {
    /// Surface size as (width, height) in pixels
    fn dimensions(&self) -> (i32, i32);

    /// Fill the entire surface with one color
    fn fill(&mut self, color: Color) -> Result<(), DisplayError>;

    /// Set a single pixel
    fn draw_pixel(&mut self, x: i32, y: i32, color: Color) -> Result<(), DisplayError>;

    /// Draw a 1px line between two points (both inclusive)
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) -> Result<(), DisplayError>;

    /// Draw a rectangle outline
    fn draw_rect(&mut self, x: i32, y: i32, width: i32, height: i32) -> Result<(), DisplayError>;

    /// Fill a rectangle
    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32) -> Result<(), DisplayError>;

    /// Draw a circle outline
    fn draw_circle(&mut self, x: i32, y: i32, radius: i32) -> Result<(), DisplayError>;

    /// Fill a circle
    fn fill_circle(&mut self, x: i32, y: i32, radius: i32) -> Result<(), DisplayError>;

    /// Draw text with its top-left corner at (x, y)
    ///
    /// - `scale`: integer magnification of the single base font (1-4)
    fn draw_text(&mut self, x: i32, y: i32, text: &str, scale: u8) -> Result<(), DisplayError>;

    /// Push buffered content to the panel
    fn flush(&mut self) -> Result<(), DisplayError>;

    /// Check whether a pixel lies on the surface
    fn contains(&self, x: i32, y: i32) -> bool {
        let (width, height) = self.dimensions();
        x >= 0 && y >= 0 && x < width && y < height
    }
}

/// Panel controller trait
///
/// Operates on the physical panel directly, independent of the surface
/// contents.
pub trait DisplayController {
    /// Select the refresh waveform for subsequent updates
    fn set_refresh_mode(&mut self, mode: RefreshMode) -> Result<(), DisplayError>;

    /// Show a solid frame on the panel and block until it is displayed
    fn fill_panel(&mut self, color: Color) -> Result<(), DisplayError>;
}

impl<T: DisplaySurface + ?Sized> DisplaySurface for &mut T {
    fn dimensions(&self) -> (i32, i32) {
        (**self).dimensions()
    }

    fn fill(&mut self, color: Color) -> Result<(), DisplayError> {
        (**self).fill(color)
    }

    fn draw_pixel(&mut self, x: i32, y: i32, color: Color) -> Result<(), DisplayError> {
        (**self).draw_pixel(x, y, color)
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) -> Result<(), DisplayError> {
        (**self).draw_line(x0, y0, x1, y1)
    }

    fn draw_rect(&mut self, x: i32, y: i32, width: i32, height: i32) -> Result<(), DisplayError> {
        (**self).draw_rect(x, y, width, height)
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32) -> Result<(), DisplayError> {
        (**self).fill_rect(x, y, width, height)
    }

    fn draw_circle(&mut self, x: i32, y: i32, radius: i32) -> Result<(), DisplayError> {
        (**self).draw_circle(x, y, radius)
    }

    fn fill_circle(&mut self, x: i32, y: i32, radius: i32) -> Result<(), DisplayError> {
        (**self).fill_circle(x, y, radius)
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, scale: u8) -> Result<(), DisplayError> {
        (**self).draw_text(x, y, text, scale)
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        (**self).flush()
    }
}
